//! Width-specific decoding of the 32-bit and 64-bit ELF structures.
//!
//! Both classes share the same field semantics but differ in field widths and
//! positions. [`ElfWidth`] captures those differences once so the section and
//! symbol logic can be written a single time and instantiated per class.

use crate::formats::elf::types::*;
use crate::formats::elf::utils::{check_bounds, NativeRead};

/// Layout contract for one ELF class.
pub trait ElfWidth {
    const CLASS: ElfClass;
    /// Size of the ELF file header.
    const HEADER_SIZE: usize;
    /// Size of one on-disk section header.
    const SECTION_HEADER_SIZE: usize;
    /// Size of one on-disk symbol entry.
    const SYMBOL_SIZE: usize;
    /// Size of a target pointer.
    const POINTER_SIZE: usize;

    /// Decode the file header at the start of `region`.
    fn parse_header(region: &[u8]) -> Result<ElfHeader>;

    /// Decode the section header stored at `offset`.
    fn parse_section_header(region: &[u8], offset: usize) -> Result<SectionHeader>;

    /// Decode the symbol entry stored at `offset`.
    fn parse_symbol(region: &[u8], offset: usize) -> Result<RawSymbol>;

    /// Read one target word, widened to 64 bits.
    fn read_word(region: &[u8], offset: usize) -> Result<u64>;
}

/// 32-bit ELF (`ELFCLASS32`)
#[derive(Debug, Clone, Copy)]
pub enum Elf32 {}

/// 64-bit ELF (`ELFCLASS64`)
#[derive(Debug, Clone, Copy)]
pub enum Elf64 {}

impl ElfWidth for Elf32 {
    const CLASS: ElfClass = ElfClass::Elf32;
    const HEADER_SIZE: usize = 52;
    const SECTION_HEADER_SIZE: usize = 40;
    const SYMBOL_SIZE: usize = 16;
    const POINTER_SIZE: usize = 4;

    fn parse_header(region: &[u8]) -> Result<ElfHeader> {
        check_bounds(0, Self::HEADER_SIZE, region.len())?;
        Ok(ElfHeader {
            e_shoff: region.read_u32(32)? as u64,
            e_shentsize: region.read_u16(46)?,
            e_shnum: region.read_u16(48)?,
        })
    }

    fn parse_section_header(region: &[u8], offset: usize) -> Result<SectionHeader> {
        check_bounds(offset, Self::SECTION_HEADER_SIZE, region.len())?;
        Ok(SectionHeader {
            sh_type: region.read_u32(offset + 4)?,
            sh_offset: region.read_u32(offset + 16)? as u64,
            sh_size: region.read_u32(offset + 20)? as u64,
            sh_link: region.read_u32(offset + 24)?,
        })
    }

    fn parse_symbol(region: &[u8], offset: usize) -> Result<RawSymbol> {
        check_bounds(offset, Self::SYMBOL_SIZE, region.len())?;
        Ok(RawSymbol {
            st_name: region.read_u32(offset)?,
            st_value: region.read_u32(offset + 4)? as u64,
            st_size: region.read_u32(offset + 8)? as u64,
            st_shndx: region.read_u16(offset + 14)?,
        })
    }

    fn read_word(region: &[u8], offset: usize) -> Result<u64> {
        region.read_u32(offset).map(u64::from)
    }
}

impl ElfWidth for Elf64 {
    const CLASS: ElfClass = ElfClass::Elf64;
    const HEADER_SIZE: usize = 64;
    const SECTION_HEADER_SIZE: usize = 64;
    const SYMBOL_SIZE: usize = 24;
    const POINTER_SIZE: usize = 8;

    fn parse_header(region: &[u8]) -> Result<ElfHeader> {
        check_bounds(0, Self::HEADER_SIZE, region.len())?;
        Ok(ElfHeader {
            e_shoff: region.read_u64(40)?,
            e_shentsize: region.read_u16(58)?,
            e_shnum: region.read_u16(60)?,
        })
    }

    fn parse_section_header(region: &[u8], offset: usize) -> Result<SectionHeader> {
        check_bounds(offset, Self::SECTION_HEADER_SIZE, region.len())?;
        Ok(SectionHeader {
            sh_type: region.read_u32(offset + 4)?,
            sh_offset: region.read_u64(offset + 24)?,
            sh_size: region.read_u64(offset + 32)?,
            sh_link: region.read_u32(offset + 40)?,
        })
    }

    fn parse_symbol(region: &[u8], offset: usize) -> Result<RawSymbol> {
        check_bounds(offset, Self::SYMBOL_SIZE, region.len())?;
        Ok(RawSymbol {
            st_name: region.read_u32(offset)?,
            st_shndx: region.read_u16(offset + 6)?,
            st_value: region.read_u64(offset + 8)?,
            st_size: region.read_u64(offset + 16)?,
        })
    }

    fn read_word(region: &[u8], offset: usize) -> Result<u64> {
        region.read_u64(offset)
    }
}
