//! Core ELF types and constants

use thiserror::Error;

/// ELF parsing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ElfError {
    #[error("Invalid ELF magic")]
    InvalidMagic,
    #[error("Unsupported ELF class: {0}")]
    UnsupportedClass(u8),
    #[error("Truncated at {offset:#x}, needed {needed} bytes")]
    Truncated { offset: u64, needed: usize },
    #[error("Invalid section index: {0}")]
    InvalidSectionIndex(u32),
    #[error("Malformed header: {0}")]
    MalformedHeader(String),
    #[error("String not UTF-8")]
    InvalidString,
    #[error("Address arithmetic overflowed")]
    AddressOverflow,
}

pub type Result<T> = std::result::Result<T, ElfError>;

/// ELF magic number
pub const ELF_MAGIC: &[u8; 4] = b"\x7fELF";

/// Position of the class byte inside `e_ident`
pub const EI_CLASS: usize = 4;

/// ELF class (32-bit or 64-bit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElfClass {
    Elf32 = 1,
    Elf64 = 2,
}

impl ElfClass {
    pub fn from_u8(val: u8) -> Result<Self> {
        match val {
            1 => Ok(ElfClass::Elf32),
            2 => Ok(ElfClass::Elf64),
            _ => Err(ElfError::UnsupportedClass(val)),
        }
    }

    pub fn bits(&self) -> u8 {
        match self {
            ElfClass::Elf32 => 32,
            ElfClass::Elf64 => 64,
        }
    }

    /// Size of a target pointer (and of every vtable slot) for this class.
    pub fn pointer_size(&self) -> usize {
        match self {
            ElfClass::Elf32 => 4,
            ElfClass::Elf64 => 8,
        }
    }
}

/// The subset of the ELF header needed to walk sections.
#[derive(Debug, Clone, Copy)]
pub struct ElfHeader {
    pub e_shoff: u64,
    pub e_shentsize: u16,
    pub e_shnum: u16,
}

/// Section header, widened to 64-bit fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionHeader {
    pub sh_type: u32,
    pub sh_offset: u64,
    pub sh_size: u64,
    pub sh_link: u32,
}

/// Section types
pub const SHT_NULL: u32 = 0;
pub const SHT_PROGBITS: u32 = 1;
pub const SHT_SYMTAB: u32 = 2;
pub const SHT_STRTAB: u32 = 3;

/// Special section indices
pub const SHN_UNDEF: u16 = 0;
pub const SHN_LORESERVE: u16 = 0xff00;
pub const SHN_ABS: u16 = 0xfff1;
pub const SHN_COMMON: u16 = 0xfff2;

/// Raw symbol entry, widened to 64-bit fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSymbol {
    pub st_name: u32,
    pub st_value: u64,
    pub st_size: u64,
    pub st_shndx: u16,
}

impl RawSymbol {
    /// Unnamed or valueless entries carry nothing worth indexing.
    pub fn is_placeholder(&self) -> bool {
        self.st_value == 0 || self.st_name == 0
    }
}
