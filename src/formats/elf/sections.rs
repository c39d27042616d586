//! Section lookup and symbol address resolution

use crate::formats::elf::types::*;
use crate::formats::elf::utils::to_offset;
use crate::formats::elf::width::ElfWidth;

/// Get the section header at `index`.
///
/// The header lives at `e_shoff + index * e_shentsize` from the start of the
/// region. Indices past `e_shnum` are rejected rather than read blindly.
pub fn section_header<W: ElfWidth>(
    region: &[u8],
    header: &ElfHeader,
    index: u32,
) -> Result<SectionHeader> {
    if index >= u32::from(header.e_shnum) {
        return Err(ElfError::InvalidSectionIndex(index));
    }

    let offset = u64::from(index)
        .checked_mul(u64::from(header.e_shentsize))
        .and_then(|rel| rel.checked_add(header.e_shoff))
        .ok_or(ElfError::AddressOverflow)?;

    W::parse_section_header(region, to_offset(offset)?)
}

/// Find the first section of the given type.
pub fn find_section<W: ElfWidth>(
    region: &[u8],
    header: &ElfHeader,
    sh_type: u32,
) -> Result<Option<SectionHeader>> {
    for index in 0..u32::from(header.e_shnum) {
        let section = section_header::<W>(region, header, index)?;
        if section.sh_type == sh_type {
            return Ok(Some(section));
        }
    }
    Ok(None)
}

/// Translate a symbol's value into an offset from the start of the region.
///
/// - undefined symbols have nothing to resolve and yield `None`
/// - absolute symbols already hold the final quantity
/// - everything else is relative to its defining section's file offset
///
/// Other reserved indices (`SHN_COMMON` and friends) do not name a section
/// in the file and also yield `None`.
pub fn symbol_address<W: ElfWidth>(
    region: &[u8],
    header: &ElfHeader,
    symbol: &RawSymbol,
) -> Result<Option<u64>> {
    match symbol.st_shndx {
        SHN_UNDEF => Ok(None),
        SHN_ABS => Ok(Some(symbol.st_value)),
        idx if idx >= SHN_LORESERVE => Ok(None),
        idx => {
            let section = section_header::<W>(region, header, u32::from(idx))?;
            section
                .sh_offset
                .checked_add(symbol.st_value)
                .map(Some)
                .ok_or(ElfError::AddressOverflow)
        }
    }
}
