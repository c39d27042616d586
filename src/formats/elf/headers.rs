//! ELF header parsing

use crate::formats::elf::types::*;
use crate::formats::elf::utils::NativeRead;
use crate::formats::elf::width::ElfWidth;

/// Check the ELF magic at the start of a region.
pub fn validate_elf(region: &[u8]) -> bool {
    region.get(..ELF_MAGIC.len()) == Some(&ELF_MAGIC[..])
}

/// Read the class byte of an image that passed [`validate_elf`].
pub fn parse_class(region: &[u8]) -> Result<ElfClass> {
    if !validate_elf(region) {
        return Err(ElfError::InvalidMagic);
    }
    ElfClass::from_u8(region.read_u8(EI_CLASS)?)
}

/// Parse the ELF header for a known width
pub fn parse_header<W: ElfWidth>(region: &[u8]) -> Result<ElfHeader> {
    let header = W::parse_header(region)?;

    // The entry size is the stride used to walk the section table.
    if header.e_shnum > 0 && (header.e_shentsize as usize) < W::SECTION_HEADER_SIZE {
        return Err(ElfError::MalformedHeader(format!(
            "Invalid e_shentsize: expected at least {}, got {}",
            W::SECTION_HEADER_SIZE,
            header.e_shentsize
        )));
    }

    Ok(header)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::elf::width::{Elf32, Elf64};

    fn minimal_elf32_header() -> Vec<u8> {
        let mut data = vec![0u8; 52];
        // ELF magic
        data[0..4].copy_from_slice(b"\x7fELF");
        data[4] = 1; // ELFCLASS32
        data[6] = 1; // EV_CURRENT

        // e_shoff = 0x34
        data[32..36].copy_from_slice(&0x34u32.to_ne_bytes());
        // e_shentsize = 40
        data[46..48].copy_from_slice(&40u16.to_ne_bytes());
        // e_shnum = 2
        data[48..50].copy_from_slice(&2u16.to_ne_bytes());

        data
    }

    fn minimal_elf64_header() -> Vec<u8> {
        let mut data = vec![0u8; 64];
        // ELF magic
        data[0..4].copy_from_slice(b"\x7fELF");
        data[4] = 2; // ELFCLASS64
        data[6] = 1; // EV_CURRENT

        // e_shoff = 0x40
        data[40..48].copy_from_slice(&0x40u64.to_ne_bytes());
        // e_shentsize = 64
        data[58..60].copy_from_slice(&64u16.to_ne_bytes());
        // e_shnum = 5
        data[60..62].copy_from_slice(&5u16.to_ne_bytes());

        data
    }

    #[test]
    fn test_validate_elf() {
        assert!(validate_elf(&minimal_elf64_header()));
        assert!(validate_elf(b"\x7fELF"));
        assert!(!validate_elf(b"\x7fEL"));
        assert!(!validate_elf(b"MZ\x90\x00"));
        assert!(!validate_elf(&[]));
    }

    #[test]
    fn test_parse_class() {
        assert_eq!(parse_class(&minimal_elf32_header()).unwrap(), ElfClass::Elf32);
        assert_eq!(parse_class(&minimal_elf64_header()).unwrap(), ElfClass::Elf64);

        let mut data = minimal_elf64_header();
        data[4] = 3;
        assert_eq!(parse_class(&data), Err(ElfError::UnsupportedClass(3)));

        data[0] = 0xFF; // Invalid magic
        assert_eq!(parse_class(&data), Err(ElfError::InvalidMagic));
    }

    #[test]
    fn test_parse_elf32_header() {
        let data = minimal_elf32_header();
        let header = parse_header::<Elf32>(&data).unwrap();
        assert_eq!(header.e_shoff, 0x34);
        assert_eq!(header.e_shentsize, 40);
        assert_eq!(header.e_shnum, 2);
    }

    #[test]
    fn test_parse_elf64_header() {
        let data = minimal_elf64_header();
        let header = parse_header::<Elf64>(&data).unwrap();
        assert_eq!(header.e_shoff, 0x40);
        assert_eq!(header.e_shentsize, 64);
        assert_eq!(header.e_shnum, 5);
    }

    #[test]
    fn test_short_section_entry_size() {
        let mut data = minimal_elf64_header();
        data[58..60].copy_from_slice(&40u16.to_ne_bytes());
        assert!(matches!(
            parse_header::<Elf64>(&data),
            Err(ElfError::MalformedHeader(_))
        ));

        // Irrelevant when there are no sections to walk
        data[60..62].copy_from_slice(&0u16.to_ne_bytes());
        assert!(parse_header::<Elf64>(&data).is_ok());
    }

    #[test]
    fn test_truncated_header() {
        let data = vec![0x7f, b'E', b'L', b'F']; // Only magic
        assert!(matches!(parse_class(&data), Err(ElfError::Truncated { .. })));
        assert!(matches!(
            parse_header::<Elf32>(&data),
            Err(ElfError::Truncated { .. })
        ));
    }
}
