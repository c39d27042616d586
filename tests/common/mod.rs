//! Common test utilities and helpers.
//!
//! [`ImageBuilder`] assembles small ELF images in host byte order with four
//! sections: NULL, a PROGBITS payload, the symbol table, and its string
//! table.

#![allow(dead_code)]

use std::io::Write;

use tempfile::NamedTempFile;

/// Section index of the payload section.
pub const DATA_SECTION: u16 = 1;
/// File offset of the payload section.
pub const PAYLOAD_OFFSET: u64 = 64;

pub const SHT_PROGBITS: u32 = 1;
pub const SHT_SYMTAB: u32 = 2;
pub const SHT_STRTAB: u32 = 3;
pub const SHN_UNDEF: u16 = 0;
pub const SHN_ABS: u16 = 0xfff1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    W32,
    W64,
}

impl Width {
    pub fn pointer_size(self) -> usize {
        match self {
            Width::W32 => 4,
            Width::W64 => 8,
        }
    }

    fn class(self) -> u8 {
        match self {
            Width::W32 => 1,
            Width::W64 => 2,
        }
    }

    fn section_header_size(self) -> usize {
        match self {
            Width::W32 => 40,
            Width::W64 => 64,
        }
    }

    fn symbol_size(self) -> usize {
        match self {
            Width::W32 => 16,
            Width::W64 => 24,
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    name: Option<Vec<u8>>,
    value: u64,
    size: u64,
    shndx: u16,
}

/// Builder for synthetic ELF images.
#[derive(Debug, Clone)]
pub struct ImageBuilder {
    width: Width,
    payload: Vec<u8>,
    entries: Vec<Entry>,
    symtab_type: u32,
    symtab_size: Option<u64>,
}

impl ImageBuilder {
    pub fn new(width: Width) -> Self {
        Self {
            width,
            payload: Vec::new(),
            entries: Vec::new(),
            symtab_type: SHT_SYMTAB,
            symtab_size: None,
        }
    }

    /// Payload words in the image's pointer width.
    pub fn payload_words(mut self, words: &[u64]) -> Self {
        self.payload = words
            .iter()
            .flat_map(|&w| match self.width {
                Width::W32 => (w as u32).to_ne_bytes().to_vec(),
                Width::W64 => w.to_ne_bytes().to_vec(),
            })
            .collect();
        self
    }

    pub fn payload(mut self, bytes: Vec<u8>) -> Self {
        self.payload = bytes;
        self
    }

    /// Named symbol entry.
    pub fn symbol(self, name: &str, value: u64, size: u64, shndx: u16) -> Self {
        self.raw_symbol(name.as_bytes(), value, size, shndx)
    }

    /// Symbol entry with arbitrary name bytes.
    pub fn raw_symbol(mut self, name: &[u8], value: u64, size: u64, shndx: u16) -> Self {
        self.entries.push(Entry {
            name: Some(name.to_vec()),
            value,
            size,
            shndx,
        });
        self
    }

    /// Entry with a zero name index.
    pub fn unnamed(mut self, value: u64, size: u64, shndx: u16) -> Self {
        self.entries.push(Entry {
            name: None,
            value,
            size,
            shndx,
        });
        self
    }

    /// Turn the symbol table into a plain PROGBITS section.
    pub fn without_symtab(mut self) -> Self {
        self.symtab_type = SHT_PROGBITS;
        self
    }

    /// Override the symbol table's `sh_size`.
    pub fn symtab_size(mut self, size: u64) -> Self {
        self.symtab_size = Some(size);
        self
    }

    /// Number of raw entries including the leading null entry.
    pub fn raw_entry_count(&self) -> usize {
        self.entries.len() + 1
    }

    pub fn build(&self) -> Vec<u8> {
        let w = self.width;

        let mut strtab = vec![0u8];
        let mut symtab = vec![0u8; w.symbol_size()];
        for entry in &self.entries {
            let name_index = match &entry.name {
                Some(name) => {
                    let index = strtab.len() as u32;
                    strtab.extend_from_slice(name);
                    strtab.push(0);
                    index
                }
                None => 0,
            };
            let mut raw = vec![0u8; w.symbol_size()];
            match w {
                Width::W32 => {
                    put_u32(&mut raw, 0, name_index);
                    put_u32(&mut raw, 4, entry.value as u32);
                    put_u32(&mut raw, 8, entry.size as u32);
                    put_u16(&mut raw, 14, entry.shndx);
                }
                Width::W64 => {
                    put_u32(&mut raw, 0, name_index);
                    put_u16(&mut raw, 6, entry.shndx);
                    put_u64(&mut raw, 8, entry.value);
                    put_u64(&mut raw, 16, entry.size);
                }
            }
            symtab.extend_from_slice(&raw);
        }

        let payload_off = PAYLOAD_OFFSET as usize;
        let symtab_off = align8(payload_off + self.payload.len());
        let strtab_off = symtab_off + symtab.len();
        let shdr_off = align8(strtab_off + strtab.len());
        let shnum = 4;

        let mut image = vec![0u8; shdr_off + shnum * w.section_header_size()];
        image[0..4].copy_from_slice(b"\x7fELF");
        image[4] = w.class();
        image[5] = if cfg!(target_endian = "little") { 1 } else { 2 };
        image[6] = 1;
        put_u16(&mut image, 16, 1); // ET_REL
        put_u32(&mut image, 20, 1);
        match w {
            Width::W32 => {
                put_u16(&mut image, 18, 3); // EM_386
                put_u32(&mut image, 32, shdr_off as u32);
                put_u16(&mut image, 40, 52);
                put_u16(&mut image, 46, 40);
                put_u16(&mut image, 48, shnum as u16);
            }
            Width::W64 => {
                put_u16(&mut image, 18, 62); // EM_X86_64
                put_u64(&mut image, 40, shdr_off as u64);
                put_u16(&mut image, 52, 64);
                put_u16(&mut image, 58, 64);
                put_u16(&mut image, 60, shnum as u16);
            }
        }

        image[payload_off..payload_off + self.payload.len()].copy_from_slice(&self.payload);
        image[symtab_off..symtab_off + symtab.len()].copy_from_slice(&symtab);
        image[strtab_off..strtab_off + strtab.len()].copy_from_slice(&strtab);

        let sections = [
            (0, 0, 0, 0),
            (SHT_PROGBITS, payload_off, self.payload.len() as u64, 0),
            (
                self.symtab_type,
                symtab_off,
                self.symtab_size.unwrap_or(symtab.len() as u64),
                3,
            ),
            (SHT_STRTAB, strtab_off, strtab.len() as u64, 0),
        ];
        for (i, (sh_type, offset, size, link)) in sections.into_iter().enumerate() {
            let base = shdr_off + i * w.section_header_size();
            match w {
                Width::W32 => {
                    put_u32(&mut image, base + 4, sh_type);
                    put_u32(&mut image, base + 16, offset as u32);
                    put_u32(&mut image, base + 20, size as u32);
                    put_u32(&mut image, base + 24, link);
                }
                Width::W64 => {
                    put_u32(&mut image, base + 4, sh_type);
                    put_u64(&mut image, base + 24, offset as u64);
                    put_u64(&mut image, base + 32, size);
                    put_u32(&mut image, base + 40, link);
                }
            }
        }

        image
    }
}

fn align8(value: usize) -> usize {
    (value + 7) & !7
}

fn put_u16(buf: &mut [u8], offset: usize, value: u16) {
    buf[offset..offset + 2].copy_from_slice(&value.to_ne_bytes());
}

fn put_u32(buf: &mut [u8], offset: usize, value: u32) {
    buf[offset..offset + 4].copy_from_slice(&value.to_ne_bytes());
}

fn put_u64(buf: &mut [u8], offset: usize, value: u64) {
    buf[offset..offset + 8].copy_from_slice(&value.to_ne_bytes());
}

/// Creates a temporary file with the given content.
pub fn create_temp_file(content: &[u8]) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content).unwrap();
    temp_file
}
