//! Symbol table loading

use tracing::{debug, warn};

use crate::error::{DumpError, Result};
use crate::formats::elf::headers::{parse_class, parse_header};
use crate::formats::elf::sections::{find_section, section_header, symbol_address};
use crate::formats::elf::types::*;
use crate::formats::elf::utils::{check_bounds, read_cstring, to_offset};
use crate::formats::elf::width::{Elf32, Elf64, ElfWidth};

/// A named, resolved symbol borrowed from a mapped image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol<'data> {
    /// Class of the image the symbol came from
    pub class: ElfClass,
    /// Name from the linked string table
    pub name: &'data str,
    /// `st_value` as stored in the file
    pub definition: u64,
    /// `st_size` as stored in the file
    pub size: u64,
    /// Offset from the start of the image, or `None` when nothing resolves
    pub destination: Option<u64>,
    /// Defining section index (`st_shndx`)
    pub section: u16,
}

impl<'data> Symbol<'data> {
    pub fn is_undefined(&self) -> bool {
        self.section == SHN_UNDEF
    }

    pub fn pointer_size(&self) -> usize {
        self.class.pointer_size()
    }
}

/// Every named symbol of an image, in symbol-table order.
#[derive(Debug, Clone)]
pub struct SymbolTable<'data> {
    class: ElfClass,
    symbols: Vec<Symbol<'data>>,
}

impl<'data> SymbolTable<'data> {
    /// Load the symbol table of an ELF image.
    ///
    /// The class byte picks the width once; everything below is shared.
    pub fn load(region: &'data [u8]) -> Result<Self> {
        match parse_class(region)? {
            ElfClass::Elf32 => load_symbols::<Elf32>(region),
            ElfClass::Elf64 => load_symbols::<Elf64>(region),
        }
    }

    /// Wrap already-resolved symbols, e.g. ones built by hand.
    #[cfg(test)]
    pub(crate) fn from_symbols(class: ElfClass, symbols: Vec<Symbol<'data>>) -> Self {
        Self { class, symbols }
    }

    pub fn class(&self) -> ElfClass {
        self.class
    }

    pub fn get(&self, index: usize) -> Option<&Symbol<'data>> {
        self.symbols.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Symbol<'data>> {
        self.symbols.iter()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl<'a, 'data> IntoIterator for &'a SymbolTable<'data> {
    type Item = &'a Symbol<'data>;
    type IntoIter = std::slice::Iter<'a, Symbol<'data>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Read every usable entry of the first `SHT_SYMTAB` section.
///
/// Entries with a zero value or a zero name index are placeholders and are
/// skipped.
pub fn load_symbols<'data, W: ElfWidth>(region: &'data [u8]) -> Result<SymbolTable<'data>> {
    let header = parse_header::<W>(region)?;

    let symtab =
        find_section::<W>(region, &header, SHT_SYMTAB)?.ok_or(DumpError::NoSymbolTable)?;
    let strtab = section_header::<W>(region, &header, symtab.sh_link)?;

    let count = symtab.sh_size / W::SYMBOL_SIZE as u64;
    debug!(
        class = W::CLASS.bits(),
        symtab_offset = symtab.sh_offset,
        strtab_index = symtab.sh_link,
        entries = count,
        "Found symbol table"
    );
    if count == 0 {
        return Err(DumpError::EmptySymbolTable);
    }

    let count = to_offset(count)?;
    let base = to_offset(symtab.sh_offset)?;
    let table_size = count
        .checked_mul(W::SYMBOL_SIZE)
        .ok_or(ElfError::AddressOverflow)?;
    check_bounds(base, table_size, region.len())?;
    let strings = section_data(region, &strtab)?;

    let mut symbols = Vec::new();
    symbols
        .try_reserve_exact(count)
        .map_err(|_| DumpError::AllocationFailure)?;

    for index in 0..count {
        let raw = W::parse_symbol(region, base + index * W::SYMBOL_SIZE)?;
        if raw.is_placeholder() {
            continue;
        }

        let name = match read_cstring(strings, raw.st_name as usize) {
            Ok(name) => name,
            Err(ElfError::InvalidString) => {
                warn!(
                    entry = index,
                    name_index = raw.st_name,
                    "Skipping symbol with non-UTF-8 name"
                );
                continue;
            }
            Err(err) => return Err(err.into()),
        };

        symbols.push(Symbol {
            class: W::CLASS,
            name,
            definition: raw.st_value,
            size: raw.st_size,
            destination: symbol_address::<W>(region, &header, &raw)?,
            section: raw.st_shndx,
        });
    }

    symbols.shrink_to_fit();
    debug!(raw = count, kept = symbols.len(), "Loaded symbols");

    if symbols.is_empty() {
        return Err(DumpError::EmptySymbolTable);
    }

    Ok(SymbolTable {
        class: W::CLASS,
        symbols,
    })
}

/// Bytes of a section, checked against the image.
fn section_data<'data>(region: &'data [u8], section: &SectionHeader) -> Result<&'data [u8]> {
    let offset = to_offset(section.sh_offset)?;
    let size = to_offset(section.sh_size)?;
    check_bounds(offset, size, region.len())?;
    Ok(&region[offset..offset + size])
}
