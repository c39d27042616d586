//! Itanium C++ ABI virtual method table decoding.
//!
//! A vtable symbol (`_ZTV...`) points at a record of the form
//!
//! ```text
//! +0        offset-to-top (base offset)
//! +ptr      typeinfo pointer
//! +2*ptr    virtual function pointers ...
//! ```
//!
//! where `ptr` is the target word size. The ABI also defines a variant with a
//! leading virtual-call offset; nothing in the symbol says which one applies,
//! so the layout above is always assumed. Tables of the richer variant decode
//! with every field shifted by one word.

use std::fmt;

use memchr::memmem;
use serde::Serialize;
use tracing::debug;

use crate::error::{DumpError, Result};
use crate::formats::elf::utils::{check_bounds, to_offset};
use crate::formats::elf::{Elf32, Elf64, ElfClass, ElfWidth, Symbol};

/// Mangling prefix of an Itanium vtable symbol.
pub const VTABLE_MARKER: &str = "_ZTV";

/// True when `name` carries the vtable mangling marker anywhere.
pub fn is_vtable_symbol(name: &str) -> bool {
    contains_marker(name, VTABLE_MARKER)
}

/// Substring test used for configurable markers.
pub fn contains_marker(name: &str, marker: &str) -> bool {
    memmem::find(name.as_bytes(), marker.as_bytes()).is_some()
}

/// Demangle a vtable symbol name (`_ZTV1A` -> `vtable for A`).
pub fn demangle_name(name: &str) -> Option<String> {
    cpp_demangle::Symbol::new(name)
        .ok()
        .map(|sym| sym.to_string())
}

/// A decoded vtable record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VTable<'data> {
    /// Mangled symbol name
    pub name: &'data str,
    /// Demangled name, when requested and recognized
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demangled: Option<String>,
    /// `st_value` of the symbol
    pub definition: u64,
    /// Target word size used for every slot
    pub pointer_size: usize,
    /// Offset-to-top header word
    pub base_offset: u64,
    /// Typeinfo pointer header word
    pub type_info: u64,
    /// Function pointer slots, `symbol.size / pointer_size` of them
    pub functions: Vec<u64>,
}

impl<'data> VTable<'data> {
    /// Interpret the bytes at `symbol`'s destination as a vtable.
    ///
    /// The symbol must resolve to a destination; the whole record (two header
    /// words plus every slot) must lie inside `region`.
    pub fn decode(region: &[u8], symbol: &Symbol<'data>) -> Result<Self> {
        let destination = symbol.destination.ok_or_else(|| {
            DumpError::InvalidFormat(format!("vtable symbol {} has no destination", symbol.name))
        })?;

        let word = symbol.pointer_size();
        let start = to_offset(destination)?;
        let count = to_offset(symbol.size / word as u64)?;
        let record_size = count
            .checked_add(2)
            .and_then(|words| words.checked_mul(word))
            .ok_or_else(|| DumpError::InvalidFormat(format!("vtable {} too large", symbol.name)))?;
        check_bounds(start, record_size, region.len())?;

        let read = |slot: usize| -> Result<u64> {
            let offset = start + slot * word;
            let value = match symbol.class {
                ElfClass::Elf32 => Elf32::read_word(region, offset)?,
                ElfClass::Elf64 => Elf64::read_word(region, offset)?,
            };
            Ok(value)
        };

        let base_offset = read(0)?;
        let type_info = read(1)?;
        let functions = (0..count)
            .map(|slot| read(slot + 2))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            name = symbol.name,
            destination,
            entries = count,
            "Decoded vtable"
        );

        Ok(Self {
            name: symbol.name,
            demangled: None,
            definition: symbol.definition,
            pointer_size: word,
            base_offset,
            type_info,
            functions,
        })
    }

    /// Attach the demangled symbol name.
    pub fn with_demangled_name(mut self) -> Self {
        self.demangled = demangle_name(self.name);
        self
    }

    pub fn entry_count(&self) -> usize {
        self.functions.len()
    }

    /// Text dump of the record.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

/// One block per vtable:
///
/// ```text
/// +_ZTV1A
///    ... offset:  10
///    ... entries: 1
///    +0000 (??? (*)(...)) 0x0
///    +0000 typeinfo = 4000
///    +0008 (??? (*)(...)) 0x1234
/// ```
impl fmt::Display for VTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "+{}", self.name)?;
        writeln!(f, "   ... offset:  {:X}", self.definition)?;
        writeln!(f, "   ... entries: {}", self.functions.len())?;

        writeln!(f, "   +{:04X} (??? (*)(...)) 0x{:X}", 0, self.base_offset)?;
        writeln!(f, "   +{:04X} typeinfo = {:X}", 0, self.type_info)?;

        for (slot, function) in self.functions.iter().enumerate() {
            let offset = (slot + 1) * self.pointer_size;
            writeln!(f, "   +{:04X} (??? (*)(...)) 0x{:X}", offset, function)?;
        }

        Ok(())
    }
}

/// Decode and render a single vtable symbol.
pub fn decode_and_render(region: &[u8], symbol: &Symbol<'_>) -> Result<String> {
    VTable::decode(region, symbol).map(|table| table.render())
}
