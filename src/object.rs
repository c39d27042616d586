//! Loaded object handle.
//!
//! [`LoadedObject`] owns the symbol table and both lookup indices of one ELF
//! image and borrows the image itself. Construction is all-or-nothing: any
//! failure drops whatever was built so far and no handle escapes. Dropping
//! the handle releases the indices first, then the table.

use tracing::{debug, trace};

use crate::error::{DumpError, Result};
use crate::formats::elf::{validate_elf, ElfClass, Symbol, SymbolTable};
use crate::index::SymbolIndex;
use crate::vtable::{contains_marker, VTable, VTABLE_MARKER};

/// Symbols of a mapped ELF image with name and address lookup.
#[derive(Debug)]
pub struct LoadedObject<'data> {
    region: &'data [u8],
    // Field order is drop order.
    index: SymbolIndex<'data>,
    table: SymbolTable<'data>,
}

/// Load the symbols of `region` and index them.
pub fn load_object(region: &[u8]) -> Result<LoadedObject<'_>> {
    LoadedObject::load(region)
}

impl<'data> LoadedObject<'data> {
    /// Validate, load, and index an ELF image.
    pub fn load(region: &'data [u8]) -> Result<Self> {
        if !validate_elf(region) {
            return Err(DumpError::InvalidFormat("bad ELF magic".to_string()));
        }

        let table = SymbolTable::load(region)?;
        let index = SymbolIndex::build(&table)?;

        debug!(
            class = table.class().bits(),
            symbols = table.len(),
            addresses = index.address_count(),
            "Loaded object"
        );

        Ok(Self {
            region,
            index,
            table,
        })
    }

    pub fn class(&self) -> ElfClass {
        self.table.class()
    }

    pub fn symbols(&self) -> &SymbolTable<'data> {
        &self.table
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Look up a symbol by exact name.
    pub fn find_by_name(&self, name: &str) -> Option<&Symbol<'data>> {
        self.index
            .position_by_name(name)
            .and_then(|position| self.table.get(position))
    }

    /// Look up a symbol by destination (offset from the start of the image).
    pub fn find_by_address(&self, address: u64) -> Option<&Symbol<'data>> {
        self.index
            .position_by_address(address)
            .and_then(|position| self.table.get(position))
    }

    /// Symbols carrying the default vtable marker that resolve into the
    /// image, in symbol-table order.
    pub fn vtable_symbols(&self) -> impl Iterator<Item = &Symbol<'data>> + '_ {
        self.symbols_with_marker(VTABLE_MARKER)
    }

    /// Like [`vtable_symbols`](Self::vtable_symbols) with a custom marker.
    pub fn symbols_with_marker<'a>(
        &'a self,
        marker: &'a str,
    ) -> impl Iterator<Item = &'a Symbol<'data>> + 'a {
        self.table
            .iter()
            .filter(move |symbol| symbol.destination.is_some() && contains_marker(symbol.name, marker))
    }

    /// Decode the vtable a symbol points at.
    pub fn decode_vtable(&self, symbol: &Symbol<'data>) -> Result<VTable<'data>> {
        VTable::decode(self.region, symbol)
    }
}

impl Drop for LoadedObject<'_> {
    fn drop(&mut self) {
        trace!(symbols = self.table.len(), "Releasing symbol handle");
    }
}
