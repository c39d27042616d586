//! Name and address lookup over a loaded symbol table.
//!
//! Both maps store positions into the owning [`SymbolTable`] and never the
//! symbols themselves. A key seen twice is a hard failure: the index assumes
//! one definition per name and per address. Weak or aliased symbols in real
//! binaries break that assumption and make construction fail.

use std::collections::hash_map::Entry;

use tracing::warn;

use crate::error::{DumpError, IndexKind, Result};
use crate::formats::elf::{Symbol, SymbolTable};
use crate::hash::{AddressMap, NameMap};

/// The two lookup indices of a loaded object.
#[derive(Debug, Clone, Default)]
pub struct SymbolIndex<'data> {
    by_name: NameMap<'data, usize>,
    by_address: AddressMap<usize>,
}

impl<'data> SymbolIndex<'data> {
    /// Index every symbol of `table` by name and, when it resolves, by
    /// destination.
    pub fn build(table: &SymbolTable<'data>) -> Result<Self> {
        let mut index = Self::default();
        index.by_name.reserve(table.len());
        index.by_address.reserve(table.len());

        for (position, symbol) in table.iter().enumerate() {
            index.insert_name(position, symbol)?;
            index.insert_address(table, position, symbol)?;
        }

        Ok(index)
    }

    fn insert_name(&mut self, position: usize, symbol: &Symbol<'data>) -> Result<()> {
        match self.by_name.entry(symbol.name) {
            Entry::Vacant(slot) => {
                slot.insert(position);
                Ok(())
            }
            Entry::Occupied(slot) => {
                warn!(
                    name = symbol.name,
                    symbol = position,
                    occupant = *slot.get(),
                    "Collision in name index"
                );
                Err(DumpError::DuplicateSymbol {
                    index: IndexKind::Name,
                    key: symbol.name.to_string(),
                })
            }
        }
    }

    fn insert_address(
        &mut self,
        table: &SymbolTable<'data>,
        position: usize,
        symbol: &Symbol<'data>,
    ) -> Result<()> {
        let Some(destination) = symbol.destination else {
            return Ok(());
        };

        match self.by_address.entry(destination) {
            Entry::Vacant(slot) => {
                slot.insert(position);
                Ok(())
            }
            Entry::Occupied(slot) => {
                let occupant = table.get(*slot.get()).map(|s| s.name).unwrap_or("");
                warn!(
                    address = destination,
                    name = symbol.name,
                    occupant,
                    "Collision in address index"
                );
                Err(DumpError::DuplicateSymbol {
                    index: IndexKind::Address,
                    key: format!("{:#x}", destination),
                })
            }
        }
    }

    /// Position of the symbol named `name`.
    pub fn position_by_name(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Position of the symbol whose destination is `address`.
    pub fn position_by_address(&self, address: u64) -> Option<usize> {
        self.by_address.get(&address).copied()
    }

    #[cfg(test)]
    pub(crate) fn name_count(&self) -> usize {
        self.by_name.len()
    }

    pub fn address_count(&self) -> usize {
        self.by_address.len()
    }
}
