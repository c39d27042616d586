//! Error types for symbol loading and vtable decoding.
//!
//! Low-level structural problems are reported by the ELF reader as
//! [`ElfError`]; they surface to callers as [`DumpError::InvalidFormat`].
//! Every variant is terminal for the operation that raised it.

use std::fmt;
use thiserror::Error;

use crate::formats::elf::ElfError;

/// Which lookup index rejected a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    Name,
    Address,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKind::Name => write!(f, "name"),
            IndexKind::Address => write!(f, "address"),
        }
    }
}

/// Main error type for vmtdump operations.
#[derive(Debug, Error)]
pub enum DumpError {
    /// Bad magic, unknown class byte, or a structure that does not fit the image
    #[error("Invalid ELF format: {0}")]
    InvalidFormat(String),

    /// No `SHT_SYMTAB` section
    #[error("No symbol table section")]
    NoSymbolTable,

    /// Symbol table present but nothing usable in it
    #[error("Symbol table has no usable entries")]
    EmptySymbolTable,

    /// Two symbols share a key in one of the lookup indices
    #[error("Duplicate symbol in {index} index: {key}")]
    DuplicateSymbol { index: IndexKind, key: String },

    /// The symbol array could not be allocated
    #[error("Allocation failure while loading symbols")]
    AllocationFailure,

    /// Configuration could not be parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ElfError> for DumpError {
    fn from(err: ElfError) -> Self {
        DumpError::InvalidFormat(err.to_string())
    }
}

/// Result type alias for vmtdump operations
pub type Result<T> = std::result::Result<T, DumpError>;
