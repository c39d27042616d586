//! ELF (Executable and Linkable Format) reader
//!
//! A zero-copy reader over a mapped image covering what symbol resolution
//! needs: the file header, section headers, and the symbol table with its
//! linked string table. Both 32-bit and 64-bit images are handled by one
//! generic code path parameterized over [`width::ElfWidth`].

pub mod headers;
pub mod sections;
pub mod symbols;
pub mod types;
pub mod utils;
pub mod width;

pub use headers::validate_elf;
pub use symbols::{Symbol, SymbolTable};
pub use types::*;
pub use width::{Elf32, Elf64, ElfWidth};
