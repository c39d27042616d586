//! ELF symbol resolution and Itanium C++ vtable dumping.
//!
//! The crate borrows a mapped ELF image, resolves its symbol table into
//! named records with a name index and an address index, and decodes the
//! virtual method tables referenced by `_ZTV` symbols.
//!
//! ```no_run
//! use vmtdump::{load_object, validate_elf};
//!
//! let image = std::fs::read("libfoo.so").unwrap();
//! if validate_elf(&image) {
//!     let object = load_object(&image).unwrap();
//!     for symbol in object.vtable_symbols() {
//!         print!("{}", object.decode_vtable(symbol).unwrap());
//!     }
//! }
//! ```

pub mod config;
pub mod error;
pub mod formats;
pub mod hash;
pub mod index;
pub mod io;
pub mod logging;
pub mod object;
pub mod vtable;

pub use config::DumpConfig;
pub use error::{DumpError, IndexKind, Result};
pub use formats::elf::{validate_elf, ElfClass, Symbol, SymbolTable};
pub use index::SymbolIndex;
pub use object::{load_object, LoadedObject};
pub use vtable::{decode_and_render, is_vtable_symbol, VTable};
