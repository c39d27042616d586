//! Binary format readers

pub mod elf;
