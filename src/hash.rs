//! Hashers for the symbol lookup indices.
//!
//! Named `hash` after what it provides, not to be confused with `std::hash`.

use std::collections::HashMap;
use std::hash::{BuildHasherDefault, Hasher};

/// Starting value of the polynomial string hash (a large prime).
pub const NAME_HASH_SEED: u64 = 1125899906842597;

/// Multiplier applied per input byte.
const NAME_HASH_FACTOR: u64 = 31;

/// Polynomial hash of a symbol name: `h = 31 * h + byte`, from
/// [`NAME_HASH_SEED`], wrapping on overflow.
#[cfg(test)]
pub(crate) fn string_hash(name: &str) -> u64 {
    let mut hasher = NameHasher::default();
    hasher.write(name.as_bytes());
    hasher.finish()
}

/// [`Hasher`] running the polynomial string hash over every byte written.
#[derive(Debug, Clone, Copy)]
pub struct NameHasher {
    hash: u64,
}

impl Default for NameHasher {
    fn default() -> Self {
        Self {
            hash: NAME_HASH_SEED,
        }
    }
}

impl Hasher for NameHasher {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.hash = self
                .hash
                .wrapping_mul(NAME_HASH_FACTOR)
                .wrapping_add(u64::from(byte));
        }
    }

    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }
}

/// [`Hasher`] that uses an address as its own hash.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddressHasher {
    hash: u64,
}

impl Hasher for AddressHasher {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.hash = (self.hash << 8) | u64::from(byte);
        }
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.hash = i;
    }

    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }
}

/// HashMap keyed by symbol name.
pub type NameMap<'a, V> = HashMap<&'a str, V, BuildHasherDefault<NameHasher>>;

/// HashMap keyed by image offset.
pub type AddressMap<V> = HashMap<u64, V, BuildHasherDefault<AddressHasher>>;
