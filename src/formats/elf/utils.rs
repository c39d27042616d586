//! Utility functions for ELF parsing

use crate::formats::elf::types::{ElfError, Result};

/// Bounds-checked reads in host byte order.
///
/// Images are interpreted in the byte order of the machine doing the
/// reading; no conversion is attempted.
pub trait NativeRead {
    fn read_u8(&self, offset: usize) -> Result<u8>;
    fn read_u16(&self, offset: usize) -> Result<u16>;
    fn read_u32(&self, offset: usize) -> Result<u32>;
    fn read_u64(&self, offset: usize) -> Result<u64>;
}

impl NativeRead for [u8] {
    fn read_u8(&self, offset: usize) -> Result<u8> {
        self.get(offset)
            .copied()
            .ok_or(ElfError::Truncated { offset: offset as u64, needed: 1 })
    }

    fn read_u16(&self, offset: usize) -> Result<u16> {
        read_array::<2>(self, offset).map(u16::from_ne_bytes)
    }

    fn read_u32(&self, offset: usize) -> Result<u32> {
        read_array::<4>(self, offset).map(u32::from_ne_bytes)
    }

    fn read_u64(&self, offset: usize) -> Result<u64> {
        read_array::<8>(self, offset).map(u64::from_ne_bytes)
    }
}

fn read_array<const N: usize>(data: &[u8], offset: usize) -> Result<[u8; N]> {
    offset
        .checked_add(N)
        .and_then(|end| data.get(offset..end))
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or(ElfError::Truncated { offset: offset as u64, needed: N })
}

/// Convert a file-supplied 64-bit offset into an index into the image.
pub fn to_offset(value: u64) -> Result<usize> {
    usize::try_from(value).map_err(|_| ElfError::AddressOverflow)
}

/// Read a null-terminated string from data
pub fn read_cstring(data: &[u8], offset: usize) -> Result<&str> {
    let slice = data.get(offset..).ok_or(ElfError::Truncated {
        offset: offset as u64,
        needed: 1,
    })?;
    let end = memchr::memchr(0, slice).unwrap_or(slice.len());

    std::str::from_utf8(&slice[..end]).map_err(|_| ElfError::InvalidString)
}

/// Check if a range is within bounds
pub fn check_bounds(offset: usize, size: usize, data_len: usize) -> Result<()> {
    match offset.checked_add(size) {
        Some(end) if end <= data_len => Ok(()),
        _ => Err(ElfError::Truncated {
            offset: offset as u64,
            needed: size,
        }),
    }
}
