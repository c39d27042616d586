//! Read-only memory mapping of the file being analyzed.
//!
//! [`MappedRegion`] acquires the image that the ELF reader borrows. The
//! mapping is released when the region is dropped, so every handle built
//! from [`MappedRegion::as_bytes`] must be gone by then; the borrow checker
//! enforces this.

pub mod error;

use crate::config::IoConfig;
use crate::io::error::{IoError, Result};
use memmap2::Mmap;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A file mapped read-only into memory.
pub struct MappedRegion {
    path: PathBuf,
    // None when the file size is zero; memmap cannot map empty files.
    mmap: Option<Mmap>,
}

impl MappedRegion {
    /// Open and map a file.
    ///
    /// Fails if the file is larger than `limits.max_file_size`.
    pub fn open<P: AsRef<Path>>(path: P, limits: &IoConfig) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let file_size = file.metadata()?.len();

        debug!(
            path = %path.display(),
            size = file_size,
            max_file_size = limits.max_file_size,
            "Mapping file"
        );

        if file_size > limits.max_file_size {
            warn!(
                path = %path.display(),
                size = file_size,
                limit = limits.max_file_size,
                "File is too large"
            );
            return Err(IoError::FileTooLarge {
                limit: limits.max_file_size,
                found: file_size,
            });
        }

        let mmap = if file_size == 0 {
            None
        } else {
            // Safety: read-only private mapping of a regular file; the bytes are
            // only ever read through shared slices.
            Some(unsafe { Mmap::map(&file)? })
        };

        Ok(Self {
            path: path.to_path_buf(),
            mmap,
        })
    }

    /// The mapped bytes (empty for an empty file).
    pub fn as_bytes(&self) -> &[u8] {
        self.mmap.as_deref().unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
