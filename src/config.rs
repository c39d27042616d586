//! Configuration for the dumper.
//!
//! Every section has sensible defaults; a JSON file only needs to name the
//! fields it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DumpError, Result};
use crate::vtable::VTABLE_MARKER;

/// Master configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DumpConfig {
    /// Region acquisition limits.
    pub io: IoConfig,
    /// Vtable selection and reporting.
    pub vtable: VTableConfig,
    /// Log output.
    pub logging: LoggingConfig,
}

impl DumpConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| DumpError::Config(e.to_string()))
    }

    /// Read a JSON configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

/// Region acquisition limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IoConfig {
    /// Largest file that will be mapped, in bytes.
    pub max_file_size: u64,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            max_file_size: 1024 * 1024 * 1024, // 1GB
        }
    }
}

/// Vtable selection and reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VTableConfig {
    /// Substring identifying vtable symbols.
    pub marker: String,
    /// Attach demangled names to JSON reports.
    pub demangle: bool,
}

impl Default for VTableConfig {
    fn default() -> Self {
        Self {
            marker: VTABLE_MARKER.to_string(),
            demangle: false,
        }
    }
}

/// Log output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Emit JSON lines instead of human-readable text.
    pub json: bool,
    /// Filter used when `RUST_LOG` is unset.
    pub default_filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            json: false,
            default_filter: "warn".to_string(),
        }
    }
}
