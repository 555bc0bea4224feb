//! Error types for 4klang container decoding.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when decoding a 4klang container.
#[derive(Debug, Error)]
pub enum FkpError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Buffer ended before a required field.
    #[error("truncated input at offset {offset}: needed {needed} bytes, {available} available")]
    TruncatedInput {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// Version tag outside the known set.
    #[error("unsupported version tag \"{}\"", .tag.escape_ascii())]
    UnsupportedVersion { tag: [u8; 4] },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for container decoding.
pub type Result<T> = std::result::Result<T, FkpError>;

impl FkpError {
    /// Create a TruncatedInput error.
    pub fn truncated(offset: usize, needed: usize, available: usize) -> Self {
        Self::TruncatedInput {
            offset,
            needed,
            available,
        }
    }

    /// Create an UnsupportedVersion error.
    pub fn unsupported_version(tag: [u8; 4]) -> Self {
        Self::UnsupportedVersion { tag }
    }
}
