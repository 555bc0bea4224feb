//! Error types for semantic conversion.
//!
//! Conversion never fails on a structurally valid payload of a supported
//! unit type; it fails only when a unit carries information the target
//! vocabulary cannot express. Such units are flagged loudly instead of
//! silently dropped, so downstream consumers can detect information loss.

use thiserror::Error;

/// Errors that can occur when converting a decoded document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// Unit type recognized by the decoder but lacking a defined converter.
    #[error("cannot convert {unit} unit at instrument {instrument}, slot {slot}: no mapping defined")]
    NotImplemented {
        unit: &'static str,
        instrument: usize,
        slot: usize,
    },

    /// Arithmetic unit whose flags match no supported operation.
    #[error(
        "cannot convert arithmetic unit at instrument {instrument}, slot {slot}: \
         flags {flags:#04x} match no supported operation"
    )]
    UnmappedOperation {
        flags: u8,
        instrument: usize,
        slot: usize,
    },
}

/// Result type alias for conversion.
pub type Result<T> = std::result::Result<T, ConvertError>;
