//! Semantic conversion of decoded 4klang documents into the target
//! vocabulary.
//!
//! This crate is the second half of the transpiler: `fkp-format` decodes a
//! binary container into typed documents, and this crate re-expresses those
//! documents as a [`fkp_model::ConvertedPatch`]. Conversion is pure: no
//! I/O, no shared state, deterministic output for identical input.
//!
//! All flag-priority and numeric-remapping policy lives here, in
//! [`units`]-level precedence constants and one conversion function per
//! unit type. The assembler composes them over the instrument x slot grid
//! and fails fast on the first unit the target vocabulary cannot express.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use fkp_convert::{ConvertOptions, convert_patch};
//! use fkp_format::read_patch;
//!
//! let doc = read_patch(Path::new("song.4kp")).unwrap();
//! let patch = convert_patch(&doc, &ConvertOptions::default()).unwrap();
//! println!("{} instruments", patch.num_instruments());
//! ```

mod assemble;
mod error;
mod options;
pub mod units;

pub use assemble::{convert_instrument, convert_patch};
pub use error::{ConvertError, Result};
pub use options::{ConvertOptions, VoiceAllocation};
pub use units::{convert_slot, has_converter};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
