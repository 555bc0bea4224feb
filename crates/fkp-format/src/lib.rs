//! 4klang patch (`.4kp`) and instrument (`.4ki`) container reader.
//!
//! This crate decodes the fixed-layout binary containers written by the
//! 4klang synthesizer engine into structured, semantically typed documents.
//! Decoding is one-directional: containers are read, never written back.
//!
//! # Layout model
//!
//! A container is a fixed-shape aggregate: a 4-byte version tag, null-padded
//! name fields, and arrays of fixed-stride unit slots. Each slot carries a
//! one-byte unit-type discriminant and a type-dependent payload padded to a
//! constant 16-byte stride, so slot arrays are randomly accessible without
//! scanning. Two unit types are narrower in older format revisions; the
//! layout table in effect is resolved once per document from the version
//! tag.
//!
//! # Errors
//!
//! - An unrecognized version tag fails the whole decode
//!   ([`FkpError::UnsupportedVersion`]); no partial document is returned.
//! - A buffer shorter than a required field fails with
//!   [`FkpError::TruncatedInput`] carrying the byte offset.
//! - An unrecognized unit-type discriminant is not fatal: the slot decodes
//!   to [`UnitSlot::Unknown`] with its payload retained verbatim.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use fkp_format::read_patch;
//!
//! let patch = read_patch(Path::new("song.4kp")).unwrap();
//! println!("revision {}, polyphony {}", patch.version, patch.polyphony);
//! for (index, name) in patch.instrument_names.iter().enumerate() {
//!     let used = patch
//!         .instrument_chain(index)
//!         .iter()
//!         .filter(|slot| !slot.is_empty())
//!         .count();
//!     println!("{name}: {used} units");
//! }
//! ```

mod cursor;
mod error;
mod layout;
mod reader;
mod types;
mod version;

pub use cursor::Cursor;
pub use error::{FkpError, Result};
pub use layout::{DelayLayout, LayoutTable, OscillatorLayout, decode_slot};
pub use reader::{
    FkpReader, parse_document, parse_instrument, parse_patch, read_document, read_instrument,
    read_patch,
};
pub use types::{
    Accumulator, Arithmetic, ArithmeticFlags, Delay, Distortion, Envelope, Filter, FilterFlags,
    FkpDocument, Glitch, INSTRUMENT_DOCUMENT_LEN, InstrumentDocument, Load, MAX_INSTRUMENTS,
    MAX_UNITS, ModuleCount, NAME_LEN, Oscillator, OscillatorFlags, Out, PATCH_DOCUMENT_LEN,
    PAYLOAD_LEN, Pan, PatchDocument, Store, UNIT_STRIDE, UnitSlot, UnitType,
};
pub use version::{TAG_LEN, VersionTag};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
