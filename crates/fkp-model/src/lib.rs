//! Target-vocabulary patch model.
//!
//! The output side of the transpiler: a schema-neutral, format-agnostic
//! representation of a converted patch. Everything here is built from
//! primitives, strings, ordered sequences, and ordered mappings, so the
//! structure can be handed to any serializer directly.
//!
//! Instrument and unit order always mirrors the source document; instruments
//! with no units are omitted rather than emitted empty.

mod patch;
mod unit;

pub use patch::{ConvertedInstrument, ConvertedPatch};
pub use unit::ConvertedUnit;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
