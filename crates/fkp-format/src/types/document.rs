//! Decoded document types.
//!
//! Two document shapes exist: a single-instrument document (`.4ki`) and a
//! multi-instrument patch document (`.4kp`). Both are immutable value
//! objects: constructed once by the reader, consumed read-only.

use serde::Serialize;

use super::slot::{UNIT_STRIDE, UnitSlot};
use crate::version::{TAG_LEN, VersionTag};

/// Number of instruments in a patch document.
pub const MAX_INSTRUMENTS: usize = 16;

/// Number of unit slots per instrument or global chain.
pub const MAX_UNITS: usize = 64;

/// Length of a name field in bytes.
pub const NAME_LEN: usize = 64;

/// On-disk size of a single-instrument document.
pub const INSTRUMENT_DOCUMENT_LEN: usize = TAG_LEN + NAME_LEN + MAX_UNITS * UNIT_STRIDE;

/// On-disk size of a patch document.
pub const PATCH_DOCUMENT_LEN: usize = TAG_LEN
    + 4
    + MAX_INSTRUMENTS * NAME_LEN
    + MAX_INSTRUMENTS * MAX_UNITS * UNIT_STRIDE
    + MAX_UNITS * UNIT_STRIDE;

/// A single instrument's full unit chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstrumentDocument {
    /// Format revision that wrote the document.
    pub version: VersionTag,
    /// Instrument name, truncated at the first null byte.
    pub name: String,
    /// Unit chain, always [`MAX_UNITS`] slots.
    pub units: Vec<UnitSlot>,
}

/// A full multi-instrument patch plus the shared global unit chain.
///
/// `instrument_units` is a 2-D grid (instrument index x slot index) stored
/// flat in instrument-major order; use [`PatchDocument::unit_at`] or
/// [`PatchDocument::instrument_chain`] instead of indexing it directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatchDocument {
    /// Format revision that wrote the document.
    pub version: VersionTag,
    /// Engine polyphony setting.
    pub polyphony: u32,
    /// Instrument names, always [`MAX_INSTRUMENTS`] entries.
    pub instrument_names: Vec<String>,
    /// Flat instrument x slot grid, `MAX_INSTRUMENTS * MAX_UNITS` slots.
    pub instrument_units: Vec<UnitSlot>,
    /// Cross-instrument global unit chain, always [`MAX_UNITS`] slots.
    pub global_units: Vec<UnitSlot>,
}

impl PatchDocument {
    /// The slot at `(instrument, slot)` in the grid.
    pub fn unit_at(&self, instrument: usize, slot: usize) -> &UnitSlot {
        &self.instrument_units[instrument * MAX_UNITS + slot]
    }

    /// One instrument's full unit chain.
    pub fn instrument_chain(&self, instrument: usize) -> &[UnitSlot] {
        &self.instrument_units[instrument * MAX_UNITS..(instrument + 1) * MAX_UNITS]
    }

    /// One instrument's name.
    pub fn instrument_name(&self, instrument: usize) -> &str {
        &self.instrument_names[instrument]
    }
}

/// Either document shape, as detected by the reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FkpDocument {
    Patch(PatchDocument),
    Instrument(InstrumentDocument),
}

impl FkpDocument {
    /// Format revision that wrote the document.
    pub fn version(&self) -> VersionTag {
        match self {
            FkpDocument::Patch(doc) => doc.version,
            FkpDocument::Instrument(doc) => doc.version,
        }
    }
}
