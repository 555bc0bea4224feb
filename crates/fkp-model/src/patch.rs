//! Converted instrument and patch records.

use serde::Serialize;

use crate::unit::ConvertedUnit;

/// One converted instrument: a voice count plus its unit chain in source
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConvertedInstrument {
    #[serde(rename = "numvoices")]
    pub num_voices: u32,
    pub units: Vec<ConvertedUnit>,
}

/// The final converted patch. Instruments appear in source order; empty
/// instruments are never present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConvertedPatch {
    pub patch: Vec<ConvertedInstrument>,
}

impl ConvertedPatch {
    /// A patch with no instruments.
    pub fn empty() -> Self {
        Self { patch: Vec::new() }
    }

    /// Number of converted instruments.
    pub fn num_instruments(&self) -> usize {
        self.patch.len()
    }

    /// Total number of converted units across all instruments.
    pub fn num_units(&self) -> usize {
        self.patch.iter().map(|i| i.units.len()).sum()
    }
}
