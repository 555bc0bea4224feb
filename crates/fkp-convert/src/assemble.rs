//! Patch assembly.
//!
//! Walks the decoded instrument x slot grid in declaration order, converts
//! every non-empty slot, and groups the results by instrument. Instruments
//! with no converted units are omitted from the output. The first
//! unconvertible unit aborts the whole assembly: a partially converted
//! patch is worse than no output.

use tracing::{debug, warn};

use fkp_format::{InstrumentDocument, MAX_INSTRUMENTS, PatchDocument, UnitSlot};
use fkp_model::{ConvertedInstrument, ConvertedPatch, ConvertedUnit};

use crate::error::{ConvertError, Result};
use crate::options::ConvertOptions;
use crate::units::{UnitError, convert_slot};

impl UnitError {
    /// Attach instrument and slot location context.
    fn at(self, instrument: usize, slot: usize) -> ConvertError {
        match self {
            UnitError::NotImplemented { unit } => ConvertError::NotImplemented {
                unit: unit.name(),
                instrument,
                slot,
            },
            UnitError::UnmappedOperation { flags } => ConvertError::UnmappedOperation {
                flags: flags.bits(),
                instrument,
                slot,
            },
        }
    }
}

/// Convert a decoded patch document into the target vocabulary.
///
/// Global units are decoded by the reader but intentionally not folded into
/// the per-instrument output here.
pub fn convert_patch(doc: &PatchDocument, options: &ConvertOptions) -> Result<ConvertedPatch> {
    let num_voices = options.num_voices(doc.polyphony);
    let mut instruments = Vec::new();

    for instrument in 0..MAX_INSTRUMENTS {
        let units = convert_chain(doc.instrument_chain(instrument), instrument)?;
        if units.is_empty() {
            debug!(instrument, "instrument has no units, omitted");
            continue;
        }
        debug!(
            instrument,
            name = doc.instrument_name(instrument),
            units = units.len(),
            "converted instrument"
        );
        instruments.push(ConvertedInstrument { num_voices, units });
    }

    Ok(ConvertedPatch { patch: instruments })
}

/// Convert a decoded single-instrument document into a one-instrument patch.
pub fn convert_instrument(
    doc: &InstrumentDocument,
    options: &ConvertOptions,
) -> Result<ConvertedPatch> {
    let units = convert_chain(&doc.units, 0)?;
    if units.is_empty() {
        return Ok(ConvertedPatch::empty());
    }
    Ok(ConvertedPatch {
        patch: vec![ConvertedInstrument {
            // A single-instrument document carries no polyphony field.
            num_voices: options.num_voices(1),
            units,
        }],
    })
}

/// Convert one instrument's slot chain in slot order.
fn convert_chain(chain: &[UnitSlot], instrument: usize) -> Result<Vec<ConvertedUnit>> {
    let mut units = Vec::new();
    for (slot_index, slot) in chain.iter().enumerate() {
        if let UnitSlot::Unknown { discriminant, .. } = slot {
            warn!(
                instrument,
                slot = slot_index,
                discriminant,
                "skipping slot with unrecognized discriminant"
            );
            continue;
        }
        match convert_slot(slot) {
            Ok(Some(unit)) => units.push(unit),
            Ok(None) => {}
            Err(err) => return Err(err.at(instrument, slot_index)),
        }
    }
    Ok(units)
}
