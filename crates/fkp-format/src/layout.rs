//! Unit slot decoding.
//!
//! Every slot occupies 16 bytes on disk regardless of which unit type it
//! holds:
//!
//! | Offset | Length | Field        | Description                       |
//! |--------|--------|--------------|-----------------------------------|
//! | 0      | 1      | discriminant | Unit type, 0x0-0xD                |
//! | 1      | 15     | payload      | Type-dependent fields, zero-padded|
//!
//! The dispatcher consumes the full stride for every slot: fields narrower
//! than the payload span leave trailing bytes unread, and those bytes are
//! skipped rather than merged into the next slot. An unregistered
//! discriminant decodes to [`UnitSlot::Unknown`] with the payload kept
//! verbatim; it never fails the surrounding document.
//!
//! Two unit types changed width across format revisions, so the field
//! layout in effect is resolved once per document from the version tag and
//! passed in as a [`LayoutTable`].

use crate::cursor::Cursor;
use crate::error::Result;
use crate::types::{
    Accumulator, Arithmetic, ArithmeticFlags, Delay, Distortion, Envelope, Filter, FilterFlags,
    Glitch, Load, ModuleCount, Oscillator, OscillatorFlags, Out, PAYLOAD_LEN, Pan, Store,
    UnitSlot, UnitType,
};
use crate::version::VersionTag;

/// Oscillator slot layout revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OscillatorLayout {
    /// `4k10`/`4k11`: no gate byte between phase offset and color.
    Legacy,
    Current,
}

/// Delay slot layout revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelayLayout {
    /// `4k10`: no freq and depth bytes between damp and delay.
    Legacy,
    Current,
}

/// Per-document slot layout selection.
///
/// Resolved once from the document's version tag, never per slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutTable {
    pub oscillator: OscillatorLayout,
    pub delay: DelayLayout,
}

impl LayoutTable {
    /// The layout table in effect for a format revision.
    pub fn for_version(version: VersionTag) -> Self {
        Self {
            oscillator: match version {
                VersionTag::V10 | VersionTag::V11 => OscillatorLayout::Legacy,
                _ => OscillatorLayout::Current,
            },
            delay: match version {
                VersionTag::V10 => DelayLayout::Legacy,
                _ => DelayLayout::Current,
            },
        }
    }
}

/// Decode one unit slot, consuming exactly one 16-byte stride.
pub fn decode_slot(cursor: &mut Cursor<'_>, table: &LayoutTable) -> Result<UnitSlot> {
    let discriminant = cursor.read_u8()?;
    let payload = cursor.take(PAYLOAD_LEN)?;
    let mut fields = Cursor::at_offset(payload, cursor.position() - PAYLOAD_LEN);

    let slot = match UnitType::from_discriminant(discriminant) {
        Some(UnitType::None) => UnitSlot::Empty,
        Some(UnitType::Envelope) => UnitSlot::Envelope(Envelope {
            attack: fields.read_u8()?,
            decay: fields.read_u8()?,
            sustain: fields.read_u8()?,
            release: fields.read_u8()?,
            gain: fields.read_u8()?,
        }),
        Some(UnitType::Oscillator) => {
            let transpose = fields.read_u8()?;
            let detune = fields.read_u8()?;
            let phase_offset = fields.read_u8()?;
            let gate = match table.oscillator {
                OscillatorLayout::Current => fields.read_u8()?,
                OscillatorLayout::Legacy => 0,
            };
            UnitSlot::Oscillator(Oscillator {
                transpose,
                detune,
                phase_offset,
                gate,
                color: fields.read_u8()?,
                shape: fields.read_u8()?,
                gain: fields.read_u8()?,
                flags: OscillatorFlags::from_bits_retain(fields.read_u8()?),
            })
        }
        Some(UnitType::Filter) => UnitSlot::Filter(Filter {
            freq: fields.read_u8()?,
            res: fields.read_u8()?,
            flags: FilterFlags::from_bits_retain(fields.read_u8()?),
        }),
        Some(UnitType::Distortion) => UnitSlot::Distortion(Distortion {
            drive: fields.read_u8()?,
            snh_freq: fields.read_u8()?,
            stereo: fields.read_u8()?,
        }),
        Some(UnitType::Delay) => {
            let pregain = fields.read_u8()?;
            let dry = fields.read_u8()?;
            let feedback = fields.read_u8()?;
            let damp = fields.read_u8()?;
            let (freq, depth) = match table.delay {
                DelayLayout::Current => (fields.read_u8()?, fields.read_u8()?),
                DelayLayout::Legacy => (0, 0),
            };
            UnitSlot::Delay(Delay {
                pregain,
                dry,
                feedback,
                damp,
                freq,
                depth,
                delay: fields.read_u8()?,
                count: fields.read_u8()?,
                gui_delay: fields.read_u8()?,
                sync_type: fields.read_u8()?,
                left_reverb: fields.read_u8()?,
                reverb: fields.read_u8()?,
            })
        }
        Some(UnitType::Arithmetic) => UnitSlot::Arithmetic(Arithmetic {
            flags: ArithmeticFlags::from_bits_retain(fields.read_u8()?),
        }),
        Some(UnitType::Store) => UnitSlot::Store(Store {
            amount: fields.read_u8()?,
            mode: fields.read_u8()?,
            dest_stack: fields.read_u8()?,
            dest_unit: fields.read_u8()?,
            dest_slot: fields.read_u8()?,
            dest_id: fields.read_u8()?,
        }),
        Some(UnitType::Pan) => UnitSlot::Pan(Pan {
            panning: fields.read_u8()?,
        }),
        Some(UnitType::Out) => UnitSlot::Out(Out {
            gain: fields.read_u8()?,
            aux_send: fields.read_u8()?,
        }),
        Some(UnitType::Accumulator) => UnitSlot::Accumulator(Accumulator {
            flags: fields.read_u8()?,
        }),
        Some(UnitType::Load) => UnitSlot::Load(Load {
            value: fields.read_u8()?,
        }),
        Some(UnitType::Glitch) => UnitSlot::Glitch(Glitch {
            active: fields.read_u8()?,
            dry: fields.read_u8()?,
            dsize: fields.read_u8()?,
            dpitch: fields.read_u8()?,
            delay: fields.read_u8()?,
            gui_delay: fields.read_u8()?,
        }),
        Some(UnitType::ModuleCount) => UnitSlot::ModuleCount(ModuleCount {
            placeholder: fields.read_u8()?,
        }),
        None => {
            let mut raw = [0u8; PAYLOAD_LEN];
            raw.copy_from_slice(payload);
            UnitSlot::Unknown {
                discriminant,
                payload: raw,
            }
        }
    };

    Ok(slot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UNIT_STRIDE;

    const CURRENT: LayoutTable = LayoutTable {
        oscillator: OscillatorLayout::Current,
        delay: DelayLayout::Current,
    };

    fn slot_bytes(discriminant: u8, payload: &[u8]) -> Vec<u8> {
        let mut bytes = vec![discriminant];
        bytes.extend_from_slice(payload);
        bytes.resize(UNIT_STRIDE, 0);
        bytes
    }

    #[test]
    fn test_decode_envelope() {
        let bytes = slot_bytes(0x1, &[10, 20, 30, 40, 50]);
        let mut cursor = Cursor::new(&bytes);
        let slot = decode_slot(&mut cursor, &CURRENT).unwrap();
        assert_eq!(
            slot,
            UnitSlot::Envelope(Envelope {
                attack: 10,
                decay: 20,
                sustain: 30,
                release: 40,
                gain: 50,
            })
        );
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn test_padding_consumed_not_merged() {
        // A pan slot followed by an out slot: the pan payload is 1 byte
        // plus 14 padding bytes, which must not bleed into the out slot.
        let mut bytes = slot_bytes(0x8, &[64]);
        bytes.extend(slot_bytes(0x9, &[100, 5]));
        let mut cursor = Cursor::new(&bytes);
        let table = CURRENT;

        let pan = decode_slot(&mut cursor, &table).unwrap();
        assert_eq!(pan, UnitSlot::Pan(Pan { panning: 64 }));
        assert_eq!(cursor.position(), UNIT_STRIDE);

        let out = decode_slot(&mut cursor, &table).unwrap();
        assert_eq!(
            out,
            UnitSlot::Out(Out {
                gain: 100,
                aux_send: 5,
            })
        );
    }

    #[test]
    fn test_unknown_discriminant_is_not_fatal() {
        let bytes = slot_bytes(0xEE, &[1, 2, 3]);
        let mut cursor = Cursor::new(&bytes);
        let slot = decode_slot(&mut cursor, &CURRENT).unwrap();
        let mut payload = [0u8; PAYLOAD_LEN];
        payload[..3].copy_from_slice(&[1, 2, 3]);
        assert_eq!(
            slot,
            UnitSlot::Unknown {
                discriminant: 0xEE,
                payload,
            }
        );
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn test_oscillator_layout_per_version() {
        // transpose, detune, phase, gate, color, shape, gain, flags
        let bytes = slot_bytes(0x2, &[60, 64, 0, 1, 2, 3, 4, 0x41]);
        let mut cursor = Cursor::new(&bytes);
        let table = LayoutTable::for_version(VersionTag::V14);
        let UnitSlot::Oscillator(osc) = decode_slot(&mut cursor, &table).unwrap() else {
            panic!("expected oscillator");
        };
        assert_eq!(osc.gate, 1);
        assert_eq!(osc.color, 2);
        assert_eq!(osc.flags.bits(), 0x41);

        // Same bytes under the legacy layout: no gate byte, fields shift.
        let mut cursor = Cursor::new(&bytes);
        let table = LayoutTable::for_version(VersionTag::V11);
        let UnitSlot::Oscillator(osc) = decode_slot(&mut cursor, &table).unwrap() else {
            panic!("expected oscillator");
        };
        assert_eq!(osc.gate, 0);
        assert_eq!(osc.color, 1);
        assert_eq!(osc.shape, 2);
        assert_eq!(osc.gain, 3);
        assert_eq!(osc.flags.bits(), 4);
    }

    #[test]
    fn test_delay_layout_per_version() {
        let bytes = slot_bytes(0x5, &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
        let mut cursor = Cursor::new(&bytes);
        let table = LayoutTable::for_version(VersionTag::V10);
        let UnitSlot::Delay(dll) = decode_slot(&mut cursor, &table).unwrap() else {
            panic!("expected delay");
        };
        assert_eq!(dll.damp, 4);
        assert_eq!((dll.freq, dll.depth), (0, 0));
        assert_eq!(dll.delay, 5);
        assert_eq!(dll.reverb, 10);
    }

    #[test]
    fn test_layout_table_selection() {
        assert_eq!(
            LayoutTable::for_version(VersionTag::V10),
            LayoutTable {
                oscillator: OscillatorLayout::Legacy,
                delay: DelayLayout::Legacy,
            }
        );
        assert_eq!(
            LayoutTable::for_version(VersionTag::V11),
            LayoutTable {
                oscillator: OscillatorLayout::Legacy,
                delay: DelayLayout::Current,
            }
        );
        for version in [VersionTag::V12, VersionTag::V13, VersionTag::V14] {
            assert_eq!(LayoutTable::for_version(version), CURRENT);
        }
    }
}
