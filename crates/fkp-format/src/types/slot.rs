//! Unit slot types.
//!
//! An instrument's signal chain is stored as a fixed-length array of
//! fixed-stride slots. Each slot is 16 bytes: a one-byte unit-type
//! discriminant followed by 15 payload bytes whose interpretation depends
//! entirely on the discriminant. Payloads narrower than 15 bytes are
//! right-padded on disk; the padding carries no meaning.

use serde::Serialize;

use super::flags::{ArithmeticFlags, FilterFlags, OscillatorFlags};

/// Total width of one unit slot in bytes.
pub const UNIT_STRIDE: usize = 16;

/// Payload bytes following the discriminant.
pub const PAYLOAD_LEN: usize = UNIT_STRIDE - 1;

/// Unit-type discriminant.
///
/// The discriminant space is closed: every value 0x0-0xD has a defined
/// meaning, and nothing else is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UnitType {
    /// 0x0 — empty slot marker.
    None,
    /// 0x1 — ADSR envelope.
    Envelope,
    /// 0x2 — oscillator.
    Oscillator,
    /// 0x3 — filter.
    Filter,
    /// 0x4 — distortion / sample-and-hold.
    Distortion,
    /// 0x5 — delay line.
    Delay,
    /// 0x6 — stack arithmetic.
    Arithmetic,
    /// 0x7 — stack store.
    Store,
    /// 0x8 — panner.
    Pan,
    /// 0x9 — output.
    Out,
    /// 0xA — accumulator.
    Accumulator,
    /// 0xB — value loader.
    Load,
    /// 0xC — glitch effect.
    Glitch,
    /// 0xD — reserved module-count marker.
    ModuleCount,
}

impl UnitType {
    /// All discriminants in on-disk order.
    pub const ALL: [UnitType; 14] = [
        UnitType::None,
        UnitType::Envelope,
        UnitType::Oscillator,
        UnitType::Filter,
        UnitType::Distortion,
        UnitType::Delay,
        UnitType::Arithmetic,
        UnitType::Store,
        UnitType::Pan,
        UnitType::Out,
        UnitType::Accumulator,
        UnitType::Load,
        UnitType::Glitch,
        UnitType::ModuleCount,
    ];

    /// Look up a unit type from its discriminant byte.
    pub fn from_discriminant(byte: u8) -> Option<Self> {
        match byte {
            0x0 => Some(UnitType::None),
            0x1 => Some(UnitType::Envelope),
            0x2 => Some(UnitType::Oscillator),
            0x3 => Some(UnitType::Filter),
            0x4 => Some(UnitType::Distortion),
            0x5 => Some(UnitType::Delay),
            0x6 => Some(UnitType::Arithmetic),
            0x7 => Some(UnitType::Store),
            0x8 => Some(UnitType::Pan),
            0x9 => Some(UnitType::Out),
            0xA => Some(UnitType::Accumulator),
            0xB => Some(UnitType::Load),
            0xC => Some(UnitType::Glitch),
            0xD => Some(UnitType::ModuleCount),
            _ => None,
        }
    }

    /// The discriminant byte for this unit type.
    pub fn discriminant(self) -> u8 {
        match self {
            UnitType::None => 0x0,
            UnitType::Envelope => 0x1,
            UnitType::Oscillator => 0x2,
            UnitType::Filter => 0x3,
            UnitType::Distortion => 0x4,
            UnitType::Delay => 0x5,
            UnitType::Arithmetic => 0x6,
            UnitType::Store => 0x7,
            UnitType::Pan => 0x8,
            UnitType::Out => 0x9,
            UnitType::Accumulator => 0xA,
            UnitType::Load => 0xB,
            UnitType::Glitch => 0xC,
            UnitType::ModuleCount => 0xD,
        }
    }

    /// The engine's mnemonic for this unit type.
    pub fn mnemonic(self) -> &'static str {
        match self {
            UnitType::None => "NONE",
            UnitType::Envelope => "ENV",
            UnitType::Oscillator => "VCO",
            UnitType::Filter => "VCF",
            UnitType::Distortion => "DST",
            UnitType::Delay => "DLL",
            UnitType::Arithmetic => "FOP",
            UnitType::Store => "FST",
            UnitType::Pan => "PAN",
            UnitType::Out => "OUT",
            UnitType::Accumulator => "ACC",
            UnitType::Load => "FLD",
            UnitType::Glitch => "GLITCH",
            UnitType::ModuleCount => "NUM_MODULES",
        }
    }

    /// The target-vocabulary name for this unit type.
    pub fn name(self) -> &'static str {
        match self {
            UnitType::None => "none",
            UnitType::Envelope => "envelope",
            UnitType::Oscillator => "oscillator",
            UnitType::Filter => "filter",
            UnitType::Distortion => "distort",
            UnitType::Delay => "delay",
            UnitType::Arithmetic => "arithmetic",
            UnitType::Store => "store",
            UnitType::Pan => "pan",
            UnitType::Out => "out",
            UnitType::Accumulator => "accumulate",
            UnitType::Load => "load",
            UnitType::Glitch => "glitch",
            UnitType::ModuleCount => "modules",
        }
    }
}

/// Envelope payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Envelope {
    pub attack: u8,
    pub decay: u8,
    pub sustain: u8,
    pub release: u8,
    pub gain: u8,
}

/// Oscillator payload.
///
/// Revisions `4k10` and `4k11` store this without the gate byte; the reader
/// fills `gate` with 0 for those documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Oscillator {
    pub transpose: u8,
    pub detune: u8,
    pub phase_offset: u8,
    pub gate: u8,
    pub color: u8,
    pub shape: u8,
    pub gain: u8,
    pub flags: OscillatorFlags,
}

/// Filter payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Filter {
    pub freq: u8,
    pub res: u8,
    pub flags: FilterFlags,
}

/// Distortion payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Distortion {
    pub drive: u8,
    pub snh_freq: u8,
    pub stereo: u8,
}

/// Delay-line payload.
///
/// Revision `4k10` stores this without the freq and depth bytes; the reader
/// fills both with 0 for those documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Delay {
    pub pregain: u8,
    pub dry: u8,
    pub feedback: u8,
    pub damp: u8,
    pub freq: u8,
    pub depth: u8,
    pub delay: u8,
    pub count: u8,
    pub gui_delay: u8,
    pub sync_type: u8,
    pub left_reverb: u8,
    pub reverb: u8,
}

/// Stack-arithmetic payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Arithmetic {
    pub flags: ArithmeticFlags,
}

/// Stack-store payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Store {
    pub amount: u8,
    pub mode: u8,
    pub dest_stack: u8,
    pub dest_unit: u8,
    pub dest_slot: u8,
    pub dest_id: u8,
}

/// Panner payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pan {
    pub panning: u8,
}

/// Output payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Out {
    pub gain: u8,
    pub aux_send: u8,
}

/// Accumulator payload. The flags byte selects main (0x0) or aux (0x8) bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Accumulator {
    pub flags: u8,
}

/// Value-loader payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Load {
    pub value: u8,
}

/// Glitch-effect payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Glitch {
    pub active: u8,
    pub dry: u8,
    pub dsize: u8,
    pub dpitch: u8,
    pub delay: u8,
    pub gui_delay: u8,
}

/// Module-count marker payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModuleCount {
    pub placeholder: u8,
}

/// One decoded unit slot.
///
/// The variant is selected by the slot's discriminant byte. Slots whose
/// discriminant falls outside the closed unit-type set decode to
/// [`UnitSlot::Unknown`] with the payload retained verbatim; this is never a
/// document-level failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UnitSlot {
    Empty,
    Envelope(Envelope),
    Oscillator(Oscillator),
    Filter(Filter),
    Distortion(Distortion),
    Delay(Delay),
    Arithmetic(Arithmetic),
    Store(Store),
    Pan(Pan),
    Out(Out),
    Accumulator(Accumulator),
    Load(Load),
    Glitch(Glitch),
    ModuleCount(ModuleCount),
    Unknown {
        discriminant: u8,
        payload: [u8; PAYLOAD_LEN],
    },
}

impl UnitSlot {
    /// The unit type occupying this slot, or `None` for an unrecognized
    /// discriminant.
    pub fn unit_type(&self) -> Option<UnitType> {
        match self {
            UnitSlot::Empty => Some(UnitType::None),
            UnitSlot::Envelope(_) => Some(UnitType::Envelope),
            UnitSlot::Oscillator(_) => Some(UnitType::Oscillator),
            UnitSlot::Filter(_) => Some(UnitType::Filter),
            UnitSlot::Distortion(_) => Some(UnitType::Distortion),
            UnitSlot::Delay(_) => Some(UnitType::Delay),
            UnitSlot::Arithmetic(_) => Some(UnitType::Arithmetic),
            UnitSlot::Store(_) => Some(UnitType::Store),
            UnitSlot::Pan(_) => Some(UnitType::Pan),
            UnitSlot::Out(_) => Some(UnitType::Out),
            UnitSlot::Accumulator(_) => Some(UnitType::Accumulator),
            UnitSlot::Load(_) => Some(UnitType::Load),
            UnitSlot::Glitch(_) => Some(UnitType::Glitch),
            UnitSlot::ModuleCount(_) => Some(UnitType::ModuleCount),
            UnitSlot::Unknown { .. } => None,
        }
    }

    /// True for the empty slot marker.
    pub fn is_empty(&self) -> bool {
        matches!(self, UnitSlot::Empty)
    }
}
