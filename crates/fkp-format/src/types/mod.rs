//! Core types for 4klang container handling.

mod document;
mod flags;
mod slot;

pub use document::{
    FkpDocument, INSTRUMENT_DOCUMENT_LEN, InstrumentDocument, MAX_INSTRUMENTS, MAX_UNITS,
    NAME_LEN, PATCH_DOCUMENT_LEN, PatchDocument,
};
pub use flags::{ArithmeticFlags, FilterFlags, OscillatorFlags};
pub use slot::{
    Accumulator, Arithmetic, Delay, Distortion, Envelope, Filter, Glitch, Load, ModuleCount,
    Oscillator, Out, PAYLOAD_LEN, Pan, Store, UNIT_STRIDE, UnitSlot, UnitType,
};
