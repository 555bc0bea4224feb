//! Bit-flag unions carried in unit payloads.
//!
//! These fields are sets, not single enumerated values: several bits may be
//! set at once, and some named values (filter band-stop and all-pass) are
//! fixed multi-bit combinations. How simultaneously-set flags resolve to a
//! single semantic value is conversion policy, decided downstream.

use bitflags::bitflags;
use serde::{Serialize, Serializer};

bitflags! {
    /// Oscillator behavior flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct OscillatorFlags: u8 {
        const SINE   = 0x01;
        const TRISAW = 0x02;
        const PULSE  = 0x04;
        const NOISE  = 0x08;
        const LFO    = 0x10;
        const GATE   = 0x20;
        const STEREO = 0x40;
    }
}

bitflags! {
    /// Filter response flags.
    ///
    /// BANDSTOP and ALLPASS are multi-bit combinations of the single-bit
    /// responses, exactly as stored on disk.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FilterFlags: u8 {
        const LOWPASS  = 0x01;
        const HIGHPASS = 0x02;
        const BANDSTOP = 0x03;
        const BANDPASS = 0x04;
        const ALLPASS  = 0x07;
        const PEAK     = 0x08;
        const STEREO   = 0x10;
    }
}

bitflags! {
    /// Stack arithmetic operation flags.
    ///
    /// The engine stores these as small values sharing bits, so membership
    /// tests overlap; resolution order is conversion policy.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ArithmeticFlags: u8 {
        const POP      = 0x01;
        const ADDP     = 0x02;
        const MULP     = 0x03;
        const PUSH     = 0x04;
        const XCH      = 0x05;
        const ADD      = 0x06;
        const MUL      = 0x07;
        const ADDP2    = 0x08;
        const LOADNOTE = 0x09;
        const MULP2    = 0x0A;
    }
}

macro_rules! serialize_as_bits {
    ($($flags:ty),+) => {
        $(impl Serialize for $flags {
            fn serialize<S: Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_u8(self.bits())
            }
        })+
    };
}

serialize_as_bits!(OscillatorFlags, FilterFlags, ArithmeticFlags);
