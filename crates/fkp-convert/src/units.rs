//! Per-unit semantic converters.
//!
//! One pure mapping function per unit type, translating decoded payload
//! fields and bit-flag sets into named parameters in the target vocabulary.
//! No shared state, no I/O.
//!
//! Several source fields are flag sets where more than one bit may be set
//! at once; the resulting semantic value is chosen by an explicit ordered
//! precedence list, first match wins. The precedence lists are named
//! constants below rather than implicit enumeration order.

use fkp_format::{
    Arithmetic, ArithmeticFlags, Delay, Distortion, Envelope, Filter, FilterFlags, Oscillator,
    OscillatorFlags, Out, Pan, UnitSlot, UnitType,
};
use fkp_model::ConvertedUnit;

/// Waveform selection order for oscillator conversion; first match wins.
///
/// The gate flag has no waveform of its own upstream; it selects the
/// engine's gate-driven sample mode, which maps to waveform index 3.
pub const OSCILLATOR_SHAPE_PRECEDENCE: [(OscillatorFlags, u32); 4] = [
    (OscillatorFlags::SINE, 0),
    (OscillatorFlags::TRISAW, 1),
    (OscillatorFlags::PULSE, 2),
    (OscillatorFlags::GATE, 3),
];

/// A filter response expressed in the target vocabulary's three
/// single-response fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterResponse {
    pub lowpass: u32,
    pub bandpass: u32,
    pub highpass: u32,
}

/// Response selection order for filter conversion; first match wins.
///
/// Band-stop and all-pass are not single-bit selections: each expands to a
/// fixed combination of the three response fields.
pub const FILTER_RESPONSE_PRECEDENCE: [(FilterFlags, FilterResponse); 5] = [
    (
        FilterFlags::LOWPASS,
        FilterResponse {
            lowpass: 1,
            bandpass: 0,
            highpass: 0,
        },
    ),
    (
        FilterFlags::HIGHPASS,
        FilterResponse {
            lowpass: 0,
            bandpass: 0,
            highpass: 1,
        },
    ),
    (
        FilterFlags::BANDPASS,
        FilterResponse {
            lowpass: 0,
            bandpass: 1,
            highpass: 0,
        },
    ),
    (
        FilterFlags::BANDSTOP,
        FilterResponse {
            lowpass: 1,
            bandpass: 0,
            highpass: 1,
        },
    ),
    (
        FilterFlags::ALLPASS,
        FilterResponse {
            lowpass: 1,
            bandpass: 1,
            highpass: 1,
        },
    ),
];

/// Operation selection order for stack-arithmetic conversion; first match
/// wins. Operations outside this list (ADDP2, LOADNOTE, MULP2) have no
/// counterpart in the target vocabulary.
pub const ARITHMETIC_OPERATION_PRECEDENCE: [(ArithmeticFlags, &str); 7] = [
    (ArithmeticFlags::POP, "pop"),
    (ArithmeticFlags::PUSH, "push"),
    (ArithmeticFlags::ADD, "add"),
    (ArithmeticFlags::ADDP, "addp"),
    (ArithmeticFlags::MULP, "mulp"),
    (ArithmeticFlags::MUL, "mul"),
    (ArithmeticFlags::XCH, "xch"),
];

/// Failure of a single-unit conversion, without location context.
///
/// The patch assembler attaches the instrument and slot indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitError {
    /// Unit type recognized but no mapping is defined.
    NotImplemented { unit: UnitType },
    /// Arithmetic flags match no supported operation.
    UnmappedOperation { flags: ArithmeticFlags },
}

fn flag(set: bool) -> u32 {
    u32::from(set)
}

/// Resolve the waveform index for an oscillator flag set, if any applies.
pub fn oscillator_shape(flags: OscillatorFlags) -> Option<u32> {
    OSCILLATOR_SHAPE_PRECEDENCE
        .iter()
        .find(|(candidate, _)| flags.contains(*candidate))
        .map(|(_, shape)| *shape)
}

/// Resolve the response fields for a filter flag set.
///
/// A flag set matching no known response (including the stereo-only and
/// peak-only cases) leaves all three fields at zero.
pub fn filter_response(flags: FilterFlags) -> FilterResponse {
    FILTER_RESPONSE_PRECEDENCE
        .iter()
        .find(|(candidate, _)| flags.contains(*candidate))
        .map_or(
            FilterResponse {
                lowpass: 0,
                bandpass: 0,
                highpass: 0,
            },
            |(_, response)| *response,
        )
}

/// Resolve the operation name for an arithmetic flag set, if any applies.
pub fn arithmetic_operation(flags: ArithmeticFlags) -> Option<&'static str> {
    ARITHMETIC_OPERATION_PRECEDENCE
        .iter()
        .find(|(candidate, _)| flags.contains(*candidate))
        .map(|(_, name)| *name)
}

/// Convert an envelope unit.
///
/// The source format has no stereo envelope concept, so stereo is always 0.
pub fn convert_envelope(env: &Envelope) -> ConvertedUnit {
    ConvertedUnit::new("envelope")
        .with_parameter("attack", env.attack)
        .with_parameter("decay", env.decay)
        .with_parameter("gain", env.gain)
        .with_parameter("release", env.release)
        .with_parameter("stereo", 0u32)
        .with_parameter("sustain", env.sustain)
}

/// Convert an oscillator unit.
///
/// LFO and stereo are independent booleans read straight from their bits,
/// outside the waveform precedence chain. Unison is always 0: the source
/// engine has no unison support.
pub fn convert_oscillator(osc: &Oscillator) -> ConvertedUnit {
    let mut unit = ConvertedUnit::new("oscillator")
        .with_parameter("color", osc.color)
        .with_parameter("detune", osc.detune)
        .with_parameter("gain", osc.gain)
        .with_parameter("lfo", flag(osc.flags.contains(OscillatorFlags::LFO)))
        .with_parameter("phase", osc.phase_offset)
        .with_parameter("shape", osc.shape)
        .with_parameter("stereo", flag(osc.flags.contains(OscillatorFlags::STEREO)))
        .with_parameter("transpose", osc.transpose)
        .with_parameter("unison", 0u32);
    if let Some(shape) = oscillator_shape(osc.flags) {
        unit = unit.with_parameter("type", shape);
    }
    unit
}

/// Convert a filter unit.
///
/// The negated response fields are always 0: negative responses are not
/// representable upstream. Stereo is an independent boolean.
pub fn convert_filter(filter: &Filter) -> ConvertedUnit {
    let response = filter_response(filter.flags);
    ConvertedUnit::new("filter")
        .with_parameter("bandpass", response.bandpass)
        .with_parameter("frequency", filter.freq)
        .with_parameter("highpass", response.highpass)
        .with_parameter("lowpass", response.lowpass)
        .with_parameter("negbandpass", 0u32)
        .with_parameter("neghighpass", 0u32)
        .with_parameter("resonance", filter.res)
        .with_parameter("stereo", flag(filter.flags.contains(FilterFlags::STEREO)))
}

/// Convert a distortion unit. Direct field copy.
pub fn convert_distortion(dst: &Distortion) -> ConvertedUnit {
    ConvertedUnit::new("distort")
        .with_parameter("drive", dst.drive)
        .with_parameter("stereo", dst.stereo)
}

/// Convert a delay-line unit.
///
/// Note tracking is not derivable from the source fields and the source
/// engine has no stereo delay, so both are always 0.
pub fn convert_delay(dll: &Delay) -> ConvertedUnit {
    ConvertedUnit::new("delay")
        .with_parameter("damp", dll.damp)
        .with_parameter("dry", dll.dry)
        .with_parameter("feedback", dll.feedback)
        .with_parameter("notetracking", 0u32)
        .with_parameter("pregain", dll.pregain)
        .with_parameter("stereo", 0u32)
}

/// Convert a stack-arithmetic unit.
///
/// The matched operation name becomes the unit's type.
pub fn convert_arithmetic(fop: &Arithmetic) -> Result<ConvertedUnit, UnitError> {
    let operation = arithmetic_operation(fop.flags)
        .ok_or(UnitError::UnmappedOperation { flags: fop.flags })?;
    Ok(ConvertedUnit::new(operation).with_parameter("stereo", 0u32))
}

/// Convert a panner unit.
pub fn convert_pan(pan: &Pan) -> ConvertedUnit {
    ConvertedUnit::new("pan")
        .with_parameter("panning", pan.panning)
        .with_parameter("stereo", 0u32)
}

/// Convert an output unit.
///
/// Routing is inferred from the aux-send field rather than a flag: a
/// nonzero aux send emits an aux-routed `out` with both gains, a zero aux
/// send emits a plain `outaux` carrying only the output gain.
pub fn convert_out(out: &Out) -> ConvertedUnit {
    if out.aux_send != 0 {
        ConvertedUnit::new("out")
            .with_parameter("auxgain", out.aux_send)
            .with_parameter("gain", out.gain)
    } else {
        ConvertedUnit::new("outaux").with_parameter("outgain", out.gain)
    }
}

/// Convert one decoded slot.
///
/// Returns `Ok(None)` for slots the assembler should skip: the empty
/// marker, and opaque slots with an unrecognized discriminant. Unit types
/// with no defined mapping fail with [`UnitError::NotImplemented`].
pub fn convert_slot(slot: &UnitSlot) -> Result<Option<ConvertedUnit>, UnitError> {
    let unit = match slot {
        UnitSlot::Empty | UnitSlot::Unknown { .. } => return Ok(None),
        UnitSlot::Envelope(env) => convert_envelope(env),
        UnitSlot::Oscillator(osc) => convert_oscillator(osc),
        UnitSlot::Filter(filter) => convert_filter(filter),
        UnitSlot::Distortion(dst) => convert_distortion(dst),
        UnitSlot::Delay(dll) => convert_delay(dll),
        UnitSlot::Arithmetic(fop) => convert_arithmetic(fop)?,
        UnitSlot::Pan(pan) => convert_pan(pan),
        UnitSlot::Out(out) => convert_out(out),
        UnitSlot::Store(_) => {
            return Err(UnitError::NotImplemented {
                unit: UnitType::Store,
            });
        }
        UnitSlot::Accumulator(_) => {
            return Err(UnitError::NotImplemented {
                unit: UnitType::Accumulator,
            });
        }
        UnitSlot::Load(_) => {
            return Err(UnitError::NotImplemented {
                unit: UnitType::Load,
            });
        }
        UnitSlot::Glitch(_) => {
            return Err(UnitError::NotImplemented {
                unit: UnitType::Glitch,
            });
        }
        UnitSlot::ModuleCount(_) => {
            return Err(UnitError::NotImplemented {
                unit: UnitType::ModuleCount,
            });
        }
    };
    Ok(Some(unit))
}

/// True when the unit type has a defined semantic converter.
pub fn has_converter(unit_type: UnitType) -> bool {
    matches!(
        unit_type,
        UnitType::Envelope
            | UnitType::Oscillator
            | UnitType::Filter
            | UnitType::Distortion
            | UnitType::Delay
            | UnitType::Arithmetic
            | UnitType::Pan
            | UnitType::Out
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_forces_stereo_off() {
        let unit = convert_envelope(&Envelope {
            attack: 8,
            decay: 16,
            sustain: 96,
            release: 32,
            gain: 110,
        });
        assert_eq!(unit.kind, "envelope");
        assert_eq!(unit.parameters["attack"], 8);
        assert_eq!(unit.parameters["sustain"], 96);
        assert_eq!(unit.parameters["stereo"], 0);
    }

    #[test]
    fn test_oscillator_sine_wins_over_stereo() {
        let unit = convert_oscillator(&Oscillator {
            transpose: 64,
            detune: 64,
            phase_offset: 0,
            gate: 0,
            color: 80,
            shape: 90,
            gain: 100,
            flags: OscillatorFlags::SINE | OscillatorFlags::STEREO,
        });
        assert_eq!(unit.kind, "oscillator");
        assert_eq!(unit.parameters["type"], 0);
        assert_eq!(unit.parameters["stereo"], 1);
        assert_eq!(unit.parameters["unison"], 0);
    }

    #[test]
    fn test_oscillator_shape_precedence() {
        let both = OscillatorFlags::SINE | OscillatorFlags::PULSE;
        assert_eq!(oscillator_shape(both), Some(0));
        assert_eq!(oscillator_shape(OscillatorFlags::TRISAW), Some(1));
        assert_eq!(oscillator_shape(OscillatorFlags::GATE), Some(3));
        assert_eq!(oscillator_shape(OscillatorFlags::NOISE), None);
    }

    #[test]
    fn test_oscillator_without_shape_omits_type() {
        let unit = convert_oscillator(&Oscillator {
            transpose: 64,
            detune: 64,
            phase_offset: 0,
            gate: 0,
            color: 0,
            shape: 0,
            gain: 0,
            flags: OscillatorFlags::LFO,
        });
        assert!(!unit.parameters.contains_key("type"));
        assert_eq!(unit.parameters["lfo"], 1);
    }

    #[test]
    fn test_filter_bandstop_expands_to_fixed_combination() {
        let unit = convert_filter(&Filter {
            freq: 30,
            res: 70,
            flags: FilterFlags::BANDSTOP,
        });
        assert_eq!(unit.parameters["lowpass"], 1);
        assert_eq!(unit.parameters["bandpass"], 0);
        assert_eq!(unit.parameters["highpass"], 1);
        assert_eq!(unit.parameters["neghighpass"], 0);
        assert_eq!(unit.parameters["negbandpass"], 0);
    }

    #[test]
    fn test_filter_response_precedence() {
        // Lowpass is checked first, so any set containing its bit selects it.
        let response = filter_response(FilterFlags::from_bits_retain(0x01 | 0x04));
        assert_eq!(
            response,
            FilterResponse {
                lowpass: 1,
                bandpass: 0,
                highpass: 0,
            }
        );
        let allpass = filter_response(FilterFlags::from_bits_retain(0x08));
        assert_eq!(
            allpass,
            FilterResponse {
                lowpass: 0,
                bandpass: 0,
                highpass: 0,
            }
        );
    }

    #[test]
    fn test_filter_stereo_independent_of_response() {
        let unit = convert_filter(&Filter {
            freq: 1,
            res: 2,
            flags: FilterFlags::HIGHPASS | FilterFlags::STEREO,
        });
        assert_eq!(unit.parameters["highpass"], 1);
        assert_eq!(unit.parameters["stereo"], 1);
    }

    #[test]
    fn test_delay_forces_unsupported_parameters_off() {
        let unit = convert_delay(&Delay {
            pregain: 1,
            dry: 2,
            feedback: 3,
            damp: 4,
            freq: 5,
            depth: 6,
            delay: 7,
            count: 8,
            gui_delay: 9,
            sync_type: 10,
            left_reverb: 11,
            reverb: 12,
        });
        assert_eq!(unit.kind, "delay");
        assert_eq!(unit.parameters["damp"], 4);
        assert_eq!(unit.parameters["notetracking"], 0);
        assert_eq!(unit.parameters["stereo"], 0);
    }

    #[test]
    fn test_arithmetic_operation_precedence() {
        // MULP (0x3) contains the POP bit, so POP wins.
        assert_eq!(arithmetic_operation(ArithmeticFlags::MULP), Some("pop"));
        assert_eq!(arithmetic_operation(ArithmeticFlags::PUSH), Some("push"));
        assert_eq!(arithmetic_operation(ArithmeticFlags::ADDP2), None);
        assert_eq!(arithmetic_operation(ArithmeticFlags::empty()), None);
    }

    #[test]
    fn test_arithmetic_unmapped_operation_fails() {
        let err = convert_arithmetic(&Arithmetic {
            flags: ArithmeticFlags::ADDP2,
        })
        .unwrap_err();
        assert_eq!(
            err,
            UnitError::UnmappedOperation {
                flags: ArithmeticFlags::ADDP2,
            }
        );
    }

    #[test]
    fn test_out_routing_inference() {
        let plain = convert_out(&Out {
            gain: 100,
            aux_send: 0,
        });
        assert_eq!(plain.kind, "outaux");
        assert_eq!(plain.parameters["outgain"], 100);
        assert!(!plain.parameters.contains_key("auxgain"));

        let aux = convert_out(&Out {
            gain: 100,
            aux_send: 5,
        });
        assert_eq!(aux.kind, "out");
        assert_eq!(aux.parameters["gain"], 100);
        assert_eq!(aux.parameters["auxgain"], 5);
    }

    #[test]
    fn test_empty_and_unknown_slots_convert_to_nothing() {
        assert_eq!(convert_slot(&UnitSlot::Empty), Ok(None));
        let unknown = UnitSlot::Unknown {
            discriminant: 0xEE,
            payload: [0; fkp_format::PAYLOAD_LEN],
        };
        assert_eq!(convert_slot(&unknown), Ok(None));
    }

    #[test]
    fn test_unconvertible_types_fail_loudly() {
        let slot = UnitSlot::Accumulator(fkp_format::Accumulator { flags: 0 });
        assert_eq!(
            convert_slot(&slot),
            Err(UnitError::NotImplemented {
                unit: UnitType::Accumulator,
            })
        );
        let slot = UnitSlot::Load(fkp_format::Load { value: 1 });
        assert_eq!(
            convert_slot(&slot),
            Err(UnitError::NotImplemented {
                unit: UnitType::Load,
            })
        );
    }

    #[test]
    fn test_has_converter_matches_convert_slot() {
        for unit_type in UnitType::ALL {
            if unit_type == UnitType::None {
                continue;
            }
            // has_converter must agree with what convert_slot accepts.
            let convertible = has_converter(unit_type);
            let rejects = matches!(
                unit_type,
                UnitType::Store
                    | UnitType::Accumulator
                    | UnitType::Load
                    | UnitType::Glitch
                    | UnitType::ModuleCount
            );
            assert_eq!(convertible, !rejects, "{unit_type:?}");
        }
    }
}
