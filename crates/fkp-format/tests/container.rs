use fkp_format::{
    FkpError, MAX_INSTRUMENTS, MAX_UNITS, NAME_LEN, PATCH_DOCUMENT_LEN, TAG_LEN, UNIT_STRIDE,
    UnitSlot, UnitType, VersionTag, parse_patch,
};

/// Byte offset of the slot at `(instrument, slot)` inside a patch buffer.
fn slot_offset(instrument: usize, slot: usize) -> usize {
    TAG_LEN + 4 + MAX_INSTRUMENTS * NAME_LEN + (instrument * MAX_UNITS + slot) * UNIT_STRIDE
}

struct PatchBuilder {
    data: Vec<u8>,
}

impl PatchBuilder {
    fn new(version: VersionTag) -> Self {
        let mut data = vec![0u8; PATCH_DOCUMENT_LEN];
        data[..TAG_LEN].copy_from_slice(&version.as_tag());
        Self { data }
    }

    fn polyphony(mut self, polyphony: u32) -> Self {
        self.data[TAG_LEN..TAG_LEN + 4].copy_from_slice(&polyphony.to_le_bytes());
        self
    }

    fn name(mut self, instrument: usize, name: &str) -> Self {
        let base = TAG_LEN + 4 + instrument * NAME_LEN;
        self.data[base..base + name.len()].copy_from_slice(name.as_bytes());
        self
    }

    fn unit(mut self, instrument: usize, slot: usize, discriminant: u8, payload: &[u8]) -> Self {
        let base = slot_offset(instrument, slot);
        self.data[base] = discriminant;
        self.data[base + 1..base + 1 + payload.len()].copy_from_slice(payload);
        self
    }

    fn global_unit(mut self, slot: usize, discriminant: u8, payload: &[u8]) -> Self {
        let base = PATCH_DOCUMENT_LEN - (MAX_UNITS - slot) * UNIT_STRIDE;
        self.data[base] = discriminant;
        self.data[base + 1..base + 1 + payload.len()].copy_from_slice(payload);
        self
    }

    fn build(self) -> Vec<u8> {
        self.data
    }
}

#[test]
fn decodes_a_realistic_patch() {
    let data = PatchBuilder::new(VersionTag::V14)
        .polyphony(2)
        .name(0, "Lead")
        .name(2, "Bass")
        // Lead: envelope -> oscillator -> out
        .unit(0, 0, 0x1, &[8, 16, 96, 32, 110])
        .unit(0, 1, 0x2, &[64, 64, 0, 0, 80, 90, 100, 0x41])
        .unit(0, 2, 0x9, &[100, 0])
        // Bass: envelope -> filter -> out
        .unit(2, 0, 0x1, &[4, 40, 80, 20, 120])
        .unit(2, 1, 0x3, &[30, 70, 0x03])
        .unit(2, 2, 0x9, &[90, 12])
        .global_unit(0, 0x5, &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12])
        .build();

    let doc = parse_patch(&data).expect("parse patch");
    assert_eq!(doc.version, VersionTag::V14);
    assert_eq!(doc.polyphony, 2);
    assert_eq!(doc.instrument_name(0), "Lead");
    assert_eq!(doc.instrument_name(2), "Bass");

    assert_eq!(doc.unit_at(0, 0).unit_type(), Some(UnitType::Envelope));
    assert_eq!(doc.unit_at(0, 1).unit_type(), Some(UnitType::Oscillator));
    assert_eq!(doc.unit_at(0, 2).unit_type(), Some(UnitType::Out));
    assert!(doc.unit_at(0, 3).is_empty());

    let UnitSlot::Oscillator(osc) = doc.unit_at(0, 1) else {
        panic!("expected oscillator");
    };
    assert_eq!(osc.transpose, 64);
    assert_eq!(osc.gain, 100);
    assert_eq!(osc.flags.bits(), 0x41);

    let UnitSlot::Filter(filter) = doc.unit_at(2, 1) else {
        panic!("expected filter");
    };
    assert_eq!((filter.freq, filter.res), (30, 70));

    assert_eq!(doc.global_units[0].unit_type(), Some(UnitType::Delay));
    assert!(doc.global_units[1].is_empty());

    // Instrument 1 decoded as a full chain of empty slots.
    assert!(doc.instrument_chain(1).iter().all(UnitSlot::is_empty));
}

#[test]
fn decode_is_deterministic() {
    let data = PatchBuilder::new(VersionTag::V13)
        .unit(5, 9, 0x4, &[33, 44, 1])
        .build();
    let first = parse_patch(&data).expect("first parse");
    let second = parse_patch(&data).expect("second parse");
    assert_eq!(first, second);
}

#[test]
fn truncation_never_yields_a_partial_document() {
    let data = PatchBuilder::new(VersionTag::V14).build();
    for cut in [3, TAG_LEN + 2, slot_offset(0, 0) + 5, PATCH_DOCUMENT_LEN - 1] {
        let err = parse_patch(&data[..cut]).expect_err("truncated parse");
        assert!(matches!(err, FkpError::TruncatedInput { .. }), "cut {cut}");
    }
}

#[test]
fn structural_dump_uses_primitive_shapes() {
    let data = PatchBuilder::new(VersionTag::V14)
        .name(0, "Lead")
        .unit(0, 0, 0x1, &[8, 16, 96, 32, 110])
        .unit(0, 1, 0xFF, &[1, 2, 3])
        .build();
    let doc = parse_patch(&data).expect("parse patch");

    let value = serde_json::to_value(&doc).expect("serialize document");
    assert_eq!(value["version"], "4k14");
    assert_eq!(value["instrument_names"][0], "Lead");
    assert_eq!(value["instrument_units"][0]["type"], "envelope");
    assert_eq!(value["instrument_units"][0]["attack"], 8);
    assert_eq!(value["instrument_units"][1]["type"], "unknown");
    assert_eq!(value["instrument_units"][1]["discriminant"], 255);
    assert_eq!(value["instrument_units"][2]["type"], "empty");
}
