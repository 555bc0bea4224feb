//! Slot conversion is deterministic and position-independent: the same
//! slot bytes produce the same decoded slot and the same conversion
//! outcome regardless of where they sit in the grid.

use proptest::prelude::*;

use fkp_convert::convert_slot;
use fkp_format::{
    MAX_INSTRUMENTS, MAX_UNITS, NAME_LEN, PATCH_DOCUMENT_LEN, PAYLOAD_LEN, TAG_LEN, UNIT_STRIDE,
    VersionTag, parse_patch,
};

fn patch_with_slot(instrument: usize, slot: usize, discriminant: u8, payload: &[u8]) -> Vec<u8> {
    let mut data = vec![0u8; PATCH_DOCUMENT_LEN];
    data[..TAG_LEN].copy_from_slice(&VersionTag::CURRENT.as_tag());
    let base =
        TAG_LEN + 4 + MAX_INSTRUMENTS * NAME_LEN + (instrument * MAX_UNITS + slot) * UNIT_STRIDE;
    data[base] = discriminant;
    data[base + 1..base + 1 + payload.len()].copy_from_slice(payload);
    data
}

proptest! {
    #[test]
    fn conversion_is_position_independent(
        discriminant in any::<u8>(),
        payload in proptest::collection::vec(any::<u8>(), PAYLOAD_LEN),
        instrument in 0usize..MAX_INSTRUMENTS,
        slot in 0usize..MAX_UNITS,
    ) {
        let reference = parse_patch(&patch_with_slot(0, 0, discriminant, &payload))
            .expect("parse reference patch");
        let moved = parse_patch(&patch_with_slot(instrument, slot, discriminant, &payload))
            .expect("parse moved patch");

        prop_assert_eq!(reference.unit_at(0, 0), moved.unit_at(instrument, slot));
        prop_assert_eq!(
            convert_slot(reference.unit_at(0, 0)),
            convert_slot(moved.unit_at(instrument, slot))
        );
    }

    #[test]
    fn conversion_is_deterministic(
        discriminant in any::<u8>(),
        payload in proptest::collection::vec(any::<u8>(), PAYLOAD_LEN),
    ) {
        let doc = parse_patch(&patch_with_slot(3, 17, discriminant, &payload))
            .expect("parse patch");
        let slot = doc.unit_at(3, 17);
        prop_assert_eq!(convert_slot(slot), convert_slot(slot));
    }
}
