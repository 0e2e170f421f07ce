//! Permutation tables whose size is not a power of two.
//!
//! Run with `--features override-boxes`.

#![cfg(feature = "override-boxes")]

use streamrng::random::arc4::Arc4Rand;
use streamrng::{BitEngine, SeedSeq, StreamRngError};

fn assert_permutation(table: &[u8]) {
    let mut seen = vec![false; table.len()];
    for &entry in table {
        assert!((entry as usize) < table.len(), "entry {} out of range", entry);
        assert!(!seen[entry as usize], "entry {} repeated", entry);
        seen[entry as usize] = true;
    }
}

#[test]
fn odd_sized_table_is_permutation() {
    for boxes in [2usize, 3, 100, 255] {
        let mut engine = Arc4Rand::with_box_count(boxes, &mut SeedSeq::new(&[1, 2, 3])).unwrap();
        assert_eq!(engine.boxes(), boxes);
        assert_permutation(engine.table());
        engine.discard(50);
        assert_permutation(engine.table());
    }
}

#[test]
fn full_size_matches_regular_construction() {
    let overridden = Arc4Rand::with_box_count(256, &mut SeedSeq::new(&[4, 5])).unwrap();
    let regular = Arc4Rand::from_sequence(&mut SeedSeq::new(&[4, 5]));
    assert_eq!(overridden, regular);
}

#[test]
fn box_count_outside_range_is_rejected() {
    for boxes in [0usize, 1, 257] {
        assert_eq!(
            Arc4Rand::with_box_count(boxes, &mut SeedSeq::new(&[1])),
            Err(StreamRngError::InvalidBoxCount { boxes, max: 256 })
        );
    }
}

#[test]
fn reseed_keeps_table_size() {
    let mut engine = Arc4Rand::with_box_count(37, &mut SeedSeq::new(&[8])).unwrap();
    engine.seed(11);
    assert_eq!(engine.boxes(), 37);
    assert_permutation(engine.table());
}

#[test]
fn decode_with_box_count_roundtrip() {
    let mut engine = Arc4Rand::with_box_count(100, &mut SeedSeq::new(&[6])).unwrap();
    engine.next_word();
    let restored = Arc4Rand::decode_with_box_count(&engine.encode(), 100).unwrap();
    assert_eq!(restored, engine);
}

#[test]
fn decode_with_box_count_rejects_entry_at_limit() {
    let table: Vec<String> = (0..99).chain([100]).map(|v| v.to_string()).collect();
    let text = format!("0 0 {}", table.join(" "));
    assert_eq!(
        Arc4Rand::decode_with_box_count(&text, 100),
        Err(StreamRngError::ValueOutOfRange {
            position: 101,
            value: 100,
            limit: 100,
        })
    );
}
