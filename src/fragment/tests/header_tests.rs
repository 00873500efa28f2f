//! Tests for fragment header and index primitives.

use crate::fragment::{Checksum, FragmentHeader, SequenceIndex};

fn header(index: u32, checksum: u32) -> FragmentHeader {
    FragmentHeader::new(SequenceIndex::new(index), 3, 11, Checksum::new(checksum), 4)
}

#[test]
fn plain_and_mixed_headers_are_distinguished_by_index() {
    assert!(!header(0, 1).is_mixed());
    assert!(!header(2, 1).is_mixed());
    assert!(header(3, 1).is_mixed());
    assert!(header(40, 1).is_mixed());
    // The second cycle starts over with plain parts.
    assert!(!header(6, 1).is_mixed());
    assert!(header(9, 1).is_mixed());
}

#[test]
fn headers_with_equal_transfer_fields_share_a_transfer() {
    assert!(header(0, 9).same_transfer(&header(17, 9)));
    assert!(!header(0, 9).same_transfer(&header(0, 10)));
}

#[test]
fn differing_part_length_is_a_different_transfer() {
    let wide = FragmentHeader::new(SequenceIndex::zero(), 3, 11, Checksum::new(9), 5);
    assert!(!header(0, 9).same_transfer(&wide));
}

#[test]
fn sequence_numbers_are_one_based() {
    assert_eq!(SequenceIndex::zero().sequence_number(), 1);
    assert_eq!(SequenceIndex::new(u32::MAX).sequence_number(), 1_u64 << 32);
}

#[test]
fn checksum_displays_as_fixed_width_hex() {
    assert_eq!(Checksum::new(0xBEEF).to_string(), "0000beef");
}
