//! Deterministic selection of the plain parts behind each sequence index.
//!
//! Both sides of a transfer evaluate [`part_indices`] independently, so the
//! combined index set never travels on the wire. A cycle emits every plain
//! part once, followed by `count` mixed parts. Each mixed part XORs two plain
//! parts `{k, k + stride}`; the stride rotates from one cycle to the next so
//! repeated cycles pair every part with a different partner.

use super::SequenceIndex;

/// Number of mixed parts emitted after the plain parts of each cycle.
#[must_use]
pub fn redundancy_count(sequence_count: u32) -> u32 {
    if sequence_count <= 1 { 0 } else { sequence_count }
}

/// Number of fragments in one full cycle.
#[must_use]
pub fn cycle_len(sequence_count: u32) -> u64 {
    u64::from(sequence_count) + u64::from(redundancy_count(sequence_count))
}

/// Return the sorted plain-part indices combined by the fragment at `index`.
///
/// Plain fragments yield a single index. Returns an empty vector when
/// `sequence_count` is zero.
///
/// # Examples
///
/// ```
/// use qrstream::fragment::{SequenceIndex, mixing::part_indices};
/// assert_eq!(part_indices(SequenceIndex::new(1), 3), vec![1]);
/// assert_eq!(part_indices(SequenceIndex::new(3), 3), vec![0, 1]);
/// assert_eq!(part_indices(SequenceIndex::new(5), 3), vec![0, 2]);
/// ```
#[must_use]
pub fn part_indices(index: SequenceIndex, sequence_count: u32) -> Vec<usize> {
    if sequence_count == 0 {
        return Vec::new();
    }
    let count = u64::from(sequence_count);
    let cycle = cycle_len(sequence_count);
    let position = u64::from(index.get()) % cycle;
    if position < count {
        return vec![to_usize(position)];
    }

    let round = u64::from(index.get()) / cycle;
    let first = position - count;
    let stride = 1 + round % (count - 1);
    let second = (first + stride) % count;
    let mut indices = vec![to_usize(first), to_usize(second)];
    indices.sort_unstable();
    indices
}

// Values are reduced modulo a `u32` part count, so they always fit.
fn to_usize(value: u64) -> usize { usize::try_from(value).unwrap_or(usize::MAX) }
