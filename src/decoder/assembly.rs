//! Collects plain and mixed parts for one transfer and solves for the payload.
//!
//! Plain parts are stored directly. A mixed part is first reduced by every
//! plain part already known; whatever remains is either a new plain part, a
//! duplicate of something pending, or a new pending equation. Resolving a
//! plain part releases every pending equation that mentions it, so a single
//! arrival can cascade into several recoveries.

use std::collections::{BTreeSet, VecDeque};

use tracing::debug;

use crate::fragment::{FragmentHeader, xor_into};

/// Cap on unsolved mixed parts held per transfer.
pub(crate) const MAX_PENDING: usize = 4096;

/// XOR of the plain parts listed in `indices`.
#[derive(Clone, Debug, PartialEq, Eq)]
struct MixedPart {
    indices: BTreeSet<usize>,
    data: Vec<u8>,
}

impl MixedPart {
    /// Remove `other` from this equation. `other.indices` must be a subset.
    fn eliminate(&mut self, other: &MixedPart) {
        xor_into(&mut self.data, &other.data);
        for index in &other.indices {
            self.indices.remove(index);
        }
    }

    fn is_strict_subset_of(&self, other: &MixedPart) -> bool {
        self.indices.len() < other.indices.len() && self.indices.is_subset(&other.indices)
    }
}

/// Progress of one transfer.
#[derive(Debug)]
pub(crate) struct Assembly {
    header: FragmentHeader,
    parts: Vec<Option<Vec<u8>>>,
    resolved: usize,
    pending: Vec<MixedPart>,
}

impl Assembly {
    pub(crate) fn new(header: FragmentHeader) -> Self {
        let count = usize::try_from(header.sequence_count()).unwrap_or(usize::MAX);
        Self {
            header,
            parts: vec![None; count],
            resolved: 0,
            pending: Vec::new(),
        }
    }

    /// Header of the fragment that opened the transfer.
    pub(crate) fn header(&self) -> &FragmentHeader { &self.header }

    pub(crate) fn resolved(&self) -> usize { self.resolved }

    pub(crate) fn expected(&self) -> usize { self.parts.len() }

    #[cfg(test)]
    pub(crate) fn pending(&self) -> usize { self.pending.len() }

    pub(crate) fn is_complete(&self) -> bool { self.resolved == self.parts.len() }

    /// Fold a fragment's data into the transfer.
    ///
    /// Returns the number of plain parts newly recovered.
    pub(crate) fn absorb(
        &mut self,
        indices: impl IntoIterator<Item = usize>,
        data: Vec<u8>,
    ) -> usize {
        let before = self.resolved;
        let mut queue = VecDeque::from([MixedPart {
            indices: indices.into_iter().collect(),
            data,
        }]);

        while let Some(part) = queue.pop_front() {
            let part = self.reduce_by_known(part);
            match part.indices.len() {
                0 => {}
                1 => self.resolve(part, &mut queue),
                _ => self.hold(part, &mut queue),
            }
        }
        self.resolved - before
    }

    /// Concatenate the recovered plain parts and strip the zero padding.
    ///
    /// Only meaningful once [`is_complete`](Self::is_complete) holds.
    pub(crate) fn into_payload(self) -> Vec<u8> {
        let message_len = usize::try_from(self.header.message_len()).unwrap_or(usize::MAX);
        let mut payload: Vec<u8> = self.parts.into_iter().flatten().flatten().collect();
        payload.truncate(message_len);
        payload
    }

    fn reduce_by_known(&self, mut part: MixedPart) -> MixedPart {
        let parts = &self.parts;
        part.indices.retain(|&index| match parts.get(index) {
            Some(Some(known)) => {
                xor_into(&mut part.data, known);
                false
            }
            Some(None) => true,
            // Out of range indices cannot be produced by the mixing policy.
            None => false,
        });
        part
    }

    fn resolve(&mut self, part: MixedPart, queue: &mut VecDeque<MixedPart>) {
        let Some(&index) = part.indices.first() else {
            return;
        };
        let Some(slot) = self.parts.get_mut(index) else {
            return;
        };
        if slot.is_some() {
            return;
        }
        *slot = Some(part.data);
        self.resolved += 1;

        let (ready, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|pending| pending.indices.contains(&index));
        self.pending = waiting;
        queue.extend(ready);
    }

    fn hold(&mut self, mut part: MixedPart, queue: &mut VecDeque<MixedPart>) {
        // Shrink the new equation by any smaller pending one it contains.
        while let Some(subset) = self
            .pending
            .iter()
            .find(|pending| pending.is_strict_subset_of(&part))
        {
            part.eliminate(subset);
        }
        if part.indices.len() < 2 {
            queue.push_back(part);
            return;
        }
        if self.pending.iter().any(|pending| pending.indices == part.indices) {
            return;
        }
        if self.pending.len() >= MAX_PENDING {
            debug!(indices = ?part.indices, "pending mixed parts at capacity; dropping");
            return;
        }

        // Shrink larger pending equations by the new one and retry them.
        let (supersets, others): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|pending| part.is_strict_subset_of(pending));
        self.pending = others;
        for mut superset in supersets {
            superset.eliminate(&part);
            queue.push_back(superset);
        }
        self.pending.push(part);
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::fragment::{Checksum, SequenceIndex};

    fn assembly(count: u32) -> Assembly {
        let header =
            FragmentHeader::new(SequenceIndex::zero(), count, count * 2, Checksum::new(0), 2);
        Assembly::new(header)
    }

    fn part(value: u8) -> Vec<u8> { vec![value, value.wrapping_add(1)] }

    fn mix(values: &[u8]) -> Vec<u8> {
        values.iter().fold(vec![0, 0], |mut acc, &value| {
            xor_into(&mut acc, &part(value));
            acc
        })
    }

    #[test]
    fn plain_parts_fill_slots() {
        let mut assembly = assembly(2);
        assert_eq!(assembly.absorb([1], part(20)), 1);
        assert_eq!(assembly.absorb([1], part(20)), 0);
        assert_eq!(assembly.absorb([0], part(10)), 1);
        assert!(assembly.is_complete());
        assert_eq!(assembly.into_payload(), vec![10, 11, 20, 21]);
    }

    #[test]
    fn mixed_part_reduces_against_known_parts() {
        let mut assembly = assembly(3);
        assembly.absorb([1], part(20));
        assembly.absorb([2], part(30));
        assert_eq!(assembly.absorb([0, 1], mix(&[10, 20])), 1);
        assert!(assembly.is_complete());
        assert_eq!(assembly.into_payload(), vec![10, 11, 20, 21, 30, 31]);
    }

    #[test]
    fn pending_mixed_part_cascades_when_a_member_arrives() {
        let mut assembly = assembly(3);
        assert_eq!(assembly.absorb([0, 1], mix(&[10, 20])), 0);
        assert_eq!(assembly.absorb([1, 2], mix(&[20, 30])), 0);
        assert_eq!(assembly.pending(), 2);

        // One plain part unlocks both equations in turn.
        assert_eq!(assembly.absorb([0], part(10)), 3);
        assert_eq!(assembly.pending(), 0);
        assert_eq!(assembly.into_payload(), vec![10, 11, 20, 21, 30, 31]);
    }

    #[test]
    fn subset_equations_reduce_larger_ones() {
        let mut assembly = assembly(3);
        assembly.absorb([0, 1, 2], mix(&[10, 20, 30]));
        assert_eq!(assembly.absorb([0, 1], mix(&[10, 20])), 1);
        assert_eq!(assembly.resolved(), 1);
        assert_eq!(assembly.absorb([1], part(20)), 2);
        assert!(assembly.is_complete());
    }

    #[rstest]
    #[case(vec![0, 1])]
    #[case(vec![1, 0])]
    fn duplicate_mixed_parts_are_held_once(#[case] indices: Vec<usize>) {
        let mut assembly = assembly(3);
        assembly.absorb([0, 1], mix(&[10, 20]));
        assembly.absorb(indices, mix(&[10, 20]));
        assert_eq!(assembly.pending(), 1);
        assert_eq!(assembly.expected(), 3);
    }
}
