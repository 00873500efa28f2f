use bincode::{Decode, Encode};

use super::{Checksum, SequenceIndex, mixing};

/// Header describing a single fragment.
///
/// `FragmentHeader` carries everything a receiver needs to place a fragment
/// within its transfer: the position in the cyclic sequence, the number of
/// plain parts, the unpadded payload length, the payload checksum, and the
/// padded length shared by every part.
///
/// # Examples
///
/// ```
/// use qrstream::fragment::{Checksum, FragmentHeader, SequenceIndex};
/// let header = FragmentHeader::new(SequenceIndex::new(3), 3, 11, Checksum::new(7), 4);
/// assert_eq!(header.sequence_count(), 3);
/// assert!(header.is_mixed());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Encode, Decode)]
pub struct FragmentHeader {
    sequence_index: SequenceIndex,
    sequence_count: u32,
    message_len: u32,
    checksum: Checksum,
    data_len: u32,
}

impl FragmentHeader {
    /// Create a new fragment header.
    #[must_use]
    pub const fn new(
        sequence_index: SequenceIndex,
        sequence_count: u32,
        message_len: u32,
        checksum: Checksum,
        data_len: u32,
    ) -> Self {
        Self {
            sequence_index,
            sequence_count,
            message_len,
            checksum,
            data_len,
        }
    }

    /// Return the fragment position in the emitted sequence.
    #[must_use]
    pub const fn sequence_index(&self) -> SequenceIndex { self.sequence_index }

    /// Return the number of plain parts in the transfer.
    #[must_use]
    pub const fn sequence_count(&self) -> u32 { self.sequence_count }

    /// Return the unpadded length of the original payload.
    #[must_use]
    pub const fn message_len(&self) -> u32 { self.message_len }

    /// Return the checksum of the original payload.
    #[must_use]
    pub const fn checksum(&self) -> Checksum { self.checksum }

    /// Return the padded length of every part's data.
    #[must_use]
    pub const fn data_len(&self) -> u32 { self.data_len }

    /// Report whether this fragment combines more than one plain part.
    ///
    /// Every cycle starts with the plain parts, so the position within the
    /// cycle decides.
    #[must_use]
    pub fn is_mixed(&self) -> bool {
        let cycle = mixing::cycle_len(self.sequence_count).max(1);
        u64::from(self.sequence_index.get()) % cycle >= u64::from(self.sequence_count)
    }

    /// Report whether `other` describes the same transfer.
    ///
    /// Two headers agree when every transfer-wide field matches; only the
    /// sequence index may differ.
    #[must_use]
    pub fn same_transfer(&self, other: &Self) -> bool {
        self.checksum == other.checksum
            && self.sequence_count == other.sequence_count
            && self.message_len == other.message_len
            && self.data_len == other.data_len
    }
}
