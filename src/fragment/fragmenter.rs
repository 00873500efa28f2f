//! Outbound helpers that split payloads into plain parts and mix them.
//!
//! [`split`] and [`combine`] are the pure building blocks. [`FragmentPlan`]
//! binds them to one payload: it pads every plain part to a common length,
//! records the checksum and unpadded length, and materialises the
//! [`Fragment`] for any [`SequenceIndex`] of the cyclic sequence.

use std::num::NonZeroUsize;

use super::{Checksum, FragmentHeader, FragmentationError, SequenceIndex, mixing};

/// Divide `payload` into parts of at most `max_chunk_len` bytes.
///
/// The final part may be shorter. An empty payload yields no parts.
///
/// # Examples
///
/// ```
/// use std::num::NonZeroUsize;
///
/// use qrstream::fragment::split;
/// let parts = split(b"lightning:A", NonZeroUsize::new(4).expect("non-zero"));
/// assert_eq!(parts, vec![b"ligh".to_vec(), b"tnin".to_vec(), b"g:A".to_vec()]);
/// ```
#[must_use]
pub fn split(payload: &[u8], max_chunk_len: NonZeroUsize) -> Vec<Vec<u8>> {
    payload
        .chunks(max_chunk_len.get())
        .map(<[u8]>::to_vec)
        .collect()
}

/// XOR the given parts together, zero-padding shorter parts to the longest.
///
/// # Examples
///
/// ```
/// use qrstream::fragment::combine;
/// let mixed = combine([&[0b1010_u8, 0xff][..], &[0b0110_u8][..]]);
/// assert_eq!(mixed, vec![0b1100, 0xff]);
/// ```
#[must_use]
pub fn combine<'a>(parts: impl IntoIterator<Item = &'a [u8]>) -> Vec<u8> {
    let mut mixed = Vec::new();
    for part in parts {
        if part.len() > mixed.len() {
            mixed.resize(part.len(), 0);
        }
        xor_into(&mut mixed, part);
    }
    mixed
}

/// XOR `other` into the leading bytes of `target`.
pub fn xor_into(target: &mut [u8], other: &[u8]) {
    for (dst, src) in target.iter_mut().zip(other) {
        *dst ^= src;
    }
}

/// Metadata and data for a single fragment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fragment {
    header: FragmentHeader,
    data: Vec<u8>,
}

impl Fragment {
    /// Construct a new fragment.
    #[must_use]
    pub fn new(header: FragmentHeader, data: Vec<u8>) -> Self { Self { header, data } }

    /// Return the fragment header.
    #[must_use]
    pub fn header(&self) -> &FragmentHeader { &self.header }

    /// Return the fragment data bytes.
    #[must_use]
    pub fn data(&self) -> &[u8] { self.data.as_slice() }

    /// Return the plain-part indices combined into this fragment's data.
    #[must_use]
    pub fn part_indices(&self) -> Vec<usize> {
        mixing::part_indices(self.header.sequence_index(), self.header.sequence_count())
    }

    /// Consume the fragment, returning its components.
    #[must_use]
    pub fn into_parts(self) -> (FragmentHeader, Vec<u8>) { (self.header, self.data) }
}

/// A payload split into equally sized plain parts, ready to emit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FragmentPlan {
    checksum: Checksum,
    message_len: u32,
    data_len: u32,
    parts: Vec<Vec<u8>>,
}

impl FragmentPlan {
    /// Split `payload` into parts of at most `max_chunk_len` bytes.
    ///
    /// The part length is balanced so every part carries nearly the same
    /// number of payload bytes; the last part is zero-padded on the wire.
    ///
    /// # Errors
    ///
    /// Returns [`FragmentationError::Empty`] for an empty payload and
    /// [`FragmentationError::TooManyParts`] when the payload or part count
    /// does not fit in `u32`.
    pub fn new(payload: &[u8], max_chunk_len: NonZeroUsize) -> Result<Self, FragmentationError> {
        if payload.is_empty() {
            return Err(FragmentationError::Empty);
        }
        let too_many = |_| FragmentationError::TooManyParts { len: payload.len() };
        let message_len = u32::try_from(payload.len()).map_err(too_many)?;
        let part_count = payload.len().div_ceil(max_chunk_len.get());
        u32::try_from(part_count).map_err(too_many)?;
        let chunk_len = payload.len().div_ceil(part_count);
        let data_len = u32::try_from(chunk_len).map_err(too_many)?;

        let mut parts = split(payload, NonZeroUsize::new(chunk_len).unwrap_or(max_chunk_len));
        for part in &mut parts {
            part.resize(chunk_len, 0);
        }

        Ok(Self {
            checksum: Checksum::of(payload),
            message_len,
            data_len,
            parts,
        })
    }

    /// Return the checksum of the planned payload.
    #[must_use]
    pub const fn checksum(&self) -> Checksum { self.checksum }

    /// Return the unpadded payload length.
    #[must_use]
    pub const fn message_len(&self) -> u32 { self.message_len }

    /// Return the padded length of every part.
    #[must_use]
    pub const fn data_len(&self) -> u32 { self.data_len }

    /// Return the number of plain parts.
    #[must_use]
    pub fn sequence_count(&self) -> u32 {
        // `new` rejects part counts that do not fit.
        u32::try_from(self.parts.len()).unwrap_or(u32::MAX)
    }

    /// Borrow the padded plain parts in index order.
    #[must_use]
    pub fn parts(&self) -> &[Vec<u8>] { self.parts.as_slice() }

    /// Build the fragment emitted at `index`.
    #[must_use]
    pub fn fragment_at(&self, index: SequenceIndex) -> Fragment {
        let count = self.sequence_count();
        let data = combine(
            mixing::part_indices(index, count)
                .into_iter()
                .filter_map(|i| self.parts.get(i).map(Vec::as_slice)),
        );
        let header =
            FragmentHeader::new(index, count, self.message_len, self.checksum, self.data_len);
        Fragment::new(header, data)
    }
}
