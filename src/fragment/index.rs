//! Zero-based positions within the cyclic fragment sequence.
//!
//! Provides [`SequenceIndex`], a type-safe wrapper around `u32`. Indices below
//! the transfer's part count name plain parts; larger indices name mixed
//! parts and keep growing for as long as the encoder runs.

use std::num::TryFromIntError;

use bincode::{Decode, Encode};
use derive_more::{Display, From};

/// Zero-based ordinal of a fragment within the emitted sequence.
///
/// # Examples
///
/// ```
/// use qrstream::fragment::SequenceIndex;
/// let index = SequenceIndex::new(3);
/// assert_eq!(index.get(), 3);
/// assert_eq!(index.wrapping_increment().get(), 4);
/// assert_eq!(SequenceIndex::new(u32::MAX).wrapping_increment(), SequenceIndex::zero());
/// ```
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Encode, Decode, Display, From,
)]
#[display("{_0}")]
pub struct SequenceIndex(u32);

impl SequenceIndex {
    /// Construct an index from a `u32` value.
    #[must_use]
    pub const fn new(value: u32) -> Self { Self(value) }

    /// Return the first index of every sequence.
    #[must_use]
    pub const fn zero() -> Self { Self(0) }

    /// Return the underlying numeric value.
    #[must_use]
    pub const fn get(self) -> u32 { self.0 }

    /// Advance to the next index, wrapping to zero after `u32::MAX`.
    #[must_use]
    pub const fn wrapping_increment(self) -> Self { Self(self.0.wrapping_add(1)) }

    /// One-based sequence number carried in the fragment route.
    #[must_use]
    pub fn sequence_number(self) -> u64 { u64::from(self.0) + 1 }
}

impl TryFrom<usize> for SequenceIndex {
    type Error = TryFromIntError;

    fn try_from(value: usize) -> Result<Self, Self::Error> { u32::try_from(value).map(Self) }
}

impl From<SequenceIndex> for u32 {
    fn from(value: SequenceIndex) -> Self { value.0 }
}
