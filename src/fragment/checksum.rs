use bincode::{Decode, Encode};
use derive_more::{Display, From, Into};

/// CRC-32 (IEEE) of a complete payload.
///
/// Every fragment of a transfer carries the same checksum, so it doubles as
/// the transfer identity: a fragment with a different checksum belongs to a
/// different payload.
///
/// # Examples
///
/// ```
/// use qrstream::fragment::Checksum;
/// let checksum = Checksum::of(b"123456789");
/// assert_eq!(checksum.get(), 0xCBF4_3926);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Encode, Decode, Display, From, Into)]
#[display("{_0:08x}")]
pub struct Checksum(u32);

impl Checksum {
    /// Wrap a raw checksum value.
    #[must_use]
    pub const fn new(value: u32) -> Self { Self(value) }

    /// Compute the checksum of `payload`.
    #[must_use]
    pub fn of(payload: &[u8]) -> Self { Self(crc32fast::hash(payload)) }

    /// Return the raw checksum value.
    #[must_use]
    pub const fn get(self) -> u32 { self.0 }
}
