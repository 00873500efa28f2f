//! Values reported by [`FragmentDecoder::receive`](crate::decoder::FragmentDecoder::receive).

use bytes::Bytes;

use crate::fragment::{Checksum, FragmentError};

/// Number of plain parts recovered out of the number the transfer needs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Progress {
    resolved: usize,
    expected: usize,
}

impl Progress {
    #[must_use]
    pub const fn new(resolved: usize, expected: usize) -> Self { Self { resolved, expected } }

    /// Plain parts recovered so far.
    #[must_use]
    pub const fn resolved(self) -> usize { self.resolved }

    /// Plain parts the transfer consists of, or zero before the first fragment.
    #[must_use]
    pub const fn expected(self) -> usize { self.expected }

    /// Fraction of the payload recovered, between 0.0 and 1.0.
    #[must_use]
    #[expect(clippy::cast_precision_loss, reason = "part counts are far below 2^52")]
    pub fn fraction(self) -> f64 {
        if self.expected == 0 {
            return 0.0;
        }
        (self.resolved as f64 / self.expected as f64).min(1.0)
    }
}

/// A payload recovered from a complete set of parts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReassembledPayload {
    checksum: Checksum,
    bytes: Bytes,
}

impl ReassembledPayload {
    #[must_use]
    pub fn new(checksum: Checksum, bytes: impl Into<Bytes>) -> Self {
        Self {
            checksum,
            bytes: bytes.into(),
        }
    }

    /// Checksum announced by the transfer and matched by the payload.
    #[must_use]
    pub const fn checksum(&self) -> Checksum { self.checksum }

    /// Borrow the payload bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] { &self.bytes }

    /// Interpret the payload as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns the UTF-8 error when the payload is binary.
    pub fn as_text(&self) -> Result<&str, std::str::Utf8Error> { std::str::from_utf8(&self.bytes) }

    /// Consume the payload, returning its bytes.
    #[must_use]
    pub fn into_bytes(self) -> Bytes { self.bytes }
}

/// Result of handing one scanned string to the decoder.
#[derive(Clone, Debug, PartialEq)]
pub enum DecodeEvent {
    /// The fragment was absorbed and the transfer is still incomplete.
    Progress(Progress),
    /// The string was not a usable fragment and was skipped.
    Ignored(FragmentError),
    /// This fragment completed the transfer.
    Complete(ReassembledPayload),
    /// The transfer finished earlier; the same payload is returned again.
    AlreadyComplete(ReassembledPayload),
}

impl DecodeEvent {
    /// Return the payload if the transfer is finished.
    #[must_use]
    pub fn payload(&self) -> Option<&ReassembledPayload> {
        match self {
            Self::Complete(payload) | Self::AlreadyComplete(payload) => Some(payload),
            Self::Progress(_) | Self::Ignored(_) => None,
        }
    }

    /// Report whether this event finished the transfer.
    #[must_use]
    pub const fn is_complete(&self) -> bool { matches!(self, Self::Complete(_)) }
}
