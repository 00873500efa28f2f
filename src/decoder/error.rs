//! Terminal errors raised by [`FragmentDecoder`](crate::decoder::FragmentDecoder).

use std::num::NonZeroUsize;

use thiserror::Error;

use crate::fragment::{Checksum, FragmentError};

/// Errors that end a transfer.
///
/// Once a decoder returns one of these it keeps returning it until reset.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// A malformed fragment arrived while the decoder was in strict mode.
    #[error("rejected fragment: {0}")]
    Fragment(#[from] FragmentError),
    /// The transfer announces a payload longer than the decoder accepts.
    #[error("transfer of {len} bytes exceeds the {limit}-byte limit")]
    MessageTooLarge { len: usize, limit: NonZeroUsize },
    /// Every part arrived but the reassembled bytes fail the payload checksum.
    #[error("reassembled payload checksum mismatch: expected {expected}, found {found}")]
    ChecksumMismatch { expected: Checksum, found: Checksum },
    /// The payload is complete but is not valid UTF-8 text.
    #[error("reassembled payload is not valid UTF-8 (valid up to byte {valid_up_to})")]
    InvalidText { valid_up_to: usize },
}
