//! Error types emitted by the frame codec.
//!
//! [`FragmentError`] describes why a single scanned string could not be read
//! as a fragment; the decoder treats it as non-fatal unless configured to be
//! strict. [`FragmentationError`] covers the outbound side.

use bincode::error::EncodeError;
use thiserror::Error;

use super::Checksum;

/// Reasons a string could not be parsed as a fragment.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FragmentError {
    /// The string does not start with the animated-transfer scheme.
    #[error("missing `ur:` scheme prefix")]
    MissingScheme,
    /// The string is a well-formed transfer of a type this codec does not carry.
    #[error("unsupported transfer type `{kind}`")]
    Unsupported { kind: String },
    /// The route is not `type/seq-count/body`.
    #[error("malformed fragment route")]
    MalformedRoute,
    /// The `seq-count` component is not two decimal numbers.
    #[error("invalid sequence component `{0}`")]
    InvalidSequence(String),
    /// The fragment claims a transfer of zero parts.
    #[error("fragment declares zero parts")]
    ZeroCount,
    /// The one-based sequence number is zero or does not fit a sequence index.
    #[error("sequence number {0} out of range")]
    IndexOutOfRange(u64),
    /// The body is not valid base32 or its header cannot be decoded.
    #[error("invalid fragment body: {0}")]
    InvalidBody(String),
    /// The body failed its own integrity check.
    #[error("fragment checksum mismatch: expected {expected}, found {found}")]
    FrameChecksum { expected: Checksum, found: Checksum },
    /// The route disagrees with the header inside the body.
    #[error("fragment route does not match its header")]
    RouteMismatch,
    /// Lengths in the header cannot describe a consistent transfer.
    #[error("fragment lengths are inconsistent")]
    InconsistentLength,
}

impl FragmentError {
    /// Report whether the string was well formed but of an unsupported type.
    #[must_use]
    pub const fn is_unsupported(&self) -> bool { matches!(self, Self::Unsupported { .. }) }
}

/// Errors produced while fragmenting outbound payloads.
#[derive(Debug, Error)]
pub enum FragmentationError {
    /// There is nothing to fragment.
    #[error("cannot fragment an empty payload")]
    Empty,
    /// The payload length or part count does not fit in `u32`.
    #[error("payload of {len} bytes needs more parts than a fragment header can describe")]
    TooManyParts { len: usize },
    /// Serialisation of the fragment header failed.
    #[error("failed to encode fragment header: {0}")]
    Encode(#[from] EncodeError),
}
