//! Errors returned by [`FragmentEncoder`](crate::encoder::FragmentEncoder).

use std::num::NonZeroUsize;

use thiserror::Error;

use crate::fragment::FragmentationError;

/// A payload the encoder refuses to start with.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum SizeError {
    /// The payload has no bytes.
    #[error("payload is empty")]
    Empty,
    /// The payload exceeds the configured maximum.
    #[error("payload of {len} bytes exceeds the {limit}-byte limit")]
    TooLarge { len: usize, limit: NonZeroUsize },
}

/// Errors produced by the fragment encoder.
#[derive(Debug, Error)]
pub enum EncoderError {
    /// The payload passed to `start` was rejected.
    #[error(transparent)]
    Size(#[from] SizeError),
    /// `next` was called before a payload was set.
    #[error("encoder is idle: call `start` before requesting fragments")]
    Idle,
    /// Splitting or encoding the payload failed.
    #[error(transparent)]
    Fragmentation(#[from] FragmentationError),
}
