//! Canonical error and result types for the crate.
//!
//! Each component reports its own error type. [`Error`] gathers them for
//! callers, such as the `qrstream` binary, that drive several components
//! and want a single error surface.

use thiserror::Error;

use crate::{
    decoder::DecodeError,
    encoder::EncoderError,
    scanner::ScanFailure,
};

/// Top-level error type exposed by `qrstream`.
#[derive(Debug, Error)]
pub enum Error {
    /// The payload could not be turned into fragments.
    #[error(transparent)]
    Encoder(#[from] EncoderError),
    /// A transfer could not be reassembled.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// A scan ended without a payload.
    #[error("{0}")]
    Scan(#[from] ScanFailure),
    /// Reading input or writing output failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// A fragment capacity too small for the fixed per-fragment overhead.
    #[error("a QR capacity of {0} characters cannot hold a fragment")]
    FragmentBudget(usize),
}

/// Result type alias using [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
