//! Terminal scan failures.

use std::{fmt, time::Duration};

use thiserror::Error;

use super::CaptureError;
use crate::{decoder::DecodeError, fragment::FragmentError};

/// Why a scan stopped without a payload.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ScanError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Capture(#[from] CaptureError),
    /// The committed transfer made no progress within the stall timeout.
    #[error("no progress for {idle:?}")]
    Stalled { idle: Duration },
    #[error("scan cancelled")]
    Cancelled,
}

/// What [`ScanObserver::on_failed`](crate::scanner::ScanObserver::on_failed)
/// receives: a message fit for display plus the typed cause.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanFailure {
    reason: String,
    cause: ScanError,
}

impl ScanFailure {
    /// Build a failure with the standard message for `cause`.
    #[must_use]
    pub fn new(cause: ScanError) -> Self {
        Self {
            reason: describe(&cause),
            cause,
        }
    }

    /// Human-readable explanation.
    #[must_use]
    pub fn reason(&self) -> &str { &self.reason }

    #[must_use]
    pub fn cause(&self) -> &ScanError { &self.cause }

    #[must_use]
    pub fn into_cause(self) -> ScanError { self.cause }
}

impl fmt::Display for ScanFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.reason) }
}

impl std::error::Error for ScanFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> { Some(&self.cause) }
}

fn describe(cause: &ScanError) -> String {
    match cause {
        ScanError::Decode(DecodeError::Fragment(err)) if err.is_unsupported() => {
            "This QR code uses an unsupported format.".to_owned()
        }
        ScanError::Decode(DecodeError::Fragment(FragmentError::FrameChecksum { .. })) => {
            "A QR code was misread. Please try again.".to_owned()
        }
        ScanError::Decode(DecodeError::Fragment(_)) => {
            "This QR code is not part of a readable transfer.".to_owned()
        }
        ScanError::Decode(DecodeError::MessageTooLarge { limit, .. }) => {
            format!("The transfer is larger than the {limit}-byte limit.")
        }
        ScanError::Decode(DecodeError::ChecksumMismatch { .. }) => {
            "The transfer arrived corrupted. Please scan again.".to_owned()
        }
        ScanError::Decode(DecodeError::InvalidText { .. }) => {
            "The scanned data is not text.".to_owned()
        }
        ScanError::Capture(CaptureError::Unavailable) => "The camera is unavailable.".to_owned(),
        ScanError::Capture(CaptureError::PermissionDenied) => {
            "Camera access was denied.".to_owned()
        }
        ScanError::Capture(CaptureError::Closed) => "The camera stopped.".to_owned(),
        ScanError::Capture(CaptureError::Other(detail)) => format!("Camera error: {detail}"),
        ScanError::Stalled { idle } => {
            format!("No new codes were read for {} seconds.", idle.as_secs())
        }
        ScanError::Cancelled => "Scanning was cancelled.".to_owned(),
    }
}
