//! Ownership of the camera pipeline that feeds a [`Scanner`](crate::scanner::Scanner).

use thiserror::Error;
use tracing::debug;

/// A capture pipeline that must be released when scanning ends.
///
/// Implementors wrap whatever owns the camera or video stream. The scanner
/// holds the source in a [`CaptureGuard`], which guarantees
/// [`release`](Self::release) is called exactly once.
pub trait CaptureSource {
    /// Stop delivering frames and free the underlying device.
    fn release(&mut self);
}

/// Failures reported by the capture pipeline.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CaptureError {
    /// No camera is present or it is in use elsewhere.
    #[error("camera unavailable")]
    Unavailable,
    /// The user or platform denied camera access.
    #[error("camera permission denied")]
    PermissionDenied,
    /// The frame source ended while scanning.
    #[error("capture stream closed")]
    Closed,
    /// Any other pipeline failure.
    #[error("capture failed: {0}")]
    Other(String),
}

/// Scoped ownership of a [`CaptureSource`].
///
/// The source is released on the first call to [`release`](Self::release)
/// or when the guard is dropped, whichever comes first.
#[derive(Debug)]
pub struct CaptureGuard<C: CaptureSource> {
    source: Option<C>,
}

impl<C: CaptureSource> CaptureGuard<C> {
    #[must_use]
    pub const fn new(source: C) -> Self { Self { source: Some(source) } }

    /// Borrow the source while it is still held.
    #[must_use]
    pub fn get(&self) -> Option<&C> { self.source.as_ref() }

    #[must_use]
    pub const fn is_released(&self) -> bool { self.source.is_none() }

    /// Release the source. Returns `false` if it was already released.
    pub fn release(&mut self) -> bool {
        let Some(mut source) = self.source.take() else {
            return false;
        };
        source.release();
        debug!("capture released");
        true
    }
}

impl<C: CaptureSource> Drop for CaptureGuard<C> {
    fn drop(&mut self) { self.release(); }
}
