//! A capture source that counts how often it is released.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use qrstream::scanner::CaptureSource;

/// Shared view of a [`MockCapture`]'s release count.
#[derive(Clone, Debug, Default)]
pub struct ReleaseCounter(Arc<AtomicUsize>);

impl ReleaseCounter {
    /// Number of times the capture has been released.
    #[must_use]
    pub fn count(&self) -> usize { self.0.load(Ordering::SeqCst) }
}

/// Capture source for scanners under test.
#[derive(Debug)]
pub struct MockCapture {
    releases: ReleaseCounter,
}

impl MockCapture {
    /// Create a capture and the counter that observes it.
    #[must_use]
    pub fn new() -> (Self, ReleaseCounter) {
        let releases = ReleaseCounter::default();
        (
            Self {
                releases: releases.clone(),
            },
            releases,
        )
    }
}

impl CaptureSource for MockCapture {
    fn release(&mut self) { self.releases.0.fetch_add(1, Ordering::SeqCst); }
}
