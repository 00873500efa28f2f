//! Callbacks through which a [`Scanner`](crate::scanner::Scanner) reports to its owner.

use super::ScanFailure;

/// Receives the outcome of a scan.
///
/// Exactly one of [`on_resolved`](Self::on_resolved) or
/// [`on_failed`](Self::on_failed) is called per scanner, after the capture
/// source has been released.
pub trait ScanObserver {
    /// The payload was read, either from a single code or a full transfer.
    fn on_resolved(&mut self, payload: String);

    /// Scanning ended without a payload.
    fn on_failed(&mut self, failure: ScanFailure);

    /// Transfer progress changed. `fraction` lies between 0.0 and 1.0.
    fn on_progress(&mut self, fraction: f64) { let _ = fraction; }
}
