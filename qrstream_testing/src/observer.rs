//! A scan observer that records every callback.

use qrstream::scanner::{ScanFailure, ScanObserver};

/// One callback received by a [`RecordingObserver`].
#[derive(Clone, Debug, PartialEq)]
pub enum ScanEvent {
    Resolved(String),
    Failed(ScanFailure),
    Progress(f64),
}

/// Records scanner callbacks in the order they arrive.
#[derive(Clone, Debug, Default)]
pub struct RecordingObserver {
    events: Vec<ScanEvent>,
}

impl RecordingObserver {
    #[must_use]
    pub fn events(&self) -> &[ScanEvent] { &self.events }

    /// Payloads delivered through `on_resolved`.
    #[must_use]
    pub fn resolved(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ScanEvent::Resolved(payload) => Some(payload.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Failures delivered through `on_failed`.
    #[must_use]
    pub fn failures(&self) -> Vec<&ScanFailure> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ScanEvent::Failed(failure) => Some(failure),
                _ => None,
            })
            .collect()
    }

    /// Progress fractions in the order they were reported.
    #[must_use]
    pub fn progress(&self) -> Vec<f64> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ScanEvent::Progress(fraction) => Some(*fraction),
                _ => None,
            })
            .collect()
    }

    /// Number of resolve and fail callbacks combined.
    #[must_use]
    pub fn terminal_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| !matches!(event, ScanEvent::Progress(_)))
            .count()
    }
}

impl ScanObserver for RecordingObserver {
    fn on_resolved(&mut self, payload: String) { self.events.push(ScanEvent::Resolved(payload)); }

    fn on_failed(&mut self, failure: ScanFailure) { self.events.push(ScanEvent::Failed(failure)); }

    fn on_progress(&mut self, fraction: f64) { self.events.push(ScanEvent::Progress(fraction)); }
}
