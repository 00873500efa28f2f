//! Metric helpers for `qrstream`.
//!
//! This module defines metric names and simple helper functions wrapping the
//! [`metrics`](https://docs.rs/metrics) crate. Without the `metrics` feature
//! every helper is a no-op.

#[cfg(feature = "metrics")]
use metrics::counter;

/// Name of the counter tracking fragment strings produced by encoders.
pub const FRAGMENTS_EMITTED: &str = "qrstream_fragments_emitted_total";
/// Name of the counter tracking fragment strings fed to decoders.
pub const FRAGMENTS_RECEIVED: &str = "qrstream_fragments_received_total";
/// Name of the counter tracking finished scans.
pub const TRANSFERS: &str = "qrstream_transfers_total";

/// What the decoder did with a received string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reception {
    /// The fragment was merged into the transfer.
    Accepted,
    /// The string was skipped as malformed or foreign.
    Ignored,
}

impl Reception {
    #[cfg_attr(not(feature = "metrics"), allow(dead_code))]
    fn as_str(self) -> &'static str {
        match self {
            Reception::Accepted => "accepted",
            Reception::Ignored => "ignored",
        }
    }
}

/// How a scan ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// A payload was delivered.
    Resolved,
    /// The scan gave up.
    Failed,
}

impl Outcome {
    #[cfg_attr(not(feature = "metrics"), allow(dead_code))]
    fn as_str(self) -> &'static str {
        match self {
            Outcome::Resolved => "resolved",
            Outcome::Failed => "failed",
        }
    }
}

/// Record an emitted fragment.
pub fn inc_fragments_emitted() {
    #[cfg(feature = "metrics")]
    counter!(FRAGMENTS_EMITTED).increment(1);
}

/// Record a received fragment string.
pub fn inc_fragments_received(reception: Reception) {
    #[cfg(feature = "metrics")]
    counter!(FRAGMENTS_RECEIVED, "outcome" => reception.as_str()).increment(1);
    #[cfg(not(feature = "metrics"))]
    let _ = reception;
}

/// Record a finished scan.
pub fn inc_transfers(outcome: Outcome) {
    #[cfg(feature = "metrics")]
    counter!(TRANSFERS, "outcome" => outcome.as_str()).increment(1);
    #[cfg(not(feature = "metrics"))]
    let _ = outcome;
}
