//! Turns raw camera reads into a single payload.
//!
//! A [`Scanner`] sits between the capture pipeline and its owner. Each raw
//! string is either a complete single-shot payload, which resolves the scan
//! at once, or a fragment, which goes to a [`FragmentDecoder`]. The scanner
//! ends exactly once, by resolving or failing, and releases the capture
//! source and cancels its [`shutdown_token`](Scanner::shutdown_token) before
//! notifying the [`ScanObserver`].

pub mod capture;
pub mod config;
mod driver;
pub mod error;
pub mod observer;

use std::time::{Duration, Instant};

pub use capture::{CaptureError, CaptureGuard, CaptureSource};
pub use config::ScannerConfig;
use derive_more::Display;
pub use driver::run;
pub use error::{ScanError, ScanFailure};
pub use observer::ScanObserver;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::{
    decoder::{DecodeError, DecodeEvent, FragmentDecoder, PayloadEncoding, ReassembledPayload},
    fragment::{Checksum, is_fragment_string},
    metrics::{self, Outcome},
};

/// Lifecycle of a [`Scanner`].
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
pub enum ScanPhase {
    #[display("scanning")]
    Scanning,
    #[display("resolved")]
    Resolved,
    #[display("failed")]
    Failed,
}

/// Classifies raw scans and drives a [`FragmentDecoder`] until a payload is
/// recovered.
///
/// # Examples
///
/// ```
/// use qrstream::scanner::{
///     CaptureSource, ScanFailure, ScanObserver, ScanPhase, Scanner, ScannerConfig,
/// };
///
/// struct Camera;
/// impl CaptureSource for Camera {
///     fn release(&mut self) {}
/// }
///
/// #[derive(Default)]
/// struct Screen(Option<String>);
/// impl ScanObserver for Screen {
///     fn on_resolved(&mut self, payload: String) { self.0 = Some(payload); }
///     fn on_failed(&mut self, _failure: ScanFailure) {}
/// }
///
/// let mut scanner = Scanner::new(Camera, Screen::default(), ScannerConfig::default());
/// scanner.on_raw_string("lnbc10u1pjexample");
/// assert_eq!(scanner.phase(), ScanPhase::Resolved);
/// assert_eq!(scanner.observer().0.as_deref(), Some("lnbc10u1pjexample"));
/// ```
#[derive(Debug)]
pub struct Scanner<C: CaptureSource, O: ScanObserver> {
    decoder: FragmentDecoder,
    stall_timeout: Option<Duration>,
    capture: CaptureGuard<C>,
    observer: O,
    phase: ScanPhase,
    /// Transfer and resolved part count last reported to the observer.
    reported: Option<(Checksum, usize)>,
    last_progress_at: Option<Instant>,
    shutdown: CancellationToken,
}

impl<C: CaptureSource, O: ScanObserver> Scanner<C, O> {
    /// Start scanning with `capture` as the frame source.
    #[must_use]
    pub fn new(capture: C, observer: O, config: ScannerConfig) -> Self {
        let decoder_config = config.decoder.encoding(PayloadEncoding::Utf8);
        Self {
            decoder: FragmentDecoder::new(decoder_config),
            stall_timeout: config.stall_timeout,
            capture: CaptureGuard::new(capture),
            observer,
            phase: ScanPhase::Scanning,
            reported: None,
            last_progress_at: None,
            shutdown: CancellationToken::new(),
        }
    }

    /// Handle one decoded string from the capture pipeline.
    pub fn on_raw_string(&mut self, raw: &str) { self.on_raw_string_at(raw, Instant::now()); }

    /// Handle one decoded string observed at `now`.
    ///
    /// Strings arriving after the scan has ended are dropped, as are empty
    /// reads.
    pub fn on_raw_string_at(&mut self, raw: &str, now: Instant) {
        if self.phase != ScanPhase::Scanning {
            debug!(phase = %self.phase, "scan finished; dropping input");
            return;
        }
        if raw.trim().is_empty() {
            return;
        }
        if !is_fragment_string(raw) {
            debug!(len = raw.len(), "single-shot payload");
            self.resolve(raw.to_owned());
            return;
        }

        match self.decoder.receive(raw) {
            Ok(DecodeEvent::Complete(payload) | DecodeEvent::AlreadyComplete(payload)) => {
                self.resolve_payload(payload);
            }
            Ok(DecodeEvent::Progress(_)) => {
                self.track_progress(now);
                self.poll_stall_at(now);
            }
            Ok(DecodeEvent::Ignored(_)) => {
                self.poll_stall_at(now);
            }
            Err(err) => self.fail(err.into()),
        }
    }

    /// Fail the scan if the committed transfer has stalled as of `now`.
    ///
    /// Returns `true` when this call ended the scan.
    pub fn poll_stall_at(&mut self, now: Instant) -> bool {
        if self.phase != ScanPhase::Scanning {
            return false;
        }
        let (Some(timeout), Some(since)) = (self.stall_timeout, self.last_progress_at) else {
            return false;
        };
        let idle = now.saturating_duration_since(since);
        if idle < timeout {
            return false;
        }
        self.fail(ScanError::Stalled { idle });
        true
    }

    /// Instant at which the current transfer counts as stalled.
    ///
    /// `None` before a transfer is committed, when no timeout is configured,
    /// or once the scan has ended.
    #[must_use]
    pub fn stall_deadline(&self) -> Option<Instant> {
        if self.phase != ScanPhase::Scanning {
            return None;
        }
        self.last_progress_at?.checked_add(self.stall_timeout?)
    }

    /// Report a failure of the capture pipeline.
    pub fn on_capture_error(&mut self, err: CaptureError) {
        if self.phase == ScanPhase::Scanning {
            self.fail(err.into());
        }
    }

    /// Stop scanning at the owner's request.
    pub fn cancel(&mut self) {
        if self.phase == ScanPhase::Scanning {
            self.fail(ScanError::Cancelled);
        }
    }

    /// Token cancelled when the scan ends or the scanner is dropped.
    ///
    /// Timers and subscriptions tied to the scan should select on it.
    #[must_use]
    pub fn shutdown_token(&self) -> CancellationToken { self.shutdown.clone() }

    #[must_use]
    pub const fn phase(&self) -> ScanPhase { self.phase }

    /// Fraction of the current transfer recovered.
    #[must_use]
    pub fn progress(&self) -> f64 { self.decoder.progress() }

    #[must_use]
    pub const fn observer(&self) -> &O { &self.observer }

    pub fn observer_mut(&mut self) -> &mut O { &mut self.observer }

    /// Report whether the capture source has been released.
    #[must_use]
    pub const fn is_released(&self) -> bool { self.capture.is_released() }

    fn track_progress(&mut self, now: Instant) {
        let (Some(checksum), Some(resolved)) =
            (self.decoder.checksum(), self.decoder.resolved_parts())
        else {
            return;
        };
        let current = (checksum, resolved);
        if self.reported == Some(current) {
            return;
        }
        self.reported = Some(current);
        self.last_progress_at = Some(now);
        self.observer.on_progress(self.decoder.progress());
    }

    fn resolve_payload(&mut self, payload: ReassembledPayload) {
        match String::from_utf8(payload.into_bytes().to_vec()) {
            Ok(text) => self.resolve(text),
            Err(err) => self.fail(ScanError::Decode(DecodeError::InvalidText {
                valid_up_to: err.utf8_error().valid_up_to(),
            })),
        }
    }

    fn resolve(&mut self, payload: String) {
        self.phase = ScanPhase::Resolved;
        info!(len = payload.len(), "scan resolved");
        metrics::inc_transfers(Outcome::Resolved);
        self.teardown();
        self.observer.on_resolved(payload);
    }

    fn fail(&mut self, cause: ScanError) {
        self.phase = ScanPhase::Failed;
        warn!(error = %cause, "scan failed");
        metrics::inc_transfers(Outcome::Failed);
        self.teardown();
        self.observer.on_failed(ScanFailure::new(cause));
    }

    fn teardown(&mut self) {
        self.capture.release();
        self.shutdown.cancel();
    }
}

impl<C: CaptureSource, O: ScanObserver> Drop for Scanner<C, O> {
    fn drop(&mut self) { self.teardown(); }
}
