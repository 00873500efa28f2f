//! Utilities for exercising `qrstream` encoders, decoders, and scanners in
//! tests.
//!
//! The helpers stand in for the camera and the UI around a
//! [`Scanner`](qrstream::scanner::Scanner) and shorten the boilerplate of
//! producing fragment strings.
//!
//! ```rust
//! use qrstream::scanner::{ScanPhase, Scanner, ScannerConfig};
//! use qrstream_testing::{MockCapture, RecordingObserver, fragments};
//!
//! let (capture, releases) = MockCapture::new();
//! let mut scanner = Scanner::new(capture, RecordingObserver::default(), ScannerConfig::default());
//! for raw in fragments(b"lightning:A", 4, 3) {
//!     scanner.on_raw_string(&raw);
//! }
//! assert_eq!(scanner.phase(), ScanPhase::Resolved);
//! assert_eq!(releases.count(), 1);
//! ```

pub mod capture;
pub mod fragments;
pub mod harness;
pub mod metrics;
pub mod observer;

pub use capture::{MockCapture, ReleaseCounter};
pub use fragments::{encoder, feed_until_complete, fragments, one_cycle};
pub use harness::{TestScanner, live_camera, scanner, scanner_with};
pub use metrics::{CounterSnapshot, debugging_recorder_setup};
pub use observer::{RecordingObserver, ScanEvent};
