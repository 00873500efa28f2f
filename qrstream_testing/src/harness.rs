//! Ready-made scanners wired to a [`MockCapture`] and a [`RecordingObserver`].

use futures::{Stream, StreamExt, stream};
use qrstream::scanner::{CaptureError, Scanner, ScannerConfig};
use rstest::fixture;

use crate::{MockCapture, RecordingObserver, ReleaseCounter};

/// Scanner type produced by these helpers.
pub type TestScanner = Scanner<MockCapture, RecordingObserver>;

/// Build a scanner with `config` and return it with its release counter.
#[must_use]
pub fn scanner_with(config: ScannerConfig) -> (TestScanner, ReleaseCounter) {
    let (capture, releases) = MockCapture::new();
    (
        Scanner::new(capture, RecordingObserver::default(), config),
        releases,
    )
}

/// Scanner with the default configuration.
#[fixture]
#[allow(
    unused_braces,
    reason = "rustc false positive for single line rstest fixtures"
)]
pub fn scanner() -> (TestScanner, ReleaseCounter) { scanner_with(ScannerConfig::default()) }

/// A camera that reads `frames` in order and then keeps running without
/// producing anything.
pub fn live_camera(
    frames: Vec<String>,
) -> impl Stream<Item = Result<String, CaptureError>> + Unpin {
    stream::iter(frames.into_iter().map(Ok)).chain(stream::pending())
}
