//! Configuration for [`Scanner`](crate::scanner::Scanner).

use std::time::Duration;

use crate::decoder::DecoderConfig;

/// Default time a committed transfer may go without progress.
pub const DEFAULT_STALL_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for one scan.
///
/// The payload handed to
/// [`ScanObserver::on_resolved`](crate::scanner::ScanObserver::on_resolved)
/// is text, so the decoder always expects UTF-8 regardless of
/// [`DecoderConfig::encoding`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScannerConfig {
    /// Settings for the fragment decoder.
    pub decoder: DecoderConfig,
    /// Give up when a committed transfer resolves no new part for this long.
    /// `None` waits forever.
    ///
    /// Default: 30 seconds.
    pub stall_timeout: Option<Duration>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            decoder: DecoderConfig::default(),
            stall_timeout: Some(DEFAULT_STALL_TIMEOUT),
        }
    }
}

impl ScannerConfig {
    #[must_use]
    pub fn decoder(mut self, decoder: DecoderConfig) -> Self {
        self.decoder = decoder;
        self
    }

    #[must_use]
    pub fn stall_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.stall_timeout = timeout;
        self
    }
}
