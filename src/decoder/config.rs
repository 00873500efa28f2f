//! Configuration for [`FragmentDecoder`](crate::decoder::FragmentDecoder).

use std::num::NonZeroUsize;

use crate::fragment::config::DEFAULT_MAX_PAYLOAD_LEN;

/// Content type the caller expects once every part has arrived.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PayloadEncoding {
    /// The payload must be valid UTF-8 text.
    #[default]
    Utf8,
    /// Any byte sequence is acceptable.
    Binary,
}

/// Receive-side settings.
///
/// # Examples
///
/// ```
/// use qrstream::decoder::{DecoderConfig, PayloadEncoding};
///
/// let config = DecoderConfig::default()
///     .strict(true)
///     .encoding(PayloadEncoding::Binary);
/// assert!(config.strict);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Treat malformed or unsupported fragments as fatal.
    ///
    /// Default: false, so stray codes in view are skipped.
    pub strict: bool,
    /// Largest payload a transfer may announce.
    ///
    /// Default: 64 KiB.
    pub max_payload_len: NonZeroUsize,
    /// Expected content of the reassembled payload.
    ///
    /// Default: [`PayloadEncoding::Utf8`].
    pub encoding: PayloadEncoding,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            strict: false,
            max_payload_len: NonZeroUsize::new(DEFAULT_MAX_PAYLOAD_LEN)
                .unwrap_or(NonZeroUsize::MIN),
            encoding: PayloadEncoding::default(),
        }
    }
}

impl DecoderConfig {
    /// Set whether malformed fragments end the transfer.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set the largest payload a transfer may announce.
    #[must_use]
    pub fn max_payload_len(mut self, len: NonZeroUsize) -> Self {
        self.max_payload_len = len;
        self
    }

    /// Set the expected payload content.
    #[must_use]
    pub fn encoding(mut self, encoding: PayloadEncoding) -> Self {
        self.encoding = encoding;
        self
    }
}
