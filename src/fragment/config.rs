//! Configuration used when splitting payloads into fragments.

use std::num::NonZeroUsize;

use super::wire::{encoded_len_ceiling, max_data_len};

/// Default number of payload bytes carried by each fragment.
pub const DEFAULT_MAX_CHUNK_LEN: usize = 100;

/// Default cap on the size of a transferred payload.
pub const DEFAULT_MAX_PAYLOAD_LEN: usize = 64 * 1024;

/// Settings that bound fragment sizes and the payloads a transfer accepts.
///
/// # Examples
///
/// ```
/// use std::num::NonZeroUsize;
///
/// use qrstream::fragment::TransferConfig;
///
/// let config = TransferConfig::default()
///     .max_chunk_len(NonZeroUsize::new(60).expect("non-zero"))
///     .max_payload_len(NonZeroUsize::new(4096).expect("non-zero"));
/// assert_eq!(config.max_chunk_len.get(), 60);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransferConfig {
    /// Maximum number of payload bytes carried by a single fragment. The
    /// encoded string additionally carries route, header, and checksum
    /// overhead; see [`TransferConfig::encoded_fragment_ceiling`].
    ///
    /// Default: 100.
    pub max_chunk_len: NonZeroUsize,
    /// Hard cap on the payload handed to the encoder.
    ///
    /// Default: 64 KiB.
    pub max_payload_len: NonZeroUsize,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            max_chunk_len: NonZeroUsize::new(DEFAULT_MAX_CHUNK_LEN).unwrap_or(NonZeroUsize::MIN),
            max_payload_len: NonZeroUsize::new(DEFAULT_MAX_PAYLOAD_LEN)
                .unwrap_or(NonZeroUsize::MIN),
        }
    }
}

impl TransferConfig {
    /// Derive a configuration from the longest string a QR frame may hold.
    ///
    /// `max_fragment_chars` should reflect the alphanumeric capacity of the
    /// QR version and error-correction level the renderer uses. The returned
    /// configuration ensures every encoded fragment fits within it.
    ///
    /// Returns `None` when the budget cannot accommodate the fixed overhead.
    #[must_use]
    pub fn for_fragment_budget(
        max_fragment_chars: usize,
        max_payload_len: NonZeroUsize,
    ) -> Option<Self> {
        Some(Self {
            max_chunk_len: max_data_len(max_fragment_chars)?,
            max_payload_len,
        })
    }

    /// Set the maximum payload bytes per fragment.
    #[must_use]
    pub fn max_chunk_len(mut self, len: NonZeroUsize) -> Self {
        self.max_chunk_len = len;
        self
    }

    /// Set the maximum payload length.
    #[must_use]
    pub fn max_payload_len(mut self, len: NonZeroUsize) -> Self {
        self.max_payload_len = len;
        self
    }

    /// Upper bound on the length of any encoded fragment string.
    #[must_use]
    pub fn encoded_fragment_ceiling(&self) -> usize { encoded_len_ceiling(self.max_chunk_len.get()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbounded_fragment_budget_is_accepted() {
        let max_payload = NonZeroUsize::new(2048).expect("non-zero");
        let config =
            TransferConfig::for_fragment_budget(usize::MAX, max_payload).expect("budget fits");
        assert!(config.max_chunk_len.get() > DEFAULT_MAX_CHUNK_LEN);
    }

    #[test]
    fn fragment_budget_bounds_encoded_length() {
        let max_payload = NonZeroUsize::new(2048).expect("non-zero");
        let config = TransferConfig::for_fragment_budget(400, max_payload).expect("budget fits");
        assert!(config.encoded_fragment_ceiling() <= 400);
        assert_eq!(config.max_payload_len, max_payload);
    }

    #[test]
    fn fragment_budget_rejects_overhead_only_budgets() {
        let max_payload = NonZeroUsize::new(2048).expect("non-zero");
        assert!(TransferConfig::for_fragment_budget(32, max_payload).is_none());
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = TransferConfig::default();
        assert_eq!(config.max_chunk_len.get(), DEFAULT_MAX_CHUNK_LEN);
        assert_eq!(config.max_payload_len.get(), DEFAULT_MAX_PAYLOAD_LEN);
    }
}
