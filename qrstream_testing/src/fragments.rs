//! Shortcuts for producing fragment strings.

use std::num::NonZeroUsize;

use qrstream::{
    decoder::{DecodeError, FragmentDecoder, ReassembledPayload},
    encoder::FragmentEncoder,
    fragment::TransferConfig,
};

/// Start an encoder for `payload` with parts of at most `chunk_len` bytes.
///
/// # Panics
///
/// Panics if `chunk_len` is zero or the payload is rejected.
#[must_use]
pub fn encoder(payload: &[u8], chunk_len: usize) -> FragmentEncoder {
    let chunk_len = NonZeroUsize::new(chunk_len).expect("chunk length must be non-zero");
    let mut encoder = FragmentEncoder::new(TransferConfig::default().max_chunk_len(chunk_len));
    encoder.start(payload).expect("payload accepted by encoder");
    encoder
}

/// The first `count` fragment strings for `payload`.
///
/// # Panics
///
/// Panics under the same conditions as [`encoder`].
#[must_use]
pub fn fragments(payload: &[u8], chunk_len: usize, count: usize) -> Vec<String> {
    let mut encoder = encoder(payload, chunk_len);
    (0..count)
        .map(|_| encoder.next().expect("started encoder emits fragments"))
        .collect()
}

/// Every fragment string of one full cycle for `payload`.
///
/// # Panics
///
/// Panics under the same conditions as [`encoder`].
#[must_use]
pub fn one_cycle(payload: &[u8], chunk_len: usize) -> Vec<String> {
    let cycle = encoder(payload, chunk_len).cycle_len().unwrap_or_default();
    fragments(
        payload,
        chunk_len,
        usize::try_from(cycle).expect("cycle fits in memory"),
    )
}

/// Feed `frames` to `decoder` until it reports a payload.
///
/// Returns `Ok(None)` if the frames run out first.
///
/// # Errors
///
/// Returns the decoder's error if the transfer fails.
pub fn feed_until_complete<'a>(
    decoder: &mut FragmentDecoder,
    frames: impl IntoIterator<Item = &'a str>,
) -> Result<Option<ReassembledPayload>, DecodeError> {
    for raw in frames {
        if let Some(payload) = decoder.receive(raw)?.payload() {
            return Ok(Some(payload.clone()));
        }
    }
    Ok(None)
}
