//! Sender side of an animated transfer.
//!
//! [`FragmentEncoder`] owns one payload at a time and hands out its fragment
//! strings in a fixed cycle: every plain part once, then the mixed parts
//! chosen by [`mixing`](crate::fragment::mixing), then the cycle repeats for
//! as long as the caller keeps asking. [`animate`] drives an encoder from a
//! tokio interval for callers that do not own a timer of their own.

mod animate;
pub mod error;

pub use animate::animate;
pub use error::{EncoderError, SizeError};
use tracing::debug;

use crate::{
    fragment::{
        Checksum,
        FragmentPlan,
        FragmentationError,
        SequenceIndex,
        TransferConfig,
        encode_fragment,
        mixing,
    },
    metrics,
};

#[derive(Debug)]
enum EncoderState {
    Idle,
    Emitting {
        plan: FragmentPlan,
        next_index: SequenceIndex,
    },
}

/// Produces the cyclic fragment sequence for one payload.
///
/// # Examples
///
/// ```
/// use std::num::NonZeroUsize;
///
/// use qrstream::{encoder::FragmentEncoder, fragment::TransferConfig};
///
/// let config =
///     TransferConfig::default().max_chunk_len(NonZeroUsize::new(4).expect("non-zero"));
/// let mut encoder = FragmentEncoder::new(config);
/// encoder.start(b"lightning:A").expect("payload within limits");
///
/// let first = encoder.next().expect("encoder started");
/// assert!(first.starts_with("UR:BYTES/1-3/"));
/// assert_eq!(encoder.sequence_count(), Some(3));
/// ```
#[derive(Debug)]
pub struct FragmentEncoder {
    config: TransferConfig,
    state: EncoderState,
}

impl Default for FragmentEncoder {
    fn default() -> Self { Self::new(TransferConfig::default()) }
}

impl FragmentEncoder {
    /// Create an idle encoder.
    #[must_use]
    pub const fn new(config: TransferConfig) -> Self {
        Self {
            config,
            state: EncoderState::Idle,
        }
    }

    /// Return the configuration used for new payloads.
    #[must_use]
    pub const fn config(&self) -> &TransferConfig { &self.config }

    /// Begin emitting `payload`, restarting the cycle at the first plain part.
    ///
    /// Any payload already being emitted is discarded first, so a rejected
    /// payload leaves the encoder idle.
    ///
    /// # Errors
    ///
    /// Returns [`SizeError`] (wrapped in [`EncoderError::Size`]) when the
    /// payload is empty or longer than
    /// [`TransferConfig::max_payload_len`], and
    /// [`EncoderError::Fragmentation`] if the payload cannot be split.
    pub fn start(&mut self, payload: impl AsRef<[u8]>) -> Result<(), EncoderError> {
        let payload = payload.as_ref();
        self.reset();
        let limit = self.config.max_payload_len;
        if payload.is_empty() {
            return Err(SizeError::Empty.into());
        }
        if payload.len() > limit.get() {
            return Err(SizeError::TooLarge {
                len: payload.len(),
                limit,
            }
            .into());
        }

        let plan = FragmentPlan::new(payload, self.config.max_chunk_len)?;
        debug!(
            checksum = %plan.checksum(),
            message_len = plan.message_len(),
            parts = plan.sequence_count(),
            "encoder started transfer"
        );
        self.state = EncoderState::Emitting {
            plan,
            next_index: SequenceIndex::zero(),
        };
        Ok(())
    }

    /// Return the next fragment string and advance the cycle by one.
    ///
    /// # Errors
    ///
    /// Returns [`EncoderError::Idle`] when no payload has been started, or
    /// [`EncoderError::Fragmentation`] if the fragment header cannot be
    /// encoded.
    #[allow(
        clippy::should_implement_trait,
        reason = "the sequence never ends and each step is fallible"
    )]
    pub fn next(&mut self) -> Result<String, EncoderError> {
        let EncoderState::Emitting { plan, next_index } = &mut self.state else {
            return Err(EncoderError::Idle);
        };
        let fragment = plan.fragment_at(*next_index);
        // A single-part payload repeats one identical fragment.
        if plan.sequence_count() > 1 {
            *next_index = next_index.wrapping_increment();
        }
        let encoded = encode_fragment(&fragment).map_err(FragmentationError::from)?;
        metrics::inc_fragments_emitted();
        Ok(encoded)
    }

    /// Discard the payload and return to idle.
    pub fn reset(&mut self) {
        if self.is_emitting() {
            debug!("encoder reset");
        }
        self.state = EncoderState::Idle;
    }

    /// Report whether a payload is being emitted.
    #[must_use]
    pub const fn is_emitting(&self) -> bool {
        matches!(self.state, EncoderState::Emitting { .. })
    }

    /// Number of plain parts of the current payload.
    #[must_use]
    pub fn sequence_count(&self) -> Option<u32> { self.plan().map(FragmentPlan::sequence_count) }

    /// Checksum of the current payload.
    #[must_use]
    pub fn checksum(&self) -> Option<Checksum> { self.plan().map(FragmentPlan::checksum) }

    /// Number of fragments before the sequence repeats.
    #[must_use]
    pub fn cycle_len(&self) -> Option<u64> { self.sequence_count().map(mixing::cycle_len) }

    /// Index of the fragment the next call to [`next`](Self::next) returns.
    #[must_use]
    pub fn position(&self) -> Option<SequenceIndex> {
        match &self.state {
            EncoderState::Emitting { next_index, .. } => Some(*next_index),
            EncoderState::Idle => None,
        }
    }

    /// Report whether the payload fits a single fragment.
    ///
    /// Callers may then render one static code instead of an animation;
    /// [`next`](Self::next) keeps returning the same fragment string.
    #[must_use]
    pub fn is_single_frame(&self) -> bool { self.sequence_count() == Some(1) }

    fn plan(&self) -> Option<&FragmentPlan> {
        match &self.state {
            EncoderState::Emitting { plan, .. } => Some(plan),
            EncoderState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests;
