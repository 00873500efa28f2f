//! Receiver side of an animated transfer.
//!
//! [`FragmentDecoder`] accepts scanned strings in whatever order the camera
//! delivers them. Plain parts are stored as they arrive and mixed parts are
//! solved against them, so the payload is usually recovered before every
//! plain part has been seen directly. A fragment from a different transfer
//! discards the partial state and starts over with the newcomer.

mod assembly;
pub mod config;
pub mod error;
pub mod event;

use assembly::Assembly;
pub use config::{DecoderConfig, PayloadEncoding};
pub use error::DecodeError;
pub use event::{DecodeEvent, Progress, ReassembledPayload};
use tracing::{debug, info, warn};

use crate::{
    fragment::{Checksum, Fragment, FragmentError, decode_fragment},
    metrics::{self, Reception},
};

#[derive(Debug)]
enum Phase {
    Collecting(Option<Assembly>),
    Complete(ReassembledPayload),
    Failed(DecodeError),
}

/// Rebuilds a payload from fragment strings.
///
/// # Examples
///
/// ```
/// use std::num::NonZeroUsize;
///
/// use qrstream::{
///     decoder::{DecodeEvent, FragmentDecoder},
///     encoder::FragmentEncoder,
///     fragment::TransferConfig,
/// };
///
/// let config =
///     TransferConfig::default().max_chunk_len(NonZeroUsize::new(4).expect("non-zero"));
/// let mut encoder = FragmentEncoder::new(config);
/// encoder.start(b"lightning:A").expect("payload within limits");
///
/// let mut decoder = FragmentDecoder::default();
/// let payload = loop {
///     let raw = encoder.next().expect("encoder started");
///     if let DecodeEvent::Complete(payload) = decoder.receive(&raw).expect("valid transfer") {
///         break payload;
///     }
/// };
/// assert_eq!(payload.as_bytes(), b"lightning:A");
/// ```
#[derive(Debug)]
pub struct FragmentDecoder {
    config: DecoderConfig,
    phase: Phase,
}

impl Default for FragmentDecoder {
    fn default() -> Self { Self::new(DecoderConfig::default()) }
}

impl FragmentDecoder {
    /// Create a decoder waiting for its first fragment.
    #[must_use]
    pub const fn new(config: DecoderConfig) -> Self {
        Self {
            config,
            phase: Phase::Collecting(None),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &DecoderConfig { &self.config }

    /// Feed one scanned string to the decoder.
    ///
    /// Malformed and unsupported strings are reported as
    /// [`DecodeEvent::Ignored`] unless [`DecoderConfig::strict`] is set.
    /// After completion every call returns [`DecodeEvent::AlreadyComplete`]
    /// with the same payload, except a fragment from another transfer, which
    /// discards the finished payload and starts collecting afresh.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] when the transfer cannot finish. The decoder
    /// then stays failed, returning the same error, until
    /// [`reset`](Self::reset) is called.
    pub fn receive(&mut self, raw: &str) -> Result<DecodeEvent, DecodeError> {
        match &self.phase {
            Phase::Complete(payload) => {
                let payload = payload.clone();
                return self.receive_after_completion(raw, payload);
            }
            Phase::Failed(err) => return Err(err.clone()),
            Phase::Collecting(_) => {}
        }

        match decode_fragment(raw) {
            Ok(fragment) => {
                metrics::inc_fragments_received(Reception::Accepted);
                self.absorb(fragment)
            }
            Err(err) => {
                metrics::inc_fragments_received(Reception::Ignored);
                self.reject(err)
            }
        }
    }

    /// Fraction of the payload recovered so far, between 0.0 and 1.0.
    ///
    /// Zero before the first fragment is accepted and after a failure.
    #[must_use]
    pub fn progress(&self) -> f64 {
        match &self.phase {
            Phase::Collecting(assembly) => assembly.as_ref().map_or(0.0, |assembly| {
                Progress::new(assembly.resolved(), assembly.expected()).fraction()
            }),
            Phase::Complete(_) => 1.0,
            Phase::Failed(_) => 0.0,
        }
    }

    /// Discard all state and wait for a new transfer.
    pub fn reset(&mut self) {
        debug!("decoder reset");
        self.phase = Phase::Collecting(None);
    }

    /// Report whether the payload has been recovered.
    #[must_use]
    pub const fn is_complete(&self) -> bool { matches!(self.phase, Phase::Complete(_)) }

    /// Report whether the decoder has failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool { matches!(self.phase, Phase::Failed(_)) }

    /// Report whether a transfer has been committed and is still incomplete.
    #[must_use]
    pub const fn is_collecting(&self) -> bool { matches!(self.phase, Phase::Collecting(Some(_))) }

    /// Number of plain parts in the committed transfer.
    #[must_use]
    pub fn expected_parts(&self) -> Option<usize> { self.assembly().map(Assembly::expected) }

    /// Number of plain parts recovered in the committed transfer.
    #[must_use]
    pub fn resolved_parts(&self) -> Option<usize> { self.assembly().map(Assembly::resolved) }

    /// Checksum of the committed or completed transfer.
    #[must_use]
    pub fn checksum(&self) -> Option<Checksum> {
        match &self.phase {
            Phase::Collecting(assembly) => {
                assembly.as_ref().map(|assembly| assembly.header().checksum())
            }
            Phase::Complete(payload) => Some(payload.checksum()),
            Phase::Failed(_) => None,
        }
    }

    /// Return the recovered payload once complete.
    #[must_use]
    pub fn payload(&self) -> Option<&ReassembledPayload> {
        match &self.phase {
            Phase::Complete(payload) => Some(payload),
            Phase::Collecting(_) | Phase::Failed(_) => None,
        }
    }

    fn assembly(&self) -> Option<&Assembly> {
        match &self.phase {
            Phase::Collecting(assembly) => assembly.as_ref(),
            Phase::Complete(_) | Phase::Failed(_) => None,
        }
    }

    fn reject(&mut self, err: FragmentError) -> Result<DecodeEvent, DecodeError> {
        if self.config.strict {
            return Err(self.fail(DecodeError::Fragment(err)));
        }
        debug!(error = %err, "ignoring fragment");
        Ok(DecodeEvent::Ignored(err))
    }

    fn receive_after_completion(
        &mut self,
        raw: &str,
        payload: ReassembledPayload,
    ) -> Result<DecodeEvent, DecodeError> {
        match decode_fragment(raw) {
            Ok(fragment) if fragment.header().checksum() != payload.checksum() => {
                debug!(
                    previous = %payload.checksum(),
                    checksum = %fragment.header().checksum(),
                    "fragment from another transfer after completion; restarting"
                );
                metrics::inc_fragments_received(Reception::Accepted);
                self.phase = Phase::Collecting(None);
                self.absorb(fragment)
            }
            _ => Ok(DecodeEvent::AlreadyComplete(payload)),
        }
    }

    fn absorb(&mut self, fragment: Fragment) -> Result<DecodeEvent, DecodeError> {
        let header = *fragment.header();
        let indices = fragment.part_indices();
        let Phase::Collecting(current) = &mut self.phase else {
            return Ok(DecodeEvent::Progress(Progress::default()));
        };

        let restart = current
            .as_ref()
            .is_none_or(|assembly| !assembly.header().same_transfer(&header));
        if restart {
            let len = usize::try_from(header.message_len()).unwrap_or(usize::MAX);
            let limit = self.config.max_payload_len;
            if len > limit.get() {
                return Err(self.fail(DecodeError::MessageTooLarge { len, limit }));
            }
            if let Some(previous) = current.as_ref() {
                debug!(
                    previous = %previous.header().checksum(),
                    checksum = %header.checksum(),
                    "fragment from another transfer; restarting"
                );
            } else {
                debug!(
                    checksum = %header.checksum(),
                    parts = header.sequence_count(),
                    message_len = header.message_len(),
                    "decoder committed to transfer"
                );
            }
            *current = Some(Assembly::new(header));
        }
        let Some(assembly) = current.as_mut() else {
            return Ok(DecodeEvent::Progress(Progress::default()));
        };

        let (_, data) = fragment.into_parts();
        let recovered = assembly.absorb(indices, data);
        let progress = Progress::new(assembly.resolved(), assembly.expected());
        debug!(
            sequence_index = header.sequence_index().get(),
            recovered,
            progress = progress.fraction(),
            "fragment absorbed"
        );
        if !assembly.is_complete() {
            return Ok(DecodeEvent::Progress(progress));
        }
        match current.take() {
            Some(assembly) => self.finish(assembly),
            None => Ok(DecodeEvent::Progress(progress)),
        }
    }

    fn finish(&mut self, assembly: Assembly) -> Result<DecodeEvent, DecodeError> {
        let expected = assembly.header().checksum();
        let bytes = assembly.into_payload();

        let found = Checksum::of(&bytes);
        if found != expected {
            return Err(self.fail(DecodeError::ChecksumMismatch { expected, found }));
        }
        let text_error = match self.config.encoding {
            PayloadEncoding::Utf8 => std::str::from_utf8(&bytes).err(),
            PayloadEncoding::Binary => None,
        };
        if let Some(err) = text_error {
            return Err(self.fail(DecodeError::InvalidText {
                valid_up_to: err.valid_up_to(),
            }));
        }

        info!(checksum = %expected, len = bytes.len(), "transfer complete");
        let payload = ReassembledPayload::new(expected, bytes);
        self.phase = Phase::Complete(payload.clone());
        Ok(DecodeEvent::Complete(payload))
    }

    fn fail(&mut self, err: DecodeError) -> DecodeError {
        warn!(error = %err, "decoder failed");
        self.phase = Phase::Failed(err.clone());
        err
    }
}
