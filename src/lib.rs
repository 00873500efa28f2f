#![doc(html_root_url = "https://docs.rs/qrstream/latest")]
//! Public API for the `qrstream` library.
//!
//! This crate moves payloads too large for one QR code between devices as
//! an animated sequence of codes. The [`encoder`] turns a payload into an
//! endless cycle of fragment strings for display, the [`decoder`] rebuilds
//! the payload from fragments read in any order, and the [`scanner`] sits
//! between a camera and its owner, telling single-shot codes apart from
//! fragments and releasing the camera once the scan ends.

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod fragment;
pub mod metrics;
pub mod scanner;

pub use decoder::{DecodeError, DecodeEvent, DecoderConfig, FragmentDecoder, ReassembledPayload};
pub use encoder::{EncoderError, FragmentEncoder, SizeError};
pub use error::{Error, Result};
pub use fragment::{Checksum, FragmentError, TransferConfig, decode_fragment, encode_fragment};
pub use metrics::{FRAGMENTS_EMITTED, FRAGMENTS_RECEIVED, TRANSFERS};
pub use scanner::{
    CaptureError,
    CaptureSource,
    ScanError,
    ScanFailure,
    ScanObserver,
    ScanPhase,
    Scanner,
    ScannerConfig,
};
