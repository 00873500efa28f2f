//! Frame codec for animated QR transfers.
//!
//! This module collects the pure building blocks shared by the encoder and
//! decoder: splitting payloads into plain parts, mixing parts into redundancy
//! fragments, and converting fragments to and from their QR-ready text form.
//! Nothing here holds state across calls.

pub mod checksum;
pub mod config;
pub mod error;
pub mod fragmenter;
pub mod header;
pub mod index;
pub mod mixing;
pub mod wire;

pub use checksum::Checksum;
pub use config::TransferConfig;
pub use error::{FragmentError, FragmentationError};
pub use fragmenter::{Fragment, FragmentPlan, combine, split, xor_into};
pub use header::FragmentHeader;
pub use index::SequenceIndex;
pub use wire::{SCHEME, TRANSFER_TYPE, decode_fragment, encode_fragment, is_fragment_string};
