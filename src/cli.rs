//! Command line interface for the `qrstream` binary.
//!
//! Kept free of library imports so the build script can render a man page
//! from it.

use std::num::NonZeroUsize;

use clap::{Args, Parser, Subcommand};

/// Command line arguments for the `qrstream` binary.
#[derive(Debug, Parser)]
#[command(
    name = "qrstream",
    version,
    about = "Split payloads into animated QR fragments and put them back together"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the fragment strings that animate a payload.
    Encode(EncodeArgs),
    /// Read scanned strings from stdin, one per line, and print the payload.
    Decode(DecodeArgs),
}

#[derive(Debug, Args)]
pub struct EncodeArgs {
    /// Payload to encode. Read from stdin when omitted.
    pub payload: Option<String>,
    /// Maximum payload bytes carried by one fragment.
    #[arg(long, default_value = "100")]
    pub chunk_len: NonZeroUsize,
    /// Derive the chunk length from the characters one QR code can hold.
    #[arg(long, value_name = "CHARS", conflicts_with = "chunk_len")]
    pub qr_capacity: Option<usize>,
    /// Largest payload accepted, in bytes.
    #[arg(long, default_value = "65536")]
    pub max_payload_len: NonZeroUsize,
    /// Number of fragments to print. Defaults to one full cycle, or forever
    /// when animating.
    #[arg(short = 'n', long)]
    pub frames: Option<u64>,
    /// Print one fragment every MS milliseconds, like an animated display.
    #[arg(long, value_name = "MS")]
    pub interval_ms: Option<u64>,
}

#[derive(Debug, Args)]
pub struct DecodeArgs {
    /// Fail on the first line that is not a valid fragment.
    #[arg(long)]
    pub strict: bool,
    /// Seconds a transfer may go without progress. Zero waits forever.
    #[arg(long, default_value_t = 30)]
    pub stall_secs: u64,
    /// Largest payload accepted, in bytes.
    #[arg(long, default_value = "65536")]
    pub max_payload_len: NonZeroUsize,
}
