//! Implementations of the `qrstream` subcommands.

use std::{io::Write, time::Duration};

use futures::{Stream, stream};
use qrstream::{
    Result,
    decoder::DecoderConfig,
    encoder::{FragmentEncoder, animate},
    error::Error,
    fragment::TransferConfig,
    scanner::{self, CaptureError, CaptureSource, ScanFailure, ScanObserver, Scanner, ScannerConfig},
};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader, stdin};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::cli::{Command, DecodeArgs, EncodeArgs};

pub async fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Encode(args) => encode(args).await,
        Command::Decode(args) => decode(args).await,
    }
}

async fn encode(args: EncodeArgs) -> Result<()> {
    let payload = match args.payload {
        Some(payload) => payload.into_bytes(),
        None => read_stdin().await?,
    };
    let config = match args.qr_capacity {
        Some(chars) => TransferConfig::for_fragment_budget(chars, args.max_payload_len)
            .ok_or(Error::FragmentBudget(chars))?,
        None => TransferConfig::default()
            .max_chunk_len(args.chunk_len)
            .max_payload_len(args.max_payload_len),
    };
    let mut encoder = FragmentEncoder::new(config);
    encoder.start(&payload)?;

    if let Some(interval) = args.interval_ms {
        let cancel = CancellationToken::new();
        let stop = cancel.clone();
        let limit = args.frames;
        let mut printed = 0_u64;
        animate(
            &mut encoder,
            Duration::from_millis(interval),
            &cancel,
            |fragment| {
                println!("{fragment}");
                printed += 1;
                if limit.is_some_and(|limit| printed >= limit) {
                    stop.cancel();
                }
            },
        )
        .await?;
        return Ok(());
    }

    let frames = args
        .frames
        .or_else(|| encoder.cycle_len())
        .unwrap_or_default();
    let mut stdout = std::io::stdout().lock();
    for _ in 0..frames {
        writeln!(stdout, "{}", encoder.next()?)?;
    }
    Ok(())
}

/// Read the whole of stdin, dropping one trailing line break.
async fn read_stdin() -> Result<Vec<u8>> {
    let mut payload = Vec::new();
    stdin().read_to_end(&mut payload).await?;
    if payload.ends_with(b"\n") {
        payload.pop();
        if payload.ends_with(b"\r") {
            payload.pop();
        }
    }
    Ok(payload)
}

async fn decode(args: DecodeArgs) -> Result<()> {
    let decoder = DecoderConfig::default()
        .strict(args.strict)
        .max_payload_len(args.max_payload_len);
    let stall = (args.stall_secs > 0).then(|| Duration::from_secs(args.stall_secs));
    let config = ScannerConfig::default()
        .decoder(decoder)
        .stall_timeout(stall);

    let mut scanner = Scanner::new(StdinCapture, Terminal::default(), config);
    let cancel = CancellationToken::new();
    let phase = scanner::run(&mut scanner, stdin_lines(), &cancel).await;
    debug!(%phase, "scan finished");

    match scanner.observer_mut().outcome.take() {
        Some(Ok(payload)) => {
            println!("{payload}");
            Ok(())
        }
        Some(Err(failure)) => Err(failure.into()),
        None => Err(ScanFailure::new(scanner::ScanError::Cancelled).into()),
    }
}

fn stdin_lines() -> impl Stream<Item = std::result::Result<String, CaptureError>> {
    stream::unfold(BufReader::new(stdin()).lines(), |mut lines| async move {
        match lines.next_line().await {
            Ok(Some(line)) => Some((Ok(line), lines)),
            Ok(None) => None,
            Err(err) => Some((Err(CaptureError::Other(err.to_string())), lines)),
        }
    })
}

/// Standard input stands in for the camera.
struct StdinCapture;

impl CaptureSource for StdinCapture {
    fn release(&mut self) { debug!("stopped reading stdin"); }
}

#[derive(Default)]
struct Terminal {
    outcome: Option<std::result::Result<String, ScanFailure>>,
}

impl ScanObserver for Terminal {
    fn on_resolved(&mut self, payload: String) { self.outcome = Some(Ok(payload)); }

    fn on_failed(&mut self, failure: ScanFailure) { self.outcome = Some(Err(failure)); }

    fn on_progress(&mut self, fraction: f64) {
        info!(percent = (fraction * 100.0).round(), "transfer progress");
    }
}
