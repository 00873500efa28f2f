//! Async loop feeding a [`Scanner`] from a stream of captured strings.

use std::{future, pin::pin, time::Instant};

use futures::{Stream, StreamExt};
use tokio::{select, time::sleep_until};
use tokio_util::sync::CancellationToken;

use super::{CaptureError, CaptureSource, ScanObserver, ScanPhase, Scanner};

/// Drive `scanner` until it resolves or fails.
///
/// Each item of `frames` is one decoded read from the camera. An error item
/// fails the scan, as does the stream ending. Cancelling `cancel` cancels
/// the scan. Stall detection uses the tokio clock, so it follows paused time
/// in tests.
pub async fn run<C, O, S>(
    scanner: &mut Scanner<C, O>,
    frames: S,
    cancel: &CancellationToken,
) -> ScanPhase
where
    C: CaptureSource,
    O: ScanObserver,
    S: Stream<Item = Result<String, CaptureError>>,
{
    let mut frames = pin!(frames);

    while scanner.phase() == ScanPhase::Scanning {
        let deadline = scanner.stall_deadline();
        select! {
            biased;

            () = cancel.cancelled() => scanner.cancel(),
            () = wait_until(deadline) => {
                scanner.poll_stall_at(now());
            }
            frame = frames.next() => match frame {
                Some(Ok(raw)) => scanner.on_raw_string_at(&raw, now()),
                Some(Err(err)) => scanner.on_capture_error(err),
                None => scanner.on_capture_error(CaptureError::Closed),
            },
        }
    }

    scanner.phase()
}

fn now() -> Instant { tokio::time::Instant::now().into_std() }

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline.into()).await,
        None => future::pending().await,
    }
}
