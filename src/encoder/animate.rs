//! Timer-driven emission of fragment strings.

use std::time::Duration;

use tokio::{
    select,
    time::{MissedTickBehavior, interval},
};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::{EncoderError, FragmentEncoder};

/// Shortest period accepted by [`animate`].
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Hand a fragment to `render` every `period` until `cancel` fires.
///
/// The first fragment is rendered immediately. Ticks missed while `render`
/// runs are skipped rather than bunched up, so a slow renderer lowers the
/// frame rate instead of bursting. Returns the number of fragments rendered.
///
/// # Errors
///
/// Returns [`EncoderError::Idle`] if the encoder has no payload, or any
/// encoding error raised by [`FragmentEncoder::next`].
pub async fn animate<F>(
    encoder: &mut FragmentEncoder,
    period: Duration,
    cancel: &CancellationToken,
    mut render: F,
) -> Result<u64, EncoderError>
where
    F: FnMut(String),
{
    if !encoder.is_emitting() {
        return Err(EncoderError::Idle);
    }
    let mut ticker = interval(period.max(MIN_PERIOD));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut rendered = 0_u64;

    loop {
        select! {
            biased;

            () = cancel.cancelled() => break,
            _ = ticker.tick() => {
                render(encoder.next()?);
                rendered += 1;
            }
        }
    }

    debug!(rendered, "animation stopped");
    Ok(rendered)
}
