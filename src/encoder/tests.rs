//! Unit tests for the fragment encoder and its animation driver.

use std::{num::NonZeroUsize, time::Duration};

use rstest::{fixture, rstest};
use tokio_util::sync::CancellationToken;

use super::*;
use crate::fragment::{decode_fragment, mixing::part_indices};

fn config(chunk: usize, max_payload: usize) -> TransferConfig {
    TransferConfig::default()
        .max_chunk_len(NonZeroUsize::new(chunk).expect("non-zero"))
        .max_payload_len(NonZeroUsize::new(max_payload).expect("non-zero"))
}

#[fixture]
fn lightning_encoder() -> FragmentEncoder {
    let mut encoder = FragmentEncoder::new(config(4, 64));
    encoder.start(b"lightning:A").expect("start encoder");
    encoder
}

#[test]
fn idle_encoder_refuses_to_emit() {
    let mut encoder = FragmentEncoder::default();
    assert!(matches!(encoder.next(), Err(EncoderError::Idle)));
    assert!(!encoder.is_emitting());
    assert_eq!(encoder.position(), None);
}

#[rstest]
fn emits_plain_parts_before_mixed_parts(mut lightning_encoder: FragmentEncoder) {
    let fragments: Vec<_> = (0..6)
        .map(|_| {
            let raw = lightning_encoder.next().expect("next fragment");
            decode_fragment(&raw).expect("decodable fragment")
        })
        .collect();

    assert_eq!(fragments[0].data(), b"ligh");
    assert_eq!(fragments[1].data(), b"tnin");
    assert_eq!(fragments[2].data(), b"g:A\0");
    for fragment in &fragments[3..] {
        assert!(fragment.header().is_mixed());
    }
    assert_eq!(fragments[3].part_indices(), vec![0, 1]);
}

#[rstest]
fn cycle_repeats_plain_parts_indefinitely(mut lightning_encoder: FragmentEncoder) {
    let cycle = lightning_encoder.cycle_len().expect("started");
    assert_eq!(cycle, 6);
    let raw: Vec<String> = (0..cycle * 3)
        .map(|_| lightning_encoder.next().expect("next fragment"))
        .collect();

    for round in 0..3 {
        let start = usize::try_from(round * cycle).expect("small index");
        for part in 0..3 {
            let fragment = decode_fragment(&raw[start + part]).expect("decodable fragment");
            assert_eq!(fragment.part_indices(), vec![part]);
        }
    }
}

#[rstest]
fn fragments_share_checksum_and_count(mut lightning_encoder: FragmentEncoder) {
    let checksum = lightning_encoder.checksum().expect("started");
    for _ in 0..10 {
        let fragment =
            decode_fragment(&lightning_encoder.next().expect("next")).expect("decodable");
        assert_eq!(fragment.header().checksum(), checksum);
        assert_eq!(fragment.header().sequence_count(), 3);
    }
}

#[rstest]
fn mixed_data_matches_the_mixing_policy(mut lightning_encoder: FragmentEncoder) {
    for raw in 0..12_u32 {
        let fragment =
            decode_fragment(&lightning_encoder.next().expect("next")).expect("decodable");
        assert_eq!(fragment.header().sequence_index(), SequenceIndex::new(raw));
        assert_eq!(
            fragment.part_indices(),
            part_indices(SequenceIndex::new(raw), 3)
        );
    }
}

#[test]
fn empty_payload_is_a_size_error() {
    let mut encoder = FragmentEncoder::new(config(4, 16));
    assert!(matches!(
        encoder.start([]),
        Err(EncoderError::Size(SizeError::Empty))
    ));
    assert!(!encoder.is_emitting());
}

#[rstest]
#[case(16, true)]
#[case(17, false)]
fn payload_size_boundary(#[case] len: usize, #[case] accepted: bool) {
    let mut encoder = FragmentEncoder::new(config(4, 16));
    let result = encoder.start(vec![b'x'; len]);
    assert_eq!(result.is_ok(), accepted);
    if !accepted {
        assert!(matches!(
            result,
            Err(EncoderError::Size(SizeError::TooLarge { len: 17, .. }))
        ));
    }
    assert_eq!(encoder.is_emitting(), accepted);
}

#[rstest]
fn rejected_start_discards_the_previous_payload(mut lightning_encoder: FragmentEncoder) {
    lightning_encoder.next().expect("next");
    let result = lightning_encoder.start(vec![b'x'; 65]);
    assert!(matches!(
        result,
        Err(EncoderError::Size(SizeError::TooLarge { len: 65, .. }))
    ));
    assert!(!lightning_encoder.is_emitting());
    assert_eq!(lightning_encoder.checksum(), None);
    assert!(matches!(lightning_encoder.next(), Err(EncoderError::Idle)));
}

#[rstest]
fn empty_restart_leaves_the_encoder_idle(mut lightning_encoder: FragmentEncoder) {
    assert!(lightning_encoder.start([]).is_err());
    assert!(!lightning_encoder.is_emitting());
    assert_eq!(lightning_encoder.position(), None);
}

#[rstest]
fn start_restarts_the_cycle(mut lightning_encoder: FragmentEncoder) {
    for _ in 0..4 {
        lightning_encoder.next().expect("next");
    }
    lightning_encoder.start(b"cashuA").expect("restart");
    assert_eq!(lightning_encoder.position(), Some(SequenceIndex::zero()));
    let first = decode_fragment(&lightning_encoder.next().expect("next")).expect("decodable");
    assert_eq!(first.data(), b"cas");
}

#[rstest]
fn reset_returns_to_idle(mut lightning_encoder: FragmentEncoder) {
    lightning_encoder.reset();
    assert!(!lightning_encoder.is_emitting());
    assert_eq!(lightning_encoder.checksum(), None);
    assert!(matches!(lightning_encoder.next(), Err(EncoderError::Idle)));
}

#[test]
fn single_part_payload_repeats_one_fragment() {
    let mut encoder = FragmentEncoder::new(config(32, 64));
    encoder.start(b"lnbc1").expect("start");
    assert!(encoder.is_single_frame());

    let first = encoder.next().expect("next");
    for _ in 0..5 {
        assert_eq!(encoder.next().expect("next"), first);
    }
}

#[tokio::test(start_paused = true)]
async fn animate_renders_on_each_tick_until_cancelled() {
    let mut encoder = FragmentEncoder::new(config(4, 64));
    encoder.start(b"lightning:A").expect("start");
    let cancel = CancellationToken::new();
    let mut rendered = Vec::new();

    let stopper = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(450)).await;
        stopper.cancel();
    });

    let count = animate(
        &mut encoder,
        Duration::from_millis(100),
        &cancel,
        |raw| rendered.push(raw),
    )
    .await
    .expect("animation runs");

    // Ticks at 0, 100, 200, 300 and 400 ms.
    assert_eq!(count, 5);
    assert_eq!(rendered.len(), 5);
    assert!(rendered[0].starts_with("UR:BYTES/1-3/"));
    assert!(rendered[4].starts_with("UR:BYTES/5-3/"));
}

#[tokio::test(start_paused = true)]
async fn animate_requires_a_started_encoder() {
    let mut encoder = FragmentEncoder::default();
    let cancel = CancellationToken::new();
    let result = animate(&mut encoder, Duration::from_millis(10), &cancel, |_| {}).await;
    assert!(matches!(result, Err(EncoderError::Idle)));
}
