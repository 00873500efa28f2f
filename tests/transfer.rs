//! End-to-end transfers between an encoder and a decoder.

use std::num::NonZeroUsize;

use qrstream::{
    decoder::{DecodeEvent, FragmentDecoder},
    encoder::{EncoderError, FragmentEncoder, SizeError},
    fragment::TransferConfig,
};
use qrstream_testing::{feed_until_complete, fragments, one_cycle};
use rstest::rstest;

#[test]
fn lightning_example_completes_without_the_first_plain_part() {
    let frames = fragments(b"lightning:A", 4, 4);
    let mut decoder = FragmentDecoder::default();

    assert!(matches!(decoder.receive(&frames[1]), Ok(DecodeEvent::Progress(_))));
    assert!(matches!(decoder.receive(&frames[2]), Ok(DecodeEvent::Progress(_))));
    let event = decoder.receive(&frames[3]).expect("mixed fragment accepted");

    let DecodeEvent::Complete(payload) = event else {
        panic!("expected completion, got {event:?}");
    };
    assert_eq!(payload.as_text(), Ok("lightning:A"));
}

#[test]
fn replaying_fragments_after_completion_changes_nothing() {
    let frames = one_cycle(b"cashuAeyJ0b2tlbiI6W3sicHJvb2ZzIjpbXX1dfQ", 8);
    let mut decoder = FragmentDecoder::default();
    let payload = feed_until_complete(&mut decoder, frames.iter().map(String::as_str))
        .expect("valid transfer")
        .expect("complete within one cycle");

    for raw in &frames {
        match decoder.receive(raw).expect("replay") {
            DecodeEvent::AlreadyComplete(again) => assert_eq!(again, payload),
            other => panic!("replay produced {other:?}"),
        }
    }
}

#[test]
fn a_foreign_transfer_replaces_partial_state() {
    let first = fragments(b"lnbc2500u1pvjluezpp5qqqsyqcyq5rqwzqf", 6, 3);
    let second = one_cycle(b"cashuAeyJ0b2tlbiI6", 6);
    let mut decoder = FragmentDecoder::default();

    for raw in &first {
        decoder.receive(raw).expect("first transfer");
    }
    let payload = feed_until_complete(&mut decoder, second.iter().map(String::as_str))
        .expect("second transfer")
        .expect("complete");
    assert_eq!(payload.as_bytes(), b"cashuAeyJ0b2tlbiI6");
}

#[test]
fn interleaved_transfers_never_merge() {
    let first = one_cycle(b"lnbc2500u1pvjluezpp5qqqsyqcyq5rqwzqf", 6);
    let second = one_cycle(b"lnbc9999u1pvjluezpp5zzzsyqcyq5rqwzqf", 6);
    let mut decoder = FragmentDecoder::default();

    // Alternating codes keep restarting the decoder, so neither completes.
    for (a, b) in first.iter().zip(&second) {
        decoder.receive(a).expect("first transfer");
        decoder.receive(b).expect("second transfer");
        assert!(!decoder.is_complete());
        assert!(decoder.resolved_parts().unwrap_or_default() <= 1);
    }
}

#[test]
fn ignored_strings_between_fragments_do_not_disturb_the_transfer() {
    let frames = one_cycle(b"lightning:A", 4);
    let mut decoder = FragmentDecoder::default();
    let mut noisy = Vec::new();
    for raw in &frames {
        noisy.push("https://example.com/menu".to_owned());
        noisy.push(raw.clone());
    }
    let payload = feed_until_complete(&mut decoder, noisy.iter().map(String::as_str))
        .expect("noise is not fatal")
        .expect("complete");
    assert_eq!(payload.as_bytes(), b"lightning:A");
}

fn bounded_encoder(max_payload: usize) -> FragmentEncoder {
    FragmentEncoder::new(
        TransferConfig::default()
            .max_chunk_len(NonZeroUsize::new(16).expect("non-zero"))
            .max_payload_len(NonZeroUsize::new(max_payload).expect("non-zero")),
    )
}

fn too_large(len: usize, limit: usize) -> SizeError {
    SizeError::TooLarge {
        len,
        limit: NonZeroUsize::new(limit).expect("non-zero"),
    }
}

#[rstest]
#[case(0, Some(SizeError::Empty))]
#[case(256, None)]
#[case(257, Some(too_large(257, 256)))]
fn payload_size_boundary(#[case] len: usize, #[case] expected: Option<SizeError>) {
    let mut encoder = bounded_encoder(256);
    let result = encoder.start(vec![b'q'; len]);
    match expected {
        None => {
            result.expect("payload at the limit is accepted");
            assert!(encoder.is_emitting());
        }
        Some(expected) => {
            assert!(matches!(result, Err(EncoderError::Size(err)) if err == expected));
            assert!(!encoder.is_emitting());
        }
    }
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(97)]
fn every_chunk_length_round_trips(#[case] chunk: usize) {
    let payload = concat!(
        "lnurl1dp68gurn8ghj7um9wfmxjcm99e3k7mf0v9cxj0m385ekvcenxc6r2c35xvukxefcv5mkvv34",
        "x5ekzd3ev56nyd3hxqurzepexejxxepnxscrvwfnv9nxzcn9xq6xyefhvgcxxcmyxymnserxfq5fns",
    )
    .as_bytes();
    let mut decoder = FragmentDecoder::default();
    let frames = one_cycle(payload, chunk);
    let recovered = feed_until_complete(&mut decoder, frames.iter().map(String::as_str))
        .expect("valid transfer")
        .expect("complete");
    assert_eq!(recovered.as_bytes(), payload);
}
