//! Properties of fragment strings as a QR renderer sees them.

use std::num::NonZeroUsize;

use qrstream::{
    encoder::FragmentEncoder,
    fragment::{TransferConfig, decode_fragment, is_fragment_string},
};
use qrstream_testing::one_cycle;
use rstest::rstest;

/// Characters of the QR alphanumeric mode.
const QR_ALPHANUMERIC: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

#[test]
fn fragments_fit_the_qr_alphanumeric_alphabet() {
    for raw in one_cycle(&[0xff; 300], 64) {
        assert!(
            raw.chars().all(|c| QR_ALPHANUMERIC.contains(c)),
            "{raw} leaves the alphanumeric alphabet"
        );
        assert!(is_fragment_string(&raw));
    }
}

#[rstest]
#[case(120)]
#[case(300)]
#[case(1000)]
fn budgeted_fragments_stay_within_capacity(#[case] capacity: usize) {
    let config = TransferConfig::for_fragment_budget(
        capacity,
        NonZeroUsize::new(8192).expect("non-zero"),
    )
    .expect("capacity covers the overhead");
    assert!(config.encoded_fragment_ceiling() <= capacity);

    let mut encoder = FragmentEncoder::new(config);
    encoder.start(vec![0xa5; 4000]).expect("start");
    let cycle = encoder.cycle_len().expect("started");
    for _ in 0..cycle {
        let raw = encoder.next().expect("next");
        assert!(raw.len() <= capacity, "{} > {capacity}", raw.len());
    }
}

#[test]
fn tiny_capacity_is_rejected() {
    assert!(TransferConfig::for_fragment_budget(20, NonZeroUsize::MIN).is_none());
}

#[rstest]
#[case("UR:BYTES/1-3/")]
#[case("ur:bytes/0-3/AAAA")]
#[case("ur:bytes/1-0/AAAA")]
#[case("ur:bytes/1-3")]
#[case("ur:bytes/one-3/AAAA")]
fn malformed_routes_are_rejected(#[case] raw: &str) {
    let err = decode_fragment(raw).expect_err("malformed");
    assert!(!err.is_unsupported());
}

#[test]
fn tampered_body_fails_the_frame_check() {
    let raw = one_cycle(b"lightning:A", 4).remove(0);
    let (prefix, body) = raw.rsplit_once('/').expect("route");
    let mut body: Vec<char> = body.chars().collect();
    body[2] = if body[2] == 'A' { 'B' } else { 'A' };
    let tampered = format!("{prefix}/{}", body.into_iter().collect::<String>());
    assert!(decode_fragment(&tampered).is_err());
}
