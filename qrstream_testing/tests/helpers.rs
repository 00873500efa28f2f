//! Integration coverage for `qrstream_testing` helpers.

use qrstream::{
    decoder::FragmentDecoder,
    scanner::{ScanError, ScanPhase, Scanner, ScannerConfig},
};
use qrstream_testing::{
    CounterSnapshot,
    MockCapture,
    RecordingObserver,
    ScanEvent,
    debugging_recorder_setup,
    feed_until_complete,
    one_cycle,
};

#[test]
fn one_cycle_covers_plain_and_mixed_parts() {
    let cycle = one_cycle(b"lightning:A", 4);
    assert_eq!(cycle.len(), 6);
    assert!(cycle[0].starts_with("UR:BYTES/1-3/"));
    assert!(cycle[5].starts_with("UR:BYTES/6-3/"));
}

#[test]
fn feed_until_complete_stops_at_the_payload() {
    let mut decoder = FragmentDecoder::default();
    let cycle = one_cycle(b"lightning:A", 4);
    let payload = feed_until_complete(&mut decoder, cycle.iter().map(String::as_str))
        .expect("valid transfer")
        .expect("complete within one cycle");
    assert_eq!(payload.as_bytes(), b"lightning:A");
}

#[test]
fn recording_observer_and_mock_capture_track_a_scan() {
    let (capture, releases) = MockCapture::new();
    let mut scanner = Scanner::new(capture, RecordingObserver::default(), ScannerConfig::default());
    scanner.cancel();

    assert_eq!(scanner.phase(), ScanPhase::Failed);
    assert_eq!(releases.count(), 1);
    let observer = scanner.observer();
    assert_eq!(observer.terminal_count(), 1);
    assert!(matches!(
        observer.events(),
        [ScanEvent::Failed(failure)] if failure.cause() == &ScanError::Cancelled
    ));
}

#[test]
fn counter_snapshot_reads_labelled_counters() {
    let (snapshotter, recorder) = debugging_recorder_setup();
    metrics::with_local_recorder(&recorder, || {
        qrstream::metrics::inc_transfers(qrstream::metrics::Outcome::Resolved);
    });
    let counters = CounterSnapshot::take(&snapshotter);
    assert_eq!(
        counters.value(qrstream::TRANSFERS, Some(("outcome", "resolved"))),
        1
    );
    assert_eq!(
        counters.value(qrstream::TRANSFERS, Some(("outcome", "failed"))),
        0
    );
}
