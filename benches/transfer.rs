//! Criterion benchmarks for fragment encoding and payload reassembly.
//!
//! Covers emitting one full fragment cycle and decoding a payload from an
//! in-order cycle, for small and large payloads.

use std::{hint::black_box, num::NonZeroUsize};

use criterion::{BenchmarkId, Criterion, Throughput};
use qrstream::{
    decoder::{DecoderConfig, FragmentDecoder, PayloadEncoding},
    encoder::FragmentEncoder,
    fragment::TransferConfig,
};

const PAYLOAD_LENS: [usize; 3] = [64, 1024, 16 * 1024];
const CHUNK_LEN: usize = 128;

fn payload(len: usize) -> Vec<u8> {
    (0..len).map(|i| u8::try_from(i % 251).unwrap_or_default()).collect()
}

fn started_encoder(payload: &[u8]) -> FragmentEncoder {
    let chunk = NonZeroUsize::new(CHUNK_LEN).unwrap_or(NonZeroUsize::MIN);
    let mut encoder = FragmentEncoder::new(TransferConfig::default().max_chunk_len(chunk));
    if let Err(err) = encoder.start(payload) {
        panic!("benchmark payload rejected: {err}");
    }
    encoder
}

fn cycle(payload: &[u8]) -> Vec<String> {
    let mut encoder = started_encoder(payload);
    let len = encoder.cycle_len().unwrap_or_default();
    (0..len)
        .map(|_| match encoder.next() {
            Ok(raw) => raw,
            Err(err) => panic!("benchmark encoder failed: {err}"),
        })
        .collect()
}

fn benchmark_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("transfer/encode_cycle");
    for len in PAYLOAD_LENS {
        let payload = payload(len);
        group.throughput(Throughput::Bytes(len as u64));
        group.bench_function(BenchmarkId::from_parameter(len), |b| {
            b.iter(|| black_box(cycle(&payload)));
        });
    }
    group.finish();
}

fn benchmark_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("transfer/decode");
    let config = DecoderConfig::default().encoding(PayloadEncoding::Binary);
    for len in PAYLOAD_LENS {
        let frames = cycle(&payload(len));
        group.throughput(Throughput::Bytes(len as u64));
        group.bench_function(BenchmarkId::from_parameter(len), |b| {
            b.iter(|| {
                let mut decoder = FragmentDecoder::new(config);
                for raw in &frames {
                    if matches!(decoder.receive(raw), Ok(event) if event.is_complete()) {
                        break;
                    }
                }
                black_box(decoder.is_complete())
            });
        });
    }
    group.finish();
}

/// Entrypoint for transfer benchmarks.
fn main() {
    let mut criterion = Criterion::default().configure_from_args();
    benchmark_encode(&mut criterion);
    benchmark_decode(&mut criterion);
    criterion.final_summary();
}
