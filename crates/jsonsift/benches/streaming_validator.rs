//! Benchmark – `jsonsift::StreamingValidator`
#![allow(missing_docs)]

use std::{fmt::Write, time::Duration};

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use jsonsift::StreamingValidator;

/// A long string member; exercises the plain-ASCII string fast path.
fn make_string_payload(target_len: usize) -> String {
    let overhead = "{\"data\":\"\"}".len();
    assert!(target_len >= overhead, "target_len must be >= {overhead}");

    let mut s = String::with_capacity(target_len);
    s.push_str("{\"data\":\"");
    s.extend(std::iter::repeat_n('a', target_len - overhead));
    s.push_str("\"}");
    debug_assert_eq!(s.len(), target_len);
    s
}

/// An array of small records mixing every token kind.
fn make_mixed_payload(target_len: usize) -> String {
    let mut s = String::from("[");
    let mut i = 0u32;
    while s.len() < target_len {
        if i > 0 {
            s.push(',');
        }
        write!(
            s,
            r#"{{"id":{i},"score":-{i}.5e-3,"ok":true,"tag":"café ☕","n":null,"xs":[1,2,3]}}"#
        )
        .expect("writing to a String cannot fail");
        i += 1;
    }
    s.push(']');
    s
}

fn run_validator(payload: &[u8], parts: usize) -> bool {
    assert!(parts > 0);
    let chunk_size = payload.len().div_ceil(parts);

    let mut validator = StreamingValidator::default();
    for chunk in payload.chunks(chunk_size) {
        if validator.feed(chunk).is_err() {
            return false;
        }
    }
    validator.finish().is_ok()
}

fn bench_streaming_validator(c: &mut Criterion) {
    let payloads = [
        ("string", make_string_payload(100_000)),
        ("mixed", make_mixed_payload(100_000)),
    ];

    let mut group = c.benchmark_group("streaming_validator_split");
    for (name, payload) in &payloads {
        group.throughput(Throughput::Bytes(payload.len() as u64));
        for &parts in &[1usize, 100, 10_000] {
            group.bench_with_input(BenchmarkId::new(*name, parts), &parts, |b, &parts| {
                b.iter(|| {
                    let ok = run_validator(black_box(payload.as_bytes()), parts);
                    assert!(black_box(ok));
                });
            });
        }
    }
    group.finish();
}

fn criterion() -> Criterion {
    let mut c = Criterion::default();
    if cfg!(feature = "bench-fast") {
        c = c
            .warm_up_time(Duration::from_millis(10))
            .measurement_time(Duration::from_millis(100))
            .sample_size(10);
    } else {
        c = c
            .warm_up_time(Duration::from_secs(3))
            .measurement_time(Duration::from_secs(5));
    }
    c
}

criterion_group! { name = benches; config = criterion(); targets = bench_streaming_validator }
criterion_main!(benches);
