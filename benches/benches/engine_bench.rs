//! # Engine Benchmarks
//!
//! Measures single-pattern pipeline latency and batch throughput.
//!
//! Run: `cargo bench --bench engine_bench`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use qfp_engine::{Engine, EngineConfig};
use qfp_tuner::ArchProfile;

fn make_pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 % 251) as u8).collect()
}

/// Benchmark process_one across pattern sizes
fn bench_process_one(c: &mut Criterion) {
    let engine = Engine::new(EngineConfig::default()).unwrap();
    let mut group = c.benchmark_group("process_one");

    for len in [4usize, 64, 256, 1024] {
        let pattern = make_pattern(len);
        group.throughput(Throughput::Bytes(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &pattern, |b, p| {
            b.iter(|| black_box(engine.process_one(p).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark batch throughput across batch sizes
fn bench_process_batch(c: &mut Criterion) {
    let engine = Engine::new(EngineConfig::default()).unwrap();
    let mut group = c.benchmark_group("process_batch");

    for count in [8usize, 64, 512] {
        let patterns: Vec<Vec<u8>> = (0..count).map(|i| make_pattern(32 + i % 64)).collect();
        let refs: Vec<&[u8]> = patterns.iter().map(|p| p.as_slice()).collect();

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &refs, |b, refs| {
            b.iter(|| black_box(engine.process_batch(refs)))
        });
    }

    group.finish();
}

/// Compare single-thread fallback profile against the detected host
fn bench_profile_impact(c: &mut Criterion) {
    let detected = Engine::new(EngineConfig::default()).unwrap();
    let fallback =
        Engine::with_profile(EngineConfig::default(), ArchProfile::fallback()).unwrap();

    let patterns: Vec<Vec<u8>> = (0..256).map(|i| make_pattern(48 + i % 32)).collect();
    let refs: Vec<&[u8]> = patterns.iter().map(|p| p.as_slice()).collect();

    let mut group = c.benchmark_group("profile_impact");
    group.bench_function("detected_profile", |b| {
        b.iter(|| black_box(detected.process_batch(&refs)))
    });
    group.bench_function("fallback_single_thread", |b| {
        b.iter(|| black_box(fallback.process_batch(&refs)))
    });
    group.finish();
}

criterion_group!(benches, bench_process_one, bench_process_batch, bench_profile_impact);
criterion_main!(benches);
