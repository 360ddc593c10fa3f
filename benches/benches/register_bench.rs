//! # Register Benchmarks
//!
//! Measures gate application and norm-reduction cost across register
//! sizes.
//!
//! Run: `cargo bench --bench register_bench`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use qfp_core::{Gate, Register, norm_sqr_sum_auto, norm_sqr_sum_scalar};

/// Benchmark single-gate application by qubit count
fn bench_gate_application(c: &mut Criterion) {
    let mut group = c.benchmark_group("gate_application");

    for qubits in [4u8, 8, 12, 16] {
        group.throughput(Throughput::Elements(1 << qubits));

        group.bench_with_input(BenchmarkId::new("hadamard", qubits), &qubits, |b, &n| {
            let mut reg = Register::new(n, 20).unwrap();
            b.iter(|| {
                reg.apply(Gate::Hadamard(0)).unwrap();
                black_box(reg.amplitudes()[0]);
            })
        });

        group.bench_with_input(BenchmarkId::new("controlled_phase", qubits), &qubits, |b, &n| {
            let mut reg = Register::new(n, 20).unwrap();
            reg.apply(Gate::Hadamard(0)).unwrap();
            b.iter(|| {
                reg.apply(Gate::ControlledPhase {
                    control: 0,
                    target: (n - 1) as usize,
                    angle: 0.37,
                })
                .unwrap();
                black_box(reg.amplitudes()[0]);
            })
        });
    }

    group.finish();
}

/// Benchmark SIMD vs scalar norm reduction
fn bench_norm_reduction(c: &mut Criterion) {
    let mut group = c.benchmark_group("norm_reduction");

    for qubits in [8u8, 12, 16] {
        let mut reg = Register::new(qubits, 20).unwrap();
        for q in 0..qubits as usize {
            reg.apply(Gate::Hadamard(q)).unwrap();
        }
        let amps = reg.amplitudes().to_vec();

        group.throughput(Throughput::Elements(amps.len() as u64));
        group.bench_with_input(BenchmarkId::new("scalar", qubits), &amps, |b, amps| {
            b.iter(|| black_box(norm_sqr_sum_scalar(amps)))
        });
        group.bench_with_input(BenchmarkId::new("auto", qubits), &amps, |b, amps| {
            b.iter(|| black_box(norm_sqr_sum_auto(amps)))
        });
    }

    group.finish();
}

/// Benchmark encode + reset reuse path
fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    let pattern: Vec<u8> = (0..=255u8).collect();
    let mut reg = Register::new(8, 20).unwrap();

    group.bench_function("encode_256_bytes", |b| {
        b.iter(|| {
            reg.reset_to(8).unwrap();
            reg.encode(black_box(&pattern)).unwrap();
        })
    });

    group.finish();
}

criterion_group!(benches, bench_gate_application, bench_norm_reduction, bench_encode);
criterion_main!(benches);
