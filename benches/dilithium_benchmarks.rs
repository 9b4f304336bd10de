// Dilithium Cryptographic Benchmark Suite
//
// Benchmark Overview:
// This benchmark suite evaluates the performance characteristics of this
// crate's ML-DSA signature operations across NIST security levels 2, 3 and 5:
// - Key generation performance per level
// - Signing operation efficiency across message sizes
// - Signature verification speed across message sizes
// - End-to-end cryptographic cycle performance
//
// Benchmark Methodology:
// - Uses Criterion.rs for statistically rigorous performance measurements
// - Tests multiple message sizes to assess scalability
// - Uses black_box to prevent compiler optimizations from skewing results
//
// License: GNU General Public License v3.0

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dilithium::{keygen, sign, verify, Level};
use rand::{rngs::OsRng, RngCore};

const LEVELS: [Level; 3] = [Level::L2, Level::L3, Level::L5];

fn generate_random_message(size: usize) -> Vec<u8> {
    let mut msg = vec![0u8; size];
    OsRng.fill_bytes(&mut msg);
    msg
}

/// Benchmarks key generation for every security level.
///
/// - Sample size: 50 iterations per level
/// - Measures the computational cost of generating a key pair
fn bench_keygen(c: &mut Criterion) {
    let mut group = c.benchmark_group("Dilithium Key Generation");
    group.sample_size(50);

    for level in LEVELS {
        group.bench_with_input(BenchmarkId::new("keygen", level_name(level)), &level, |b, &level| {
            b.iter(|| black_box(keygen(level, None).unwrap()));
        });
    }

    group.finish();
}

/// Benchmarks signing across message sizes and security levels.
fn bench_signing(c: &mut Criterion) {
    let mut group = c.benchmark_group("Dilithium Signing");
    group.sample_size(50);

    let message_sizes = [32, 256, 1024, 4096];

    for level in LEVELS {
        let (_, sk) = keygen(level, None).unwrap();
        for size in message_sizes {
            let message = generate_random_message(size);
            group.bench_with_input(
                BenchmarkId::new(format!("sign/{}", level_name(level)), size),
                &message,
                |b, msg| {
                    b.iter(|| black_box(sign(level, &sk, msg).unwrap()));
                },
            );
        }
    }

    group.finish();
}

/// Benchmarks verification across message sizes and security levels.
fn bench_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("Dilithium Verification");
    group.sample_size(50);

    let message_sizes = [32, 256, 1024, 4096];

    for level in LEVELS {
        let (pk, sk) = keygen(level, None).unwrap();
        for size in message_sizes {
            let message = generate_random_message(size);
            let signature = sign(level, &sk, &message).unwrap();
            group.bench_with_input(
                BenchmarkId::new(format!("verify/{}", level_name(level)), size),
                &(message, signature),
                |b, (msg, sig)| {
                    b.iter(|| black_box(verify(level, &pk, msg, sig)));
                },
            );
        }
    }

    group.finish();
}

/// Benchmarks a full keygen + sign + verify cycle per level.
fn bench_full_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("Dilithium Full Cryptographic Cycle");
    group.sample_size(30);

    let message = generate_random_message(256);

    for level in LEVELS {
        group.bench_with_input(BenchmarkId::new("keygen+sign+verify", level_name(level)), &level, |b, &level| {
            b.iter(|| {
                let (pk, sk) = keygen(level, None).unwrap();
                let signature = sign(level, &sk, &message).unwrap();
                black_box(verify(level, &pk, &message, &signature))
            });
        });
    }

    group.finish();
}

fn level_name(level: Level) -> &'static str {
    match level {
        Level::L2 => "L2",
        Level::L3 => "L3",
        Level::L5 => "L5",
    }
}

criterion_group!(benches, bench_keygen, bench_signing, bench_verification, bench_full_cycle);
criterion_main!(benches);
