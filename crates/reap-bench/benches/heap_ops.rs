//! Criterion micro-benchmarks for deferred-destruction heap operations.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use reap_arena::Lazy;
use reap_bench::{frame_profile, heap_for, Job};

/// Defer `n` jobs, then drain the whole batch.
fn bench_defer_then_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("defer_then_drain");
    for n in [16u64, 64, 100] {
        group.bench_function(format!("{n}_jobs"), |b| {
            let heap = heap_for(frame_profile());
            b.iter(|| {
                for seq in 0..n {
                    drop(Lazy::new_in(&heap, Job::new(black_box(seq))));
                }
                heap.clear();
            });
        });
    }
    group.finish();
}

/// Baseline: destroy the same jobs synchronously, no deferral.
fn bench_immediate_drop(c: &mut Criterion) {
    let mut group = c.benchmark_group("immediate_drop");
    for n in [16u64, 64, 100] {
        group.bench_function(format!("{n}_jobs"), |b| {
            b.iter(|| {
                for seq in 0..n {
                    drop(Job::new(black_box(seq)));
                }
            });
        });
    }
    group.finish();
}

/// Worst case: an arena too small for anything, every submission falling
/// back to immediate destruction.
fn bench_overflow_fallback(c: &mut Criterion) {
    c.bench_function("overflow_fallback/64_jobs", |b| {
        let heap = heap_for(reap_arena::HeapConfig::new(16));
        b.iter(|| {
            for seq in 0..64u64 {
                drop(Lazy::new_in(&heap, Job::new(black_box(seq))));
            }
            heap.clear();
        });
    });
}

/// Mixed workload: random interleaving of submissions and single dequeues,
/// deterministic across runs.
fn bench_mixed_workload(c: &mut Criterion) {
    c.bench_function("mixed_workload/256_ops", |b| {
        let heap = heap_for(frame_profile());
        b.iter(|| {
            let mut rng = ChaCha8Rng::seed_from_u64(42);
            for seq in 0..256u64 {
                if rng.random_range(0..4u32) == 0 {
                    heap.dequeue();
                } else {
                    drop(Lazy::new_in(&heap, Job::new(seq)));
                }
            }
            heap.clear();
        });
    });
}

criterion_group!(
    benches,
    bench_defer_then_drain,
    bench_immediate_drop,
    bench_overflow_fallback,
    bench_mixed_workload
);
criterion_main!(benches);
