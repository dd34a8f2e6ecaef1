//! Benchmarks for the stat allocator.
//!
//! Every call scans all 4096 IV triples, so this dominates league setup.
//!
//! Run with:
//!   cargo bench --package pvp_engine --bench allocation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pvp_engine::allocation::{allocate, BaseStats, LevelRange};

fn bench_allocate(c: &mut Criterion) {
    let base = BaseStats::new(198, 189, 216);
    let mut group = c.benchmark_group("allocate");

    for cap in [Some(500), Some(1500), Some(2500), None] {
        let label = cap.map_or("uncapped".to_string(), |c| c.to_string());
        group.bench_with_input(BenchmarkId::from_parameter(label), &cap, |b, &cap| {
            b.iter(|| allocate(black_box(base), cap, 0, LevelRange::default()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_allocate);
criterion_main!(benches);
