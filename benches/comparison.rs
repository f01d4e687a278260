use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::collections::BTreeSet;
use veb_tree::VebTree;

const UNIVERSE: u64 = 1 << 24;

/// Benchmark insert with sequential keys
fn bench_insert_sequential(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_sequential");

    for size in [1_000u64, 10_000, 100_000].iter() {
        group.bench_with_input(BenchmarkId::new("VebTree", size), size, |b, &size| {
            b.iter(|| {
                let mut tree = VebTree::new(UNIVERSE).unwrap();
                for i in 0..size {
                    black_box(tree.insert(i).unwrap());
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("BTreeSet", size), size, |b, &size| {
            b.iter(|| {
                let mut btree = BTreeSet::new();
                for i in 0..size {
                    black_box(btree.insert(i));
                }
            });
        });
    }

    group.finish();
}

/// Benchmark insert with keys scattered across the universe
fn bench_insert_sparse(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_sparse");

    // Multiplicative stride spreads keys over every top-level cluster.
    let keys: Vec<u64> = (0..100_000u64)
        .map(|i| (i.wrapping_mul(2_654_435_761)) % UNIVERSE)
        .collect();

    group.bench_function("VebTree", |b| {
        b.iter(|| {
            let mut tree = VebTree::new(UNIVERSE).unwrap();
            for &key in &keys {
                black_box(tree.insert(key).unwrap());
            }
        });
    });

    group.bench_function("BTreeSet", |b| {
        b.iter(|| {
            let mut btree = BTreeSet::new();
            for &key in &keys {
                black_box(btree.insert(key));
            }
        });
    });

    group.finish();
}

/// Benchmark contains against a populated set
fn bench_contains(c: &mut Criterion) {
    let mut group = c.benchmark_group("contains");

    for size in [1_000u64, 100_000].iter() {
        group.bench_with_input(BenchmarkId::new("VebTree", size), size, |b, &size| {
            let mut tree = VebTree::new(UNIVERSE).unwrap();
            for i in 0..size {
                tree.insert(i * 2).unwrap();
            }

            let mut probe = 0u64;
            b.iter(|| {
                probe = (probe + 1) % (size * 2);
                black_box(tree.contains(probe));
            });
        });

        group.bench_with_input(BenchmarkId::new("BTreeSet", size), size, |b, &size| {
            let mut btree = BTreeSet::new();
            for i in 0..size {
                btree.insert(i * 2);
            }

            let mut probe = 0u64;
            b.iter(|| {
                probe = (probe + 1) % (size * 2);
                black_box(btree.contains(&probe));
            });
        });
    }

    group.finish();
}

/// Benchmark a full successor walk over the set
fn bench_successor_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("successor_walk");

    let size = 10_000u64;

    group.bench_function("VebTree", |b| {
        let mut tree = VebTree::new(UNIVERSE).unwrap();
        for i in 0..size {
            tree.insert(i * 37 % UNIVERSE).unwrap();
        }

        b.iter(|| {
            let mut current = tree.min();
            while let Some(key) = current {
                current = tree.successor(black_box(key));
            }
        });
    });

    group.bench_function("BTreeSet", |b| {
        let mut btree = BTreeSet::new();
        for i in 0..size {
            btree.insert(i * 37 % UNIVERSE);
        }

        b.iter(|| {
            for key in btree.iter() {
                black_box(key);
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_insert_sequential,
    bench_insert_sparse,
    bench_contains,
    bench_successor_walk
);
criterion_main!(benches);
