//! Performance benchmarks for the event store.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tailstore::{Event, EventStore};

fn populated_store(size: i64) -> EventStore {
    let store = EventStore::new();
    for t in 1..=size {
        store.insert(Event::new("metric", t)).unwrap();
    }
    store
}

/// Benchmark appending in timestamp order versus reverse order
fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    for size in [1_000i64, 10_000] {
        group.bench_with_input(BenchmarkId::new("in_order", size), &size, |b, &size| {
            b.iter(|| black_box(populated_store(size)));
        });

        group.bench_with_input(BenchmarkId::new("reverse_order", size), &size, |b, &size| {
            b.iter(|| {
                let store = EventStore::new();
                for t in (1..=size).rev() {
                    store.insert(Event::new("metric", t)).unwrap();
                }
                black_box(store)
            });
        });
    }

    group.finish();
}

/// Benchmark a recent-window query over growing partitions
fn bench_query_window(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_window");

    for size in [1_000i64, 100_000] {
        let store = populated_store(size);
        group.bench_with_input(BenchmarkId::new("last_100", size), &size, |b, &size| {
            b.iter(|| {
                let sum: i64 = store
                    .query("metric", size - 100, size + 1)
                    .unwrap()
                    .map(|e| e.timestamp())
                    .sum();
                black_box(sum)
            });
        });
    }

    group.finish();
}

/// Benchmark draining a partition through the iterator
fn bench_drain(c: &mut Criterion) {
    c.bench_function("drain_newer_half_10k", |b| {
        b.iter_with_setup(
            || populated_store(10_000),
            |store| {
                // Drain the newer half; each removal only shifts the tail.
                let mut it = store.query("metric", 5_001, 10_001).unwrap();
                while it.move_next() {
                    black_box(it.remove().unwrap());
                }
                it.close();
                store
            },
        );
    });
}

criterion_group!(benches, bench_insert, bench_query_window, bench_drain);
criterion_main!(benches);
