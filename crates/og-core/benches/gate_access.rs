//! Post-construction access cost of the gate policies.
//!
//! After the one-time construction, `LockedGate` pays a mutex round-trip per
//! access while `DeferredGate` pays an atomic load; this benchmark makes the
//! difference visible.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use og_core::{DeferredGate, LockedGate};

fn bench_post_construction_access(c: &mut Criterion) {
    let locked: LockedGate<u64> = LockedGate::new();
    locked.get_or_init(|| 42);
    let deferred: DeferredGate<u64> = DeferredGate::new();
    deferred.get_or_init(|| 42);

    let mut group = c.benchmark_group("post_construction_access");
    group.bench_function("locked", |b| {
        b.iter(|| black_box(locked.get_or_init(|| 42)))
    });
    group.bench_function("deferred", |b| {
        b.iter(|| black_box(deferred.get_or_init(|| 42)))
    });
    group.finish();
}

criterion_group!(benches, bench_post_construction_access);
criterion_main!(benches);
