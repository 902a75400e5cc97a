use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use trc_ring::Ring;

const ITEMS: u64 = 1_000_000;

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("ring_add");
    group.throughput(Throughput::Elements(ITEMS));

    for capacity in [64usize, 1024, 8192] {
        group.bench_with_input(BenchmarkId::from_parameter(capacity), &capacity, |b, &cap| {
            let ring: Ring<u64> = Ring::new(cap);
            b.iter(|| {
                for i in 0..ITEMS {
                    black_box(ring.add(i));
                }
            });
        });
    }
    group.finish();
}

fn bench_walk(c: &mut Criterion) {
    let ring: Ring<u64> = Ring::new(1024);
    for i in 0..1024 {
        ring.add(i);
    }
    c.bench_function("ring_walk_1024", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            ring.walk(|v| {
                sum += *v;
                None::<()>
            });
            black_box(sum);
        });
    });
}

criterion_group!(benches, bench_add, bench_walk);
criterion_main!(benches);
