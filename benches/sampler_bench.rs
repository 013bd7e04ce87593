use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use perch::system::cpu::{CpuTicks, CpuTracker};
use perch::system::snapshot::bytes_to_gb;

fn make_tick_stream(n: usize) -> Vec<CpuTicks> {
    (0..n as u64)
        .map(|i| CpuTicks {
            user: 100 * i,
            nice: 3 * i,
            system: 40 * i,
            idle: 800 * i,
        })
        .collect()
}

fn bench_tracker(c: &mut Criterion) {
    let mut group = c.benchmark_group("cpu_tracker");
    for n in [60usize, 3600] {
        let stream = make_tick_stream(n);
        group.bench_with_input(BenchmarkId::new("observe", n), &stream, |b, stream| {
            b.iter(|| {
                let mut tracker = CpuTracker::new();
                let mut acc = 0.0;
                for ticks in stream {
                    acc += tracker.observe(Some(black_box(*ticks)));
                }
                acc
            })
        });
    }
    group.finish();
}

fn bench_conversions(c: &mut Criterion) {
    c.bench_function("bytes_to_gb", |b| {
        b.iter(|| bytes_to_gb(black_box(17_179_869_184)))
    });
}

criterion_group!(benches, bench_tracker, bench_conversions);
criterion_main!(benches);
