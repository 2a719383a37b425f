use buffered_pipeline::BoundedBuffer;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;
use std::thread;

fn benchmark_push_with_eviction(c: &mut Criterion) {
    let buffer = BoundedBuffer::new(1024);
    c.bench_function("push_overwrite_full_1024", |b| {
        b.iter(|| {
            for i in 0..4096 {
                buffer.push(black_box(i));
            }
        });
    });
}

fn benchmark_drain(c: &mut Criterion) {
    let buffer = BoundedBuffer::new(1024);
    c.bench_function("fill_and_drain_1024", |b| {
        b.iter(|| {
            for i in 0..1024 {
                buffer.push(i);
            }
            black_box(buffer.drain_and_clear())
        });
    });
}

fn benchmark_contended_push_and_drain(c: &mut Criterion) {
    c.bench_function("four_pushers_one_drainer_10000_values", |b| {
        b.iter(|| {
            let buffer = Arc::new(BoundedBuffer::new(10));
            let pushers: Vec<_> = (0..4)
                .map(|p| {
                    let buffer = Arc::clone(&buffer);
                    thread::spawn(move || {
                        for i in 0..2500 {
                            buffer.push(p * 2500 + i);
                        }
                    })
                })
                .collect();
            let mut drained = 0;
            while pushers.iter().any(|h| !h.is_finished()) {
                drained += buffer.drain_and_clear().len();
            }
            for pusher in pushers {
                let _ = pusher.join();
            }
            black_box(drained + buffer.drain_and_clear().len())
        });
    });
}

criterion_group!(
    benches,
    benchmark_push_with_eviction,
    benchmark_drain,
    benchmark_contended_push_and_drain
);
criterion_main!(benches);
