use buffered_pipeline::{
    handoff, multiple_of_three_filter, positive_filter, CancellationSignal, FilterStage,
    PipelineBuilder,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::thread;
use std::time::Duration;

fn run_to_completion(builder: PipelineBuilder, count: i64) -> usize {
    let pipeline = builder.build(CancellationSignal::new());
    let (tx, rx) = handoff::channel();
    let output = pipeline.run(rx);

    let feeder = thread::spawn(move || {
        for i in -count / 2..count / 2 {
            if tx.send(black_box(i)).is_err() {
                break;
            }
        }
    });

    let received = output.iter().count();
    let _ = feeder.join();
    received
}

fn benchmark_single_filter_throughput(c: &mut Criterion) {
    c.bench_function("single_filter_10000_values", |b| {
        b.iter(|| run_to_completion(PipelineBuilder::new().stage(positive_filter()), 10_000));
    });
}

fn benchmark_filter_chain_throughput(c: &mut Criterion) {
    c.bench_function("two_filter_chain_10000_values", |b| {
        b.iter(|| {
            run_to_completion(
                PipelineBuilder::new()
                    .stage(positive_filter())
                    .stage(multiple_of_three_filter()),
                10_000,
            )
        });
    });
}

fn benchmark_deep_chain_throughput(c: &mut Criterion) {
    c.bench_function("eight_stage_chain_10000_values", |b| {
        b.iter(|| {
            let builder = (0..8).fold(PipelineBuilder::new(), |builder, i| {
                builder.stage(FilterStage::new(format!("pass-{i}"), |_: i64| true))
            });
            run_to_completion(builder, 10_000)
        });
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(10))
        .sample_size(20);
    targets = benchmark_single_filter_throughput, benchmark_filter_chain_throughput, benchmark_deep_chain_throughput
);
criterion_main!(benches);
