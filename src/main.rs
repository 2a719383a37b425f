use buffered_pipeline::logging::init_logging;
use buffered_pipeline::{
    multiple_of_three_filter, positive_filter, sink, BufferStage, LineSource, PipelineBuilder,
    PipelineConfig,
};
use clap::Parser;
use std::io::{self, BufReader, Write};
use std::time::Duration;
use tracing::info;

/// Filter integers read from stdin and release them in timed batches
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of values retained between drains; older ones are overwritten
    #[arg(long, default_value_t = buffered_pipeline::config::DEFAULT_BUFFER_CAPACITY)]
    capacity: usize,

    /// Milliseconds between buffer drains
    #[arg(long, value_name = "MS", default_value_t = 10_000)]
    drain_period_ms: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging();

    let config = PipelineConfig::new()
        .with_buffer_capacity(cli.capacity)
        .with_drain_period(Duration::from_millis(cli.drain_period_ms));
    config.validate()?;

    println!("Enter integers, one per line. Type \"exit\" to quit.");
    let (source, cancel) = LineSource::spawn(BufReader::new(io::stdin()))?;

    let buffer = BufferStage::from_config(&config);
    let buffer_metrics = buffer.metrics().clone();
    let pipeline = PipelineBuilder::new()
        .stage(positive_filter())
        .stage(multiple_of_three_filter())
        .stage(buffer)
        .build(cancel.clone());

    let output = pipeline.run(source);
    let stdout = io::stdout();
    sink::consume(&cancel, &output, |value| {
        let mut out = stdout.lock();
        let _ = writeln!(out, "processed: {value}");
    });

    info!(stats = %buffer_metrics.snapshot().format(), "pipeline finished");
    Ok(())
}
