//! A composable, cancellable stream pipeline for integers.
//!
//! Stages run as independent worker threads connected by rendezvous channels,
//! so every hand-off blocks the producer until the consumer accepts the value.
//! One [`CancellationSignal`] is shared by every stage of a run; once raised,
//! no stage produces further output.
//!
//! # Features
//!
//! - Filtering stages built from plain predicates
//! - A buffering stage that retains the newest N values in a [`BoundedBuffer`]
//!   and re-emits them in order on a fixed timer
//! - Any `Fn(&CancellationSignal, Receiver<i64>) -> Receiver<i64>` closure is a stage
//! - Per-stage counters for forwarded, rejected, evicted and emitted values
//!
//! # Example
//!
//! ```ignore
//! use buffered_pipeline::{
//!     multiple_of_three_filter, positive_filter, sink, BufferStage, LineSource,
//!     PipelineBuilder, PipelineConfig,
//! };
//!
//! let (source, cancel) = LineSource::spawn(std::io::BufReader::new(std::io::stdin()))?;
//! let pipeline = PipelineBuilder::new()
//!     .stage(positive_filter())
//!     .stage(multiple_of_three_filter())
//!     .stage(BufferStage::from_config(&PipelineConfig::default()))
//!     .build(cancel.clone());
//!
//! let output = pipeline.run(source);
//! sink::consume(&cancel, &output, |v| println!("processed: {v}"));
//! ```

pub mod buffer;
pub mod buffer_stage;
pub mod cancel;
pub mod config;
pub mod error;
pub mod handoff;
pub mod logging;
pub mod metrics;
pub mod pipeline;
pub mod sink;
pub mod source;
pub mod stage;

// Re-exports for convenience
pub use buffer::{BoundedBuffer, PushOutcome};
pub use buffer_stage::{BufferStage, DrainTrigger};
pub use cancel::CancellationSignal;
pub use config::PipelineConfig;
pub use error::{PipelineError, Result};
pub use metrics::{BufferMetrics, BufferSnapshot, StageMetrics, StageSnapshot};
pub use pipeline::{Pipeline, PipelineBuilder};
pub use source::LineSource;
pub use stage::{multiple_of_three_filter, positive_filter, FilterStage, Stage};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
