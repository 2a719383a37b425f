use crate::buffer::{BoundedBuffer, PushOutcome};
use crate::cancel::CancellationSignal;
use crate::config::PipelineConfig;
use crate::handoff::{self, forward};
use crate::metrics::BufferMetrics;
use crate::stage::{spawn_worker, Stage};
use crossbeam::channel::{self, Receiver};
use crossbeam::select;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// What makes the drain worker empty the buffer
#[derive(Debug, Clone)]
pub enum DrainTrigger {
    /// Drain after each full period; the timer restarts once a batch is delivered
    Every(Duration),
    /// Drain whenever a tick arrives; a closed receiver stops further drains
    External(Receiver<Instant>),
}

/// Retains up to `capacity` values and re-emits them in batches.
///
/// Each launch owns a fresh [`BoundedBuffer`] shared by two workers: an intake
/// worker pushing every input value, and a drain worker that empties the
/// buffer on each trigger and forwards the batch oldest first. Values still
/// buffered when cancellation is raised are discarded.
pub struct BufferStage {
    capacity: usize,
    trigger: DrainTrigger,
    metrics: BufferMetrics,
}

impl BufferStage {
    /// # Panics
    ///
    /// Launching panics if `capacity` is zero.
    pub fn new(capacity: usize, period: Duration) -> Self {
        Self::with_drain_trigger(capacity, DrainTrigger::Every(period))
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.buffer_capacity, config.drain_period)
    }

    /// Drain on ticks from `trigger` instead of an internal timer
    pub fn with_trigger(capacity: usize, trigger: Receiver<Instant>) -> Self {
        Self::with_drain_trigger(capacity, DrainTrigger::External(trigger))
    }

    fn with_drain_trigger(capacity: usize, trigger: DrainTrigger) -> Self {
        Self {
            capacity,
            trigger,
            metrics: BufferMetrics::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn metrics(&self) -> &BufferMetrics {
        &self.metrics
    }
}

impl Stage for BufferStage {
    fn launch(&self, cancel: &CancellationSignal, input: Receiver<i64>) -> Receiver<i64> {
        let buffer = Arc::new(BoundedBuffer::new(self.capacity));
        info!(capacity = self.capacity, "buffer initialised");

        {
            let buffer = Arc::clone(&buffer);
            let cancel = cancel.clone();
            let metrics = self.metrics.clone();
            spawn_worker("buffer-intake".into(), move || {
                run_intake(&buffer, &cancel, &input, &metrics)
            });
        }

        let (tx, rx) = handoff::channel();
        let cancel = cancel.clone();
        let metrics = self.metrics.clone();
        let trigger = self.trigger.clone();
        spawn_worker("buffer-drain".into(), move || {
            info!("buffer drain worker started");
            loop {
                let tick = match &trigger {
                    DrainTrigger::Every(period) => channel::after(*period),
                    DrainTrigger::External(ticks) => ticks.clone(),
                };
                select! {
                    recv(tick) -> msg => {
                        if msg.is_err() {
                            debug!("drain trigger closed, waiting for cancellation");
                            let _ = cancel.receiver().recv();
                            break;
                        }
                        let batch = buffer.drain_and_clear();
                        metrics.record_drain();
                        debug!(len = batch.len(), "buffer drained");
                        if !emit(&cancel, &tx, batch, &metrics) {
                            break;
                        }
                    }
                    recv(cancel.receiver()) -> _ => break,
                }
            }
            info!(discarded = buffer.len(), "buffer drain worker stopped");
        });

        rx
    }

    fn name(&self) -> &str {
        "buffer"
    }
}

fn run_intake(
    buffer: &BoundedBuffer,
    cancel: &CancellationSignal,
    input: &Receiver<i64>,
    metrics: &BufferMetrics,
) {
    info!("buffer intake worker started");
    loop {
        select! {
            recv(input) -> msg => {
                let Ok(value) = msg else { break };
                match buffer.push(value) {
                    PushOutcome::Stored => debug!(value, "value buffered"),
                    PushOutcome::Evicted(oldest) => {
                        debug!(value, evicted = oldest, "value buffered, oldest evicted");
                        metrics.record_evicted();
                    }
                }
                metrics.record_pushed();
            }
            recv(cancel.receiver()) -> _ => break,
        }
    }
    info!("buffer intake worker stopped");
}

/// Forward one drained batch in order. Returns `false` if the worker should stop.
fn emit(
    cancel: &CancellationSignal,
    tx: &channel::Sender<i64>,
    batch: Vec<i64>,
    metrics: &BufferMetrics,
) -> bool {
    for value in batch {
        if !forward(cancel, tx, value) {
            return false;
        }
        metrics.record_emitted();
    }
    true
}
