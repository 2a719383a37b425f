use crate::cancel::CancellationSignal;
use crate::handoff::{self, forward};
use crate::metrics::StageMetrics;
use crossbeam::channel::Receiver;
use crossbeam::select;
use std::sync::Arc;
use std::thread;
use tracing::{debug, error, info};

/// A unit of pipeline work.
///
/// `launch` starts the stage's worker(s) consuming `input` and returns the
/// output handle immediately. Workers stop producing output once `cancel` is
/// raised, and treat a disconnected input the same way.
pub trait Stage: Send + Sync + 'static {
    fn launch(&self, cancel: &CancellationSignal, input: Receiver<i64>) -> Receiver<i64>;

    /// Human-readable name, used for worker threads and logs
    fn name(&self) -> &str {
        "stage"
    }
}

impl<F> Stage for F
where
    F: Fn(&CancellationSignal, Receiver<i64>) -> Receiver<i64> + Send + Sync + 'static,
{
    fn launch(&self, cancel: &CancellationSignal, input: Receiver<i64>) -> Receiver<i64> {
        self(cancel, input)
    }
}

/// Start a named worker thread.
///
/// Spawn failures are logged rather than returned; the closure and every
/// channel end it owns are dropped, so downstream sees a closed output.
pub(crate) fn spawn_worker<F>(name: String, body: F)
where
    F: FnOnce() + Send + 'static,
{
    if let Err(e) = thread::Builder::new().name(name.clone()).spawn(body) {
        error!(worker = %name, error = %e, "failed to spawn worker");
    }
}

/// Forwards values matching a predicate unchanged and discards the rest
pub struct FilterStage<P>
where
    P: Fn(i64) -> bool + Send + Sync + 'static,
{
    name: String,
    predicate: Arc<P>,
    metrics: StageMetrics,
}

impl<P> FilterStage<P>
where
    P: Fn(i64) -> bool + Send + Sync + 'static,
{
    pub fn new(name: impl Into<String>, predicate: P) -> Self {
        Self {
            name: name.into(),
            predicate: Arc::new(predicate),
            metrics: StageMetrics::new(),
        }
    }

    /// Counters shared by every worker this stage launches
    pub fn metrics(&self) -> &StageMetrics {
        &self.metrics
    }
}

impl<P> Stage for FilterStage<P>
where
    P: Fn(i64) -> bool + Send + Sync + 'static,
{
    fn launch(&self, cancel: &CancellationSignal, input: Receiver<i64>) -> Receiver<i64> {
        let (tx, rx) = handoff::channel();
        let cancel = cancel.clone();
        let predicate = Arc::clone(&self.predicate);
        let metrics = self.metrics.clone();
        let name = self.name.clone();

        spawn_worker(format!("filter-{name}"), move || {
            info!(stage = %name, "filter worker started");
            loop {
                select! {
                    recv(input) -> msg => {
                        let Ok(value) = msg else { break };
                        if predicate(value) {
                            debug!(stage = %name, value, "value passed");
                            if !forward(&cancel, &tx, value) {
                                break;
                            }
                            metrics.record_forwarded();
                        } else {
                            debug!(stage = %name, value, "value rejected");
                            metrics.record_rejected();
                        }
                    }
                    recv(cancel.receiver()) -> _ => break,
                }
            }
            info!(stage = %name, "filter worker stopped");
        });

        rx
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Forwards strictly positive values
pub fn positive_filter() -> FilterStage<impl Fn(i64) -> bool + Send + Sync + 'static> {
    FilterStage::new("positive", |v: i64| v > 0)
}

/// Forwards positive multiples of three
pub fn multiple_of_three_filter() -> FilterStage<impl Fn(i64) -> bool + Send + Sync + 'static> {
    FilterStage::new("multiple_of_three", |v: i64| v > 0 && v % 3 == 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam::channel::Sender;

    /// Feed `values` into a fresh input, close it, and collect the stage output
    fn run_stage<S: Stage>(stage: &S, values: &[i64]) -> Vec<i64> {
        let cancel = CancellationSignal::new();
        let (tx, rx) = handoff::channel();
        let out = stage.launch(&cancel, rx);
        let values = values.to_vec();
        let feeder = thread::spawn(move || feed(tx, values));
        let collected: Vec<i64> = out.iter().collect();
        feeder.join().unwrap();
        collected
    }

    fn feed(tx: Sender<i64>, values: Vec<i64>) {
        for v in values {
            tx.send(v).unwrap();
        }
    }

    #[test]
    fn test_positive_filter() {
        let stage = positive_filter();
        let out = run_stage(&stage, &[i64::MIN, -1, 0, 1, 2, i64::MAX]);
        assert_eq!(out, vec![1, 2, i64::MAX]);
        assert_eq!(stage.metrics().total_forwarded(), 3);
        assert_eq!(stage.metrics().total_rejected(), 3);
    }

    #[test]
    fn test_multiple_of_three_filter() {
        let stage = multiple_of_three_filter();
        let out = run_stage(&stage, &[-9, -3, 0, 1, 3, 4, 6, 9, 10, 12]);
        assert_eq!(out, vec![3, 6, 9, 12]);
    }

    #[test]
    fn test_closure_is_a_stage() {
        let doubling = |cancel: &CancellationSignal, input: Receiver<i64>| {
            let (tx, rx) = handoff::channel();
            let cancel = cancel.clone();
            thread::spawn(move || {
                for v in input.iter() {
                    if !forward(&cancel, &tx, v * 2) {
                        break;
                    }
                }
            });
            rx
        };
        assert_eq!(run_stage(&doubling, &[1, 2, 3]), vec![2, 4, 6]);
        assert_eq!(doubling.name(), "stage");
    }

    #[test]
    fn test_filter_stops_on_cancel() {
        let cancel = CancellationSignal::new();
        let (tx, rx) = handoff::channel();
        let out = positive_filter().launch(&cancel, rx);

        cancel.cancel();
        // The worker exits and drops both channel ends
        assert!(out.recv().is_err());
        assert!(tx.send(5).is_err());
    }
}
