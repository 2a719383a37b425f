use crate::cancel::CancellationSignal;
use crate::stage::Stage;
use crossbeam::channel::Receiver;
use tracing::info;

/// Builder for constructing pipelines
pub struct PipelineBuilder {
    stages: Vec<Box<dyn Stage>>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Append a stage; stages run in the order they are added
    pub fn stage(mut self, stage: impl Stage) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Build the pipeline around the run's cancellation signal
    pub fn build(self, cancel: CancellationSignal) -> Pipeline {
        Pipeline::new(cancel, self.stages)
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// An ordered chain of stages sharing one cancellation signal.
///
/// The pipeline holds no data of its own. [`run`](Self::run) wires each
/// stage's output into the next stage's input and hands back the last output;
/// with no stages the source is returned unchanged.
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
    cancel: CancellationSignal,
}

impl Pipeline {
    pub fn new(cancel: CancellationSignal, stages: Vec<Box<dyn Stage>>) -> Self {
        Self { stages, cancel }
    }

    /// Launch every stage in order and return the final output.
    ///
    /// Each stage starts its own workers and returns at once, so this never
    /// blocks on data.
    pub fn run(&self, source: Receiver<i64>) -> Receiver<i64> {
        let output = self
            .stages
            .iter()
            .fold(source, |current, stage| stage.launch(&self.cancel, current));
        info!(stages = self.stages.len(), "pipeline stages launched");
        output
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    pub fn cancellation(&self) -> &CancellationSignal {
        &self.cancel
    }
}
