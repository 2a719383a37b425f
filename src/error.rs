use thiserror::Error;

/// Result type for buffered pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors raised around the pipeline core.
///
/// The core itself (buffer pushes, drains, filtering, hand-off) never fails;
/// these cover configuration and the collaborators at its boundary.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// A worker thread could not be started
    #[error("Failed to spawn worker: {0}")]
    Spawn(String),

    /// Reading from the input source failed
    #[error("Input error: {0}")]
    Io(#[from] std::io::Error),
}
