use crate::error::{PipelineError, Result};
use std::time::Duration;

/// Default number of values the buffering stage retains between drains
pub const DEFAULT_BUFFER_CAPACITY: usize = 10;

/// Default interval between buffer drains
pub const DEFAULT_DRAIN_PERIOD: Duration = Duration::from_secs(10);

/// Fixed parameters of a pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Capacity N of the buffering stage
    pub buffer_capacity: usize,
    /// Period T of the drain timer
    pub drain_period: Duration,
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            drain_period: DEFAULT_DRAIN_PERIOD,
        }
    }

    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    pub fn with_drain_period(mut self, period: Duration) -> Self {
        self.drain_period = period;
        self
    }

    /// Reject values the buffering stage cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.buffer_capacity == 0 {
            return Err(PipelineError::Config(
                "buffer capacity must be at least 1".into(),
            ));
        }
        if self.drain_period.is_zero() {
            return Err(PipelineError::Config(
                "drain period must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.buffer_capacity, 10);
        assert_eq!(config.drain_period, Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let config = PipelineConfig::new().with_buffer_capacity(0);
        assert!(matches!(config.validate(), Err(PipelineError::Config(_))));
    }

    #[test]
    fn test_zero_period_rejected() {
        let config = PipelineConfig::new().with_drain_period(Duration::ZERO);
        assert!(matches!(config.validate(), Err(PipelineError::Config(_))));
    }
}
