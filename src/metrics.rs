use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Counters for a filtering stage
#[derive(Debug, Clone)]
pub struct StageMetrics {
    /// Values handed downstream
    forwarded: Arc<AtomicU64>,
    /// Values discarded by the predicate
    rejected: Arc<AtomicU64>,
    start_time: Instant,
}

impl StageMetrics {
    pub fn new() -> Self {
        Self {
            forwarded: Arc::new(AtomicU64::new(0)),
            rejected: Arc::new(AtomicU64::new(0)),
            start_time: Instant::now(),
        }
    }

    pub fn record_forwarded(&self) {
        self.forwarded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn total_forwarded(&self) -> u64 {
        self.forwarded.load(Ordering::Relaxed)
    }

    pub fn total_rejected(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
    }

    /// Forwarded values per second since creation
    pub fn throughput_vps(&self) -> f64 {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        if elapsed == 0.0 {
            0.0
        } else {
            self.total_forwarded() as f64 / elapsed
        }
    }

    pub fn snapshot(&self) -> StageSnapshot {
        StageSnapshot {
            forwarded: self.total_forwarded(),
            rejected: self.total_rejected(),
            throughput_vps: self.throughput_vps(),
            elapsed: self.start_time.elapsed(),
        }
    }
}

impl Default for StageMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct StageSnapshot {
    pub forwarded: u64,
    pub rejected: u64,
    pub throughput_vps: f64,
    pub elapsed: Duration,
}

impl StageSnapshot {
    pub fn format(&self) -> String {
        format!(
            "Forwarded: {}, Rejected: {}, Throughput: {:.2} values/s, Elapsed: {:.2}s",
            self.forwarded,
            self.rejected,
            self.throughput_vps,
            self.elapsed.as_secs_f64()
        )
    }
}

/// Counters for a buffering stage
#[derive(Debug, Clone, Default)]
pub struct BufferMetrics {
    pushed: Arc<AtomicU64>,
    evicted: Arc<AtomicU64>,
    drains: Arc<AtomicU64>,
    emitted: Arc<AtomicU64>,
}

impl BufferMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_pushed(&self) {
        self.pushed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_evicted(&self) {
        self.evicted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_drain(&self) {
        self.drains.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_emitted(&self) {
        self.emitted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn total_pushed(&self) -> u64 {
        self.pushed.load(Ordering::Relaxed)
    }

    /// Values lost to overwrite-on-full
    pub fn total_evicted(&self) -> u64 {
        self.evicted.load(Ordering::Relaxed)
    }

    /// Timer firings that drained the buffer, including empty drains
    pub fn total_drains(&self) -> u64 {
        self.drains.load(Ordering::Relaxed)
    }

    pub fn total_emitted(&self) -> u64 {
        self.emitted.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> BufferSnapshot {
        BufferSnapshot {
            pushed: self.total_pushed(),
            evicted: self.total_evicted(),
            drains: self.total_drains(),
            emitted: self.total_emitted(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferSnapshot {
    pub pushed: u64,
    pub evicted: u64,
    pub drains: u64,
    pub emitted: u64,
}

impl BufferSnapshot {
    pub fn format(&self) -> String {
        format!(
            "Pushed: {}, Evicted: {}, Drains: {}, Emitted: {}",
            self.pushed, self.evicted, self.drains, self.emitted
        )
    }
}
