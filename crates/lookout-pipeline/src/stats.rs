use std::sync::atomic::{AtomicU64, Ordering};

/// Live counters shared between the coordinator and its worker tasks.
#[derive(Debug, Default)]
pub(crate) struct StatsCounters {
    pub submitted: AtomicU64,
    pub dropped_busy: AtomicU64,
    pub dropped_backoff: AtomicU64,
    pub decode_failures: AtomicU64,
    pub dispatched: AtomicU64,
    pub completed: AtomicU64,
    pub failed: AtomicU64,
}

impl StatsCounters {
    pub fn snapshot(&self) -> PipelineStats {
        PipelineStats {
            submitted: self.submitted.load(Ordering::Relaxed),
            dropped_busy: self.dropped_busy.load(Ordering::Relaxed),
            dropped_backoff: self.dropped_backoff.load(Ordering::Relaxed),
            decode_failures: self.decode_failures.load(Ordering::Relaxed),
            dispatched: self.dispatched.load(Ordering::Relaxed),
            completed: self.completed.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time view of the pipeline counters.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PipelineStats {
    /// Frames handed to `submit`.
    pub submitted: u64,
    /// Frames dropped because every in-flight slot was taken.
    pub dropped_busy: u64,
    /// Frames dropped inside a failure-backoff window.
    pub dropped_backoff: u64,
    /// Frames that failed geometry validation or decoding.
    pub decode_failures: u64,
    /// Frames dispatched to the inference backend.
    pub dispatched: u64,
    /// Inference calls that completed and published a snapshot.
    pub completed: u64,
    /// Inference calls that failed and were discarded.
    pub failed: u64,
}
