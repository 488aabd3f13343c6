use std::time::Duration;

/// Configuration for the pipeline coordinator.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    max_in_flight: usize,
    failure_backoff: Duration,
    staleness_threshold: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_in_flight: 1,
            failure_backoff: Duration::from_millis(500),
            staleness_threshold: Duration::from_secs(2),
        }
    }
}

impl PipelineConfig {
    /// Set the maximum number of concurrent inference requests. Frames
    /// arriving while all slots are taken are dropped, not queued.
    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight;
        self
    }

    /// Set how long frame admission stays closed after a failed inference.
    /// Zero disables the backoff window.
    pub fn with_failure_backoff(mut self, backoff: Duration) -> Self {
        self.failure_backoff = backoff;
        self
    }

    /// Set the age at which the published prediction set counts as stale.
    pub fn with_staleness_threshold(mut self, threshold: Duration) -> Self {
        self.staleness_threshold = threshold;
        self
    }

    // Getters
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight
    }

    pub fn failure_backoff(&self) -> Duration {
        self.failure_backoff
    }

    pub fn staleness_threshold(&self) -> Duration {
        self.staleness_threshold
    }
}
