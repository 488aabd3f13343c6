use lookout_infer::PredictionSet;
use std::time::{Duration, Instant};

/// Immutable published result of one completed inference.
#[derive(Clone, Debug)]
pub struct Snapshot {
    predictions: PredictionSet,
    published_at: Instant,
}

impl Snapshot {
    pub(crate) fn new(predictions: PredictionSet) -> Self {
        Self {
            predictions,
            published_at: Instant::now(),
        }
    }

    pub fn predictions(&self) -> &PredictionSet {
        &self.predictions
    }

    pub fn published_at(&self) -> Instant {
        self.published_at
    }

    /// Time elapsed since this snapshot was published.
    pub fn age(&self) -> Duration {
        self.published_at.elapsed()
    }
}
