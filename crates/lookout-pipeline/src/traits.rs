use lookout_base::PixelGrid;
use lookout_infer::{InferError, InferenceClient, PredictionSet};
use std::future::Future;

/// Inference backend seam for the coordinator.
///
/// The production implementation is `InferenceClient`; tests substitute
/// stubs with controllable latency and results.
pub trait Infer: Send + Sync + 'static {
    fn infer(
        &self,
        grid: PixelGrid,
    ) -> impl Future<Output = Result<PredictionSet, InferError>> + Send;
}

impl Infer for InferenceClient {
    fn infer(
        &self,
        grid: PixelGrid,
    ) -> impl Future<Output = Result<PredictionSet, InferError>> + Send {
        InferenceClient::infer(self, grid)
    }
}
