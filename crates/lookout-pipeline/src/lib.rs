//! Per-frame dispatch coordination for the lookout ecosystem.
//!
//! The coordinator accepts frames from a capture source, decodes them,
//! ships each accepted frame to the detection endpoint on its own task,
//! and publishes the latest prediction set for overlay rendering.

pub mod config;
pub mod coordinator;
pub mod snapshot;
pub mod stats;
pub mod traits;

pub use config::PipelineConfig;
pub use coordinator::PipelineCoordinator;
pub use snapshot::Snapshot;
pub use stats::PipelineStats;
pub use traits::Infer;
