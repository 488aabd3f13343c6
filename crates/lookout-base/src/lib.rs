//! Shared primitives for the lookout ecosystem.
//!
//! This crate provides the `PixelGrid` frame representation exchanged
//! between the decoder and the inference client, plus logging setup.

pub mod logging;
pub mod pixel;

pub use logging::{StdoutLogger, init_stdout_logger};
pub use pixel::{PixelGrid, PixelGridError};

// Re-export log crate so downstream crates can use lookout_base::log::*
pub use log;
