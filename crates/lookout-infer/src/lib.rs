//! Remote object-detection client for the lookout ecosystem.
//!
//! This crate serializes a `PixelGrid` into the detection server's JSON
//! wire format, posts it to the `/predict` endpoint, and parses the
//! returned predictions.

pub mod client;
pub mod config;
pub mod error;
pub mod types;

mod wire;

pub use client::InferenceClient;
pub use config::InferConfig;
pub use error::InferError;
pub use types::{BoundingBox, Prediction, PredictionSet};
