//! Raw camera frames and pixel-format decoding for the lookout ecosystem.
//!
//! A capture source delivers planar 4:2:0 frames as short-lived `RawFrame`
//! views; `decode` converts one view into an owned BGR `PixelGrid`.

pub mod decode;
pub mod error;
pub mod raw;
pub mod traits;

pub use decode::decode;
pub use error::DecodeError;
pub use raw::RawFrame;
pub use traits::CaptureFrame;
