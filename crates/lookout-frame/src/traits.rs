use crate::RawFrame;

/// A frame as handed over by a capture source.
///
/// Capture sources recycle their backing buffers through a ring of finite
/// capacity: a frame that is never released stalls the source. Whoever
/// accepts a `CaptureFrame` must call `release` as soon as the planes have
/// been read (or the frame is discarded), before doing anything slow.
pub trait CaptureFrame {
    /// Borrow the frame's planes for decoding.
    fn view(&self) -> RawFrame<'_>;

    /// Hand the backing buffers back to the capture source.
    fn release(self)
    where
        Self: Sized;
}
