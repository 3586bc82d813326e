use crate::shared::frame::Frame;

use super::source_error::SourceError;

/// Produces frames for the annotation loop: a video file, a camera or a
/// single still image.
pub trait FrameSource {
    /// Next frame, or `None` once the source is exhausted or the device
    /// stops delivering. A returned frame may be empty (dropped camera
    /// frame); callers skip those.
    fn read(&mut self) -> Result<Option<Frame>, SourceError>;

    /// Total frames when the source knows it up front (video files).
    fn frame_count(&self) -> Option<usize>;

    /// Human-readable name for logs, e.g. `"video clip.mp4"`.
    fn describe(&self) -> String;

    /// Releases the underlying handle. Safe to call more than once.
    fn close(&mut self);
}
