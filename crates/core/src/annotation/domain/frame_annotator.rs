use crate::shared::detected_object::DetectedObject;
use crate::shared::frame::Frame;

/// Draws detected objects onto a frame in place.
pub trait FrameAnnotator {
    fn annotate(
        &self,
        frame: &mut Frame,
        objects: &[DetectedObject],
    ) -> Result<(), Box<dyn std::error::Error>>;
}
