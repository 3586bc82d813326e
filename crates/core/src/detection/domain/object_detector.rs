use crate::detection::domain::detection_error::DetectionError;
use crate::shared::detected_object::DetectedObject;
use crate::shared::image_info::{FrameInput, ImageInfo};

/// Domain interface for object detection backends.
///
/// Backends hold their expensive resources (classifier, HTTP client) for
/// their whole lifetime, hence `&mut self` and construction-time setup.
pub trait ObjectDetector {
    fn detect(&mut self, image: &ImageInfo<'_>) -> Result<Vec<DetectedObject>, DetectionError>;

    /// Which stream-frame representation this backend handles cheapest.
    fn preferred_input(&self) -> FrameInput;

    /// Runs [`detect`](Self::detect), degrading any failure to an empty
    /// result with a logged diagnostic.
    fn detect_or_empty(&mut self, image: &ImageInfo<'_>) -> Vec<DetectedObject> {
        match self.detect(image) {
            Ok(objects) => objects,
            Err(e) => {
                log::warn!(
                    "Detection failed ({} input), no annotations this frame: {e}",
                    image.kind()
                );
                Vec::new()
            }
        }
    }
}
