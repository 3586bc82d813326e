use std::path::Path;
use std::time::Instant;

use crate::annotation::domain::frame_annotator::FrameAnnotator;
use crate::detection::domain::object_detector::ObjectDetector;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::shared::constants::IMAGE_POLL_MS;
use crate::shared::image_info::ImageInfo;
use crate::video::domain::frame_display::FrameDisplay;
use crate::video::domain::frame_source::FrameSource;

/// Still-image pipeline: read → detect (by path) → annotate once, then keep
/// the result on screen until a key is pressed.
pub struct AnnotateImageUseCase {
    source: Box<dyn FrameSource>,
    detector: Box<dyn ObjectDetector>,
    annotator: Box<dyn FrameAnnotator>,
    display: Box<dyn FrameDisplay>,
    logger: Box<dyn PipelineLogger>,
}

impl AnnotateImageUseCase {
    pub fn new(
        source: Box<dyn FrameSource>,
        detector: Box<dyn ObjectDetector>,
        annotator: Box<dyn FrameAnnotator>,
        display: Box<dyn FrameDisplay>,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            source,
            detector,
            annotator,
            display,
            logger,
        }
    }

    /// `image_path` is the file the source was opened from; detectors get
    /// the path rather than the decoded pixels.
    pub fn execute(&mut self, image_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let result = self.run(image_path);
        self.source.close();
        self.display.close();
        self.logger.summary();
        result
    }

    fn run(&mut self, image_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let mut frame = self.source.read()?.ok_or("No frames in image")?;
        if frame.is_empty() {
            return Err(format!("Image {} has no pixel data", image_path.display()).into());
        }

        let t0 = Instant::now();
        let objects = self.detector.detect_or_empty(&ImageInfo::Path(image_path));
        self.logger.timing("detect", elapsed_ms(t0));
        self.logger.metric("objects", objects.len() as f64);
        self.logger.info(&format!(
            "Found {} object(s) in {}",
            objects.len(),
            image_path.display()
        ));

        let t0 = Instant::now();
        self.annotator.annotate(&mut frame, &objects)?;
        self.logger.timing("annotate", elapsed_ms(t0));
        self.logger.progress(1, Some(1));

        loop {
            self.display.show(&frame)?;
            if self.display.stop_requested(IMAGE_POLL_MS)? {
                return Ok(());
            }
        }
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
