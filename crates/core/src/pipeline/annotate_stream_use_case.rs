use std::time::Instant;

use crate::annotation::domain::frame_annotator::FrameAnnotator;
use crate::detection::domain::object_detector::ObjectDetector;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::shared::constants::{FRAME_ENCODING, STREAM_POLL_MS};
use crate::shared::detected_object::DetectedObject;
use crate::shared::frame::Frame;
use crate::shared::image_info::{FrameInput, ImageInfo};
use crate::video::domain::frame_display::FrameDisplay;
use crate::video::domain::frame_source::FrameSource;

/// Why the stream loop ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreamOutcome {
    SourceExhausted,
    StopRequested,
}

/// Live annotation loop: read → detect → annotate → show, until the source
/// runs dry or a key is pressed.
///
/// Detection failures never end the loop; source and display errors do.
/// The source and display are closed however the loop exits.
pub struct AnnotateStreamUseCase {
    source: Box<dyn FrameSource>,
    detector: Box<dyn ObjectDetector>,
    annotator: Box<dyn FrameAnnotator>,
    display: Box<dyn FrameDisplay>,
    logger: Box<dyn PipelineLogger>,
}

impl AnnotateStreamUseCase {
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

    pub fn execute(&mut self) -> Result<StreamOutcome, Box<dyn std::error::Error>> {
        self.logger
            .info(&format!("Reading from {}", self.source.describe()));

        let result = self.run();

        self.source.close();
        self.display.close();
        self.logger.summary();
        result
    }

    fn run(&mut self) -> Result<StreamOutcome, Box<dyn std::error::Error>> {
        let total = self.source.frame_count();
        let mut processed = 0usize;
        let mut skipped = 0usize;

        loop {
            let Some(mut frame) = self.source.read()? else {
                self.logger.info(&format!(
                    "No more frames from {} ({processed} shown, {skipped} empty skipped)",
                    self.source.describe()
                ));
                return Ok(StreamOutcome::SourceExhausted);
            };

            if frame.is_empty() {
                skipped += 1;
                log::debug!("Skipping empty frame {}", frame.index());
                continue;
            }

            let t0 = Instant::now();
            let objects = detect_frame(self.detector.as_mut(), &frame);
            self.logger.timing("detect", elapsed_ms(t0));
            self.logger.metric("objects", objects.len() as f64);

            let t0 = Instant::now();
            self.annotator.annotate(&mut frame, &objects)?;
            self.logger.timing("annotate", elapsed_ms(t0));

            let t0 = Instant::now();
            self.display.show(&frame)?;
            self.logger.timing("render", elapsed_ms(t0));

            processed += 1;
            self.logger.progress(processed, total);

            if self.display.stop_requested(STREAM_POLL_MS)? {
                self.logger
                    .info(&format!("Stop requested after {processed} frames"));
                return Ok(StreamOutcome::StopRequested);
            }
        }
    }
}

/// Hands a stream frame to the detector in the form it prefers. A frame
/// that cannot be encoded is shown without detections.
fn detect_frame(detector: &mut dyn ObjectDetector, frame: &Frame) -> Vec<DetectedObject> {
    match detector.preferred_input() {
        FrameInput::Decoded => detector.detect_or_empty(&ImageInfo::Matrix(frame.mat())),
        FrameInput::Encoded => match frame.encode(FRAME_ENCODING) {
            Ok(bytes) => detector.detect_or_empty(&ImageInfo::Bytes(&bytes)),
            Err(e) => {
                log::warn!("Could not encode frame {}: {e}", frame.index());
                Vec::new()
            }
        },
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
