//! Recording stand-ins for the loop's collaborators.
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use opencv::core::{Mat, Scalar, CV_8UC3};

use crate::annotation::domain::frame_annotator::FrameAnnotator;
use crate::detection::domain::detection_error::DetectionError;
use crate::detection::domain::object_detector::ObjectDetector;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::shared::detected_object::{DetectedObject, Detection};
use crate::shared::frame::Frame;
use crate::shared::image_info::{FrameInput, ImageInfo};
use crate::shared::rectangle::Rectangle;
use crate::video::domain::frame_display::FrameDisplay;
use crate::video::domain::frame_source::FrameSource;
use crate::video::domain::source_error::SourceError;

pub fn frame(index: usize) -> Frame {
    let mat = Mat::new_rows_cols_with_default(24, 32, CV_8UC3, Scalar::all(90.0)).unwrap();
    Frame::new(mat, index)
}

pub fn empty_frame(index: usize) -> Frame {
    Frame::new(Mat::default(), index)
}

pub fn face(label: &str) -> DetectedObject {
    DetectedObject::new(label, Detection::new(Rectangle::new(2, 3, 10, 12), None))
}

pub enum Step {
    Frame(Frame),
    Fail,
}

pub struct StubSource {
    steps: VecDeque<Step>,
    pub closed: Arc<Mutex<usize>>,
}

impl StubSource {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: steps.into(),
            closed: Arc::new(Mutex::new(0)),
        }
    }

    pub fn frames(frames: Vec<Frame>) -> Self {
        Self::new(frames.into_iter().map(Step::Frame).collect())
    }
}

impl FrameSource for StubSource {
    fn read(&mut self) -> Result<Option<Frame>, SourceError> {
        match self.steps.pop_front() {
            Some(Step::Frame(frame)) => Ok(Some(frame)),
            Some(Step::Fail) => Err(SourceError::Open {
                source_name: "stub".into(),
            }),
            None => Ok(None),
        }
    }

    fn frame_count(&self) -> Option<usize> {
        Some(self.steps.len())
    }

    fn describe(&self) -> String {
        "stub source".into()
    }

    fn close(&mut self) {
        *self.closed.lock().unwrap() += 1;
    }
}

/// Requests a stop on the `stop_after`-th poll, if set.
pub struct StubDisplay {
    pub shown: Arc<Mutex<Vec<usize>>>,
    pub polls: Arc<Mutex<Vec<i32>>>,
    pub closed: Arc<Mutex<usize>>,
    stop_after: Option<usize>,
}

impl StubDisplay {
    pub fn new(stop_after: Option<usize>) -> Self {
        Self {
            shown: Arc::new(Mutex::new(Vec::new())),
            polls: Arc::new(Mutex::new(Vec::new())),
            closed: Arc::new(Mutex::new(0)),
            stop_after,
        }
    }
}

impl FrameDisplay for StubDisplay {
    fn show(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        self.shown.lock().unwrap().push(frame.index());
        Ok(())
    }

    fn stop_requested(&mut self, delay_ms: i32) -> Result<bool, Box<dyn std::error::Error>> {
        let mut polls = self.polls.lock().unwrap();
        polls.push(delay_ms);
        Ok(self.stop_after.is_some_and(|n| polls.len() >= n))
    }

    fn close(&mut self) {
        *self.closed.lock().unwrap() += 1;
    }
}

/// Returns `objects` for every call, or fails every call when `fail` is set.
pub struct StubDetector {
    pub inputs: Arc<Mutex<Vec<&'static str>>>,
    objects: Vec<DetectedObject>,
    preferred: FrameInput,
    fail: bool,
}

impl StubDetector {
    pub fn new(objects: Vec<DetectedObject>, preferred: FrameInput) -> Self {
        Self {
            inputs: Arc::new(Mutex::new(Vec::new())),
            objects,
            preferred,
            fail: false,
        }
    }

    pub fn failing(preferred: FrameInput) -> Self {
        Self {
            fail: true,
            ..Self::new(Vec::new(), preferred)
        }
    }
}

impl ObjectDetector for StubDetector {
    fn detect(&mut self, image: &ImageInfo<'_>) -> Result<Vec<DetectedObject>, DetectionError> {
        self.inputs.lock().unwrap().push(image.kind());
        if self.fail {
            return Err(DetectionError::EmptyResponse);
        }
        Ok(self.objects.clone())
    }

    fn preferred_input(&self) -> FrameInput {
        self.preferred
    }
}

pub struct RecordingAnnotator {
    pub calls: Arc<Mutex<Vec<(usize, Vec<String>)>>>,
}

impl RecordingAnnotator {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl FrameAnnotator for RecordingAnnotator {
    fn annotate(
        &self,
        frame: &mut Frame,
        objects: &[DetectedObject],
    ) -> Result<(), Box<dyn std::error::Error>> {
        let labels = objects.iter().map(|o| o.label.clone()).collect();
        self.calls.lock().unwrap().push((frame.index(), labels));
        Ok(())
    }
}

#[derive(Default)]
pub struct LoggerRecord {
    pub progress: Vec<(usize, Option<usize>)>,
    pub timings: Vec<String>,
    pub metrics: Vec<(String, f64)>,
    pub summaries: usize,
}

pub struct RecordingLogger {
    pub record: Arc<Mutex<LoggerRecord>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self {
            record: Arc::new(Mutex::new(LoggerRecord::default())),
        }
    }
}

impl PipelineLogger for RecordingLogger {
    fn progress(&mut self, current: usize, total: Option<usize>) {
        self.record.lock().unwrap().progress.push((current, total));
    }

    fn timing(&mut self, stage: &str, _duration_ms: f64) {
        self.record.lock().unwrap().timings.push(stage.to_string());
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.record
            .lock()
            .unwrap()
            .metrics
            .push((name.to_string(), value));
    }

    fn info(&mut self, _message: &str) {}

    fn summary(&self) {
        self.record.lock().unwrap().summaries += 1;
    }
}
