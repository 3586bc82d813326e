//! Local object detector backed by an OpenCV cascade classifier.
//!
//! The classifier definition is loaded once at construction and held for
//! the detector's lifetime; OpenCV releases it when the detector drops.
use std::path::Path;

use opencv::core::{Mat, Rect, Size, Vector};
use opencv::imgcodecs::{self, IMREAD_COLOR};
use opencv::objdetect::CascadeClassifier;
use opencv::prelude::*;

use crate::detection::domain::detection_error::DetectionError;
use crate::detection::domain::detector_init_error::DetectorInitError;
use crate::detection::domain::object_detector::ObjectDetector;
use crate::shared::detected_object::{DetectedObject, Detection};
use crate::shared::image_info::{FrameInput, ImageInfo};
use crate::shared::rectangle::Rectangle;

/// OpenCV's `detectMultiScale` defaults.
pub const DEFAULT_SCALE_FACTOR: f64 = 1.1;
pub const DEFAULT_MIN_NEIGHBORS: i32 = 3;

/// Multi-scale sliding-window tuning.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CascadeParams {
    /// How much the image shrinks between pyramid levels (must be > 1).
    pub scale_factor: f64,
    /// Overlapping candidates required to keep a detection.
    pub min_neighbors: i32,
    /// Smallest object side in pixels; 0 lets the classifier decide.
    pub min_size: i32,
}

impl Default for CascadeParams {
    fn default() -> Self {
        Self {
            scale_factor: DEFAULT_SCALE_FACTOR,
            min_neighbors: DEFAULT_MIN_NEIGHBORS,
            min_size: 0,
        }
    }
}

impl CascadeParams {
    pub fn validate(&self) -> Result<(), String> {
        if self.scale_factor.is_nan() || self.scale_factor <= 1.0 {
            return Err(format!(
                "scale factor must be greater than 1.0, got {}",
                self.scale_factor
            ));
        }
        if self.min_neighbors < 0 {
            return Err(format!(
                "min neighbors must be non-negative, got {}",
                self.min_neighbors
            ));
        }
        if self.min_size < 0 {
            return Err(format!("min size must be non-negative, got {}", self.min_size));
        }
        Ok(())
    }
}

pub struct CascadeDetector {
    classifier: CascadeClassifier,
    label: String,
    params: CascadeParams,
}

impl CascadeDetector {
    /// Load a cascade definition (e.g. `haarcascade_frontalface_default.xml`).
    ///
    /// Every detection is reported under `label`, so other object classes
    /// only need a different definition file and label.
    pub fn new(
        classifier_path: &Path,
        label: impl Into<String>,
        params: CascadeParams,
    ) -> Result<Self, DetectorInitError> {
        params.validate().map_err(DetectorInitError::InvalidSetting)?;

        let load_err = |reason: String| DetectorInitError::ClassifierLoad {
            path: classifier_path.to_path_buf(),
            reason,
        };

        let classifier = CascadeClassifier::new(&classifier_path.to_string_lossy())
            .map_err(|e| load_err(e.to_string()))?;
        if classifier.empty().map_err(|e| load_err(e.to_string()))? {
            return Err(load_err("no classifier could be loaded from file".to_string()));
        }

        log::info!("Loaded cascade classifier {}", classifier_path.display());
        Ok(Self {
            classifier,
            label: label.into(),
            params,
        })
    }

    fn detect_in(&mut self, image: &Mat) -> Result<Vec<DetectedObject>, DetectionError> {
        if image.empty() {
            return Ok(Vec::new());
        }

        let mut rects = Vector::<Rect>::new();
        self.classifier.detect_multi_scale(
            image,
            &mut rects,
            self.params.scale_factor,
            self.params.min_neighbors,
            0,
            Size::new(self.params.min_size, self.params.min_size),
            Size::new(0, 0),
        )?;

        Ok(to_objects(&self.label, rects.iter()))
    }
}

impl ObjectDetector for CascadeDetector {
    fn detect(&mut self, image: &ImageInfo<'_>) -> Result<Vec<DetectedObject>, DetectionError> {
        match *image {
            ImageInfo::Matrix(mat) => self.detect_in(mat),
            ImageInfo::Path(path) => {
                let img = imgcodecs::imread(&path.to_string_lossy(), IMREAD_COLOR)?;
                if img.empty() {
                    log::warn!("Error reading image from: {}", path.display());
                    return Ok(Vec::new());
                }
                self.detect_in(&img)
            }
            ImageInfo::Bytes(bytes) => {
                if bytes.is_empty() {
                    log::warn!("Received an empty image buffer");
                    return Ok(Vec::new());
                }
                let img = imgcodecs::imdecode(&Vector::<u8>::from_slice(bytes), IMREAD_COLOR)?;
                if img.empty() {
                    log::warn!("Could not decode {}-byte image buffer", bytes.len());
                    return Ok(Vec::new());
                }
                self.detect_in(&img)
            }
        }
    }

    fn preferred_input(&self) -> FrameInput {
        FrameInput::Decoded
    }
}

/// Maps classifier rectangles into labeled objects without confidence.
fn to_objects(label: &str, rects: impl IntoIterator<Item = Rect>) -> Vec<DetectedObject> {
    rects
        .into_iter()
        .map(|r| {
            let rectangle = Rectangle::from_corners(r.x, r.y, r.x + r.width, r.y + r.height);
            if log::log_enabled!(log::Level::Debug) {
                if let Ok(json) = serde_json::to_string(&rectangle) {
                    log::debug!("Detect: {json}");
                }
            }
            DetectedObject::new(label, Detection::new(rectangle, None))
        })
        .collect()
}
