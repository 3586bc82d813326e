use serde::Serialize;

use crate::shared::rectangle::Rectangle;

/// One detected region and, when the backend reports it, its confidence.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Detection {
    pub rectangle: Rectangle,
    pub confidence: Option<f64>,
}

impl Detection {
    pub fn new(rectangle: Rectangle, confidence: Option<f64>) -> Self {
        Self {
            rectangle,
            confidence,
        }
    }

    /// Confidence in `[0.0, 1.0]`, or `0.0` when the backend reports none.
    pub fn score(&self) -> f64 {
        self.confidence.unwrap_or(0.0)
    }
}

/// A label bound to exactly one detection.
///
/// Labels are backend-defined: a fixed class name (`"face"`), a recognised
/// person's name, or a synthesized description such as `"Face [34, Male]"`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DetectedObject {
    pub label: String,
    pub detection: Detection,
}

impl DetectedObject {
    pub fn new(label: impl Into<String>, detection: Detection) -> Self {
        Self {
            label: label.into(),
            detection,
        }
    }

    pub fn rectangle(&self) -> &Rectangle {
        &self.detection.rectangle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_score_defaults_to_zero() {
        let d = Detection::new(Rectangle::new(0, 0, 10, 10), None);
        assert_relative_eq!(d.score(), 0.0);
    }

    #[test]
    fn test_score_reports_confidence() {
        let d = Detection::new(Rectangle::new(0, 0, 10, 10), Some(0.91));
        assert_relative_eq!(d.score(), 0.91);
    }

    #[test]
    fn test_object_exposes_rectangle() {
        let rect = Rectangle::new(5, 6, 7, 8);
        let obj = DetectedObject::new("face", Detection::new(rect, None));
        assert_eq!(obj.label, "face");
        assert_eq!(obj.rectangle(), &rect);
    }
}
