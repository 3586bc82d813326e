use crate::shared::detected_object::DetectedObject;

/// Pixels between the bottom edge of a box and its label baseline.
pub const LABEL_BASELINE_GAP: i32 = 3;

/// How detections are drawn. Colors are BGR.
#[derive(Clone, Debug, PartialEq)]
pub struct AnnotationStyle {
    pub color: [u8; 3],
    pub font_scale: f64,
    pub thickness: i32,
}

impl Default for AnnotationStyle {
    fn default() -> Self {
        Self {
            color: [255, 0, 0],
            font_scale: 1.0,
            thickness: 2,
        }
    }
}

/// Where one detected object's box and label land on the frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Overlay {
    pub top_left: (i32, i32),
    pub bottom_right: (i32, i32),
    pub label: String,
    pub label_origin: (i32, i32),
}

impl Overlay {
    /// Box from `(left, top)` to `(right, bottom)`, label baseline just
    /// inside the bottom-left corner.
    pub fn for_object(object: &DetectedObject) -> Self {
        let r = object.rectangle();
        Self {
            top_left: (r.left, r.top),
            bottom_right: (r.right(), r.bottom()),
            label: object.label.clone(),
            label_origin: (r.left, r.bottom() - LABEL_BASELINE_GAP),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::detected_object::Detection;
    use crate::shared::rectangle::Rectangle;
    use rstest::rstest;

    #[rstest]
    #[case(Rectangle::new(10, 20, 30, 40), (20, 10), (50, 50), (20, 47))]
    #[case(Rectangle::new(0, 0, 1, 1), (0, 0), (1, 1), (0, -2))]
    #[case(Rectangle::from_corners(5, 6, 15, 26), (5, 6), (15, 26), (5, 23))]
    fn test_overlay_geometry(
        #[case] rect: Rectangle,
        #[case] top_left: (i32, i32),
        #[case] bottom_right: (i32, i32),
        #[case] label_origin: (i32, i32),
    ) {
        let object = DetectedObject::new("face", Detection::new(rect, None));
        let overlay = Overlay::for_object(&object);
        assert_eq!(overlay.top_left, top_left);
        assert_eq!(overlay.bottom_right, bottom_right);
        assert_eq!(overlay.label_origin, label_origin);
        assert_eq!(overlay.label, "face");
    }

    #[test]
    fn test_default_style_is_blue() {
        let style = AnnotationStyle::default();
        assert_eq!(style.color, [255, 0, 0]);
        assert_eq!(style.thickness, 2);
        assert!((style.font_scale - 1.0).abs() < f64::EPSILON);
    }
}
