use opencv::core::{Point, Scalar};
use opencv::imgproc::{self, FONT_HERSHEY_PLAIN, LINE_8};

use crate::annotation::domain::frame_annotator::FrameAnnotator;
use crate::annotation::domain::overlay::{AnnotationStyle, Overlay};
use crate::shared::detected_object::DetectedObject;
use crate::shared::frame::Frame;

/// Draws box outlines and Hershey Plain labels with OpenCV.
#[derive(Default)]
pub struct OpencvAnnotator {
    style: AnnotationStyle,
}

impl OpencvAnnotator {
    pub fn new(style: AnnotationStyle) -> Self {
        Self { style }
    }

    fn color(&self) -> Scalar {
        let [b, g, r] = self.style.color;
        Scalar::new(b as f64, g as f64, r as f64, 0.0)
    }
}

impl FrameAnnotator for OpencvAnnotator {
    fn annotate(
        &self,
        frame: &mut Frame,
        objects: &[DetectedObject],
    ) -> Result<(), Box<dyn std::error::Error>> {
        let color = self.color();
        for object in objects {
            let overlay = Overlay::for_object(object);
            let (x1, y1) = overlay.top_left;
            let (x2, y2) = overlay.bottom_right;
            let (lx, ly) = overlay.label_origin;

            imgproc::put_text(
                frame.mat_mut(),
                &overlay.label,
                Point::new(lx, ly),
                FONT_HERSHEY_PLAIN,
                self.style.font_scale,
                color,
                self.style.thickness,
                LINE_8,
                false,
            )?;
            imgproc::rectangle_points(
                frame.mat_mut(),
                Point::new(x1, y1),
                Point::new(x2, y2),
                color,
                self.style.thickness,
                LINE_8,
                0,
            )?;
        }
        Ok(())
    }
}
