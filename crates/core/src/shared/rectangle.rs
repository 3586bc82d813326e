use serde::Serialize;

/// Axis-aligned bounding box in image-pixel coordinates.
///
/// Top-left origin: `top` is the y-coordinate of the top edge and `left`
/// the x-coordinate of the left edge. Every backend reports boxes in this
/// convention so annotation can draw them without re-deriving corners.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Rectangle {
    pub top: i32,
    pub left: i32,
    pub height: i32,
    pub width: i32,
}

impl Rectangle {
    pub fn new(top: i32, left: i32, width: i32, height: i32) -> Self {
        Self {
            top,
            left,
            height: height.max(0),
            width: width.max(0),
        }
    }

    /// Builds a rectangle from its (min, max) corners.
    ///
    /// Corners may be given in either order; the result always has
    /// non-negative width and height.
    pub fn from_corners(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        let (x0, x1) = (min_x.min(max_x), min_x.max(max_x));
        let (y0, y1) = (min_y.min(max_y), min_y.max(max_y));
        Self {
            top: y0,
            left: x0,
            height: y1 - y0,
            width: x1 - x0,
        }
    }

    pub fn right(&self) -> i32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }

    /// True when the rectangle lies entirely inside a `width` x `height` image.
    pub fn fits_within(&self, width: i32, height: i32) -> bool {
        self.left >= 0 && self.top >= 0 && self.right() <= width && self.bottom() <= height
    }
}
