use opencv::core::{Mat, Vector};
use opencv::imgcodecs;
use opencv::prelude::*;

/// A single decoded video/image frame (BGR, as produced by OpenCV) and its
/// position in the source.
///
/// The pixel buffer is released when the frame is dropped; sources reuse
/// nothing across reads.
#[derive(Debug)]
pub struct Frame {
    mat: Mat,
    index: usize,
}

impl Frame {
    pub fn new(mat: Mat, index: usize) -> Self {
        Self { mat, index }
    }

    pub fn mat(&self) -> &Mat {
        &self.mat
    }

    pub fn mat_mut(&mut self) -> &mut Mat {
        &mut self.mat
    }

    pub fn width(&self) -> i32 {
        self.mat.cols()
    }

    pub fn height(&self) -> i32 {
        self.mat.rows()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// A frame with no pixel data (e.g. a dropped camera frame).
    pub fn is_empty(&self) -> bool {
        self.mat.empty()
    }

    /// Encodes the frame into a transportable byte form, e.g. `".jpg"`.
    pub fn encode(&self, extension: &str) -> Result<Vec<u8>, opencv::Error> {
        encode_mat(&self.mat, extension)
    }
}

/// Encodes a BGR matrix with the codec chosen by `extension`.
pub fn encode_mat(mat: &Mat, extension: &str) -> Result<Vec<u8>, opencv::Error> {
    let mut buf = Vector::<u8>::new();
    let ok = imgcodecs::imencode(extension, mat, &mut buf, &Vector::new())?;
    if !ok || buf.is_empty() {
        return Err(opencv::Error::new(
            opencv::core::StsError,
            format!("failed to encode {}x{} image as {extension}", mat.cols(), mat.rows()),
        ));
    }
    Ok(buf.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{Scalar, CV_8UC3};

    fn make_frame(width: i32, height: i32, index: usize) -> Frame {
        let mat = Mat::new_rows_cols_with_default(height, width, CV_8UC3, Scalar::all(128.0))
            .unwrap();
        Frame::new(mat, index)
    }

    #[test]
    fn test_construction_and_accessors() {
        let frame = make_frame(4, 2, 5);
        assert_eq!(frame.width(), 4);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.index(), 5);
        assert!(!frame.is_empty());
    }

    #[test]
    fn test_default_mat_is_empty() {
        let frame = Frame::new(Mat::default(), 0);
        assert!(frame.is_empty());
        assert_eq!(frame.width(), 0);
    }

    #[test]
    fn test_encode_jpeg_has_jpeg_magic() {
        let frame = make_frame(16, 16, 0);
        let bytes = frame.encode(".jpg").unwrap();
        assert!(bytes.len() > 2);
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_encode_empty_frame_fails() {
        let frame = Frame::new(Mat::default(), 3);
        assert!(frame.encode(".jpg").is_err());
    }

    #[test]
    fn test_mat_mut_writes_through() {
        let mut frame = make_frame(2, 2, 1);
        *frame.mat_mut().at_2d_mut::<opencv::core::Vec3b>(0, 0).unwrap() =
            opencv::core::VecN([0u8, 0, 0]);
        assert_eq!(frame.mat().at_2d::<opencv::core::Vec3b>(0, 0).unwrap()[0], 0);
        assert_eq!(frame.mat().at_2d::<opencv::core::Vec3b>(1, 1).unwrap()[0], 128);
    }
}
