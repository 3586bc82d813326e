use std::path::Path;

use opencv::core::Mat;

/// Input handed to a detector: exactly one way of supplying the image.
///
/// Precedence is decided by the caller once: a still image on disk is
/// always passed as [`ImageInfo::Path`]; frames from a stream have no path
/// and are passed as [`ImageInfo::Bytes`] or [`ImageInfo::Matrix`],
/// whichever the detector reports as its [`FrameInput`] preference.
#[derive(Clone, Copy, Debug)]
pub enum ImageInfo<'a> {
    /// Image file on disk.
    Path(&'a Path),
    /// Encoded image (e.g. JPEG) held in memory.
    Bytes(&'a [u8]),
    /// Decoded BGR pixel matrix.
    Matrix(&'a Mat),
}

impl ImageInfo<'_> {
    /// Short name of the active variant, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            ImageInfo::Path(_) => "path",
            ImageInfo::Bytes(_) => "bytes",
            ImageInfo::Matrix(_) => "matrix",
        }
    }
}

/// How a detector would like stream frames to be supplied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameInput {
    /// Encoded bytes (saves a re-encode for detectors that upload images).
    Encoded,
    /// Decoded pixels (saves an encode/decode round-trip for local detectors).
    Decoded,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        let mat = Mat::default();
        let bytes = [0u8; 4];
        assert_eq!(ImageInfo::Path(Path::new("a.jpg")).kind(), "path");
        assert_eq!(ImageInfo::Bytes(&bytes).kind(), "bytes");
        assert_eq!(ImageInfo::Matrix(&mat).kind(), "matrix");
    }
}
