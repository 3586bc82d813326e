use std::path::{Path, PathBuf};

use opencv::imgcodecs::{self, IMREAD_COLOR};
use opencv::prelude::*;

use crate::shared::frame::Frame;
use crate::video::domain::frame_source::FrameSource;
use crate::video::domain::source_error::SourceError;

/// A single image file treated as a one-frame source.
///
/// The image is decoded eagerly so an unreadable file fails before any
/// window opens.
pub struct StillImageSource {
    path: PathBuf,
    frame: Option<Frame>,
}

impl StillImageSource {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let mat = imgcodecs::imread(&path.to_string_lossy(), IMREAD_COLOR)
            .map_err(|e| SourceError::opencv(format!("reading {}", path.display()), e))?;
        if mat.empty() {
            return Err(SourceError::UnreadableImage(path.to_path_buf()));
        }
        log::info!("Loaded image {} ({}x{})", path.display(), mat.cols(), mat.rows());
        Ok(Self {
            path: path.to_path_buf(),
            frame: Some(Frame::new(mat, 0)),
        })
    }
}

impl FrameSource for StillImageSource {
    fn read(&mut self) -> Result<Option<Frame>, SourceError> {
        Ok(self.frame.take())
    }

    fn frame_count(&self) -> Option<usize> {
        Some(1)
    }

    fn describe(&self) -> String {
        format!("image {}", self.path.display())
    }

    fn close(&mut self) {
        self.frame = None;
    }
}
