use std::path::Path;

use opencv::core::Mat;
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture};

use crate::shared::frame::Frame;
use crate::video::domain::frame_source::FrameSource;
use crate::video::domain::source_error::SourceError;

/// Frames from a video file or a camera through OpenCV's `VideoCapture`.
pub struct CaptureSource {
    capture: VideoCapture,
    name: String,
    next_index: usize,
    closed: bool,
}

impl CaptureSource {
    pub fn open_file(path: &Path) -> Result<Self, SourceError> {
        let name = format!("video {}", path.display());
        if !path.is_file() {
            return Err(SourceError::Open { source_name: name });
        }
        let capture = VideoCapture::from_file(&path.to_string_lossy(), videoio::CAP_ANY)
            .map_err(|e| SourceError::opencv(format!("opening {name}"), e))?;
        Self::from_capture(capture, name)
    }

    pub fn open_camera(index: i32) -> Result<Self, SourceError> {
        let name = format!("camera {index}");
        let capture = VideoCapture::new(index, videoio::CAP_ANY)
            .map_err(|e| SourceError::opencv(format!("opening {name}"), e))?;
        Self::from_capture(capture, name)
    }

    fn from_capture(capture: VideoCapture, name: String) -> Result<Self, SourceError> {
        let opened = capture
            .is_opened()
            .map_err(|e| SourceError::opencv(format!("opening {name}"), e))?;
        if !opened {
            return Err(SourceError::Open { source_name: name });
        }
        log::info!("Opened {name}");
        Ok(Self {
            capture,
            name,
            next_index: 0,
            closed: false,
        })
    }
}

impl FrameSource for CaptureSource {
    fn read(&mut self) -> Result<Option<Frame>, SourceError> {
        if self.closed {
            return Ok(None);
        }
        let mut mat = Mat::default();
        let grabbed = self
            .capture
            .read(&mut mat)
            .map_err(|e| SourceError::opencv(format!("reading {}", self.name), e))?;
        if !grabbed {
            return Ok(None);
        }
        let frame = Frame::new(mat, self.next_index);
        self.next_index += 1;
        Ok(Some(frame))
    }

    fn frame_count(&self) -> Option<usize> {
        let count = self.capture.get(videoio::CAP_PROP_FRAME_COUNT).ok()?;
        (count.is_finite() && count >= 1.0).then_some(count as usize)
    }

    fn describe(&self) -> String {
        self.name.clone()
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Err(e) = self.capture.release() {
            log::warn!("Failed to release {}: {e}", self.name);
        }
    }
}

impl Drop for CaptureSource {
    fn drop(&mut self) {
        self.close();
    }
}
