use std::path::PathBuf;

/// Which acquisition source a run reads from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Image(PathBuf),
    Video(PathBuf),
    Camera(i32),
}

impl InputMode {
    /// An image path wins over a video path; the camera is the fallback.
    pub fn select(image: Option<PathBuf>, video: Option<PathBuf>, camera: i32) -> Self {
        match (image, video) {
            (Some(path), _) => Self::Image(path),
            (None, Some(path)) => Self::Video(path),
            (None, None) => Self::Camera(camera),
        }
    }
}
