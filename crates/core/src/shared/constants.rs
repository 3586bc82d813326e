pub const DEFAULT_CASCADE_NAME: &str = "haarcascade_frontalface_default.xml";
pub const DEFAULT_CASCADE_URL: &str =
    "https://raw.githubusercontent.com/opencv/opencv/4.x/data/haarcascades/haarcascade_frontalface_default.xml";

/// Label attached to every cascade detection unless overridden.
pub const DEFAULT_CASCADE_LABEL: &str = "face";

/// Environment variable holding the vision API subscription key.
pub const AZURE_VISION_KEY_ENV: &str = "azure_vision_key";
pub const AZURE_VISION_ENDPOINT: &str =
    "https://westus.api.cognitive.microsoft.com/vision/v2.0/analyze";
pub const AZURE_REQUEST_TIMEOUT_SECS: u64 = 10;

pub const WINDOW_NAME: &str = "Detect";

/// Key poll while streaming; short enough to keep up with camera rates.
pub const STREAM_POLL_MS: i32 = 1;
/// Key poll while a still image is on screen.
pub const IMAGE_POLL_MS: i32 = 10;

/// Encoding used when a detector wants frames as bytes.
pub const FRAME_ENCODING: &str = ".jpg";
