use std::path::PathBuf;

use thiserror::Error;

/// A single detection call failed.
///
/// Never fatal to a run: callers that only need annotations use
/// [`ObjectDetector::detect_or_empty`](super::object_detector::ObjectDetector::detect_or_empty),
/// which logs the error and carries on with no detections.
#[derive(Error, Debug)]
pub enum DetectionError {
    #[error("failed to read image {path}: {source}")]
    ReadImage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("opencv: {0}")]
    OpenCv(#[from] opencv::Error),
    #[error("request to vision service failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("vision service returned status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("vision service returned an empty body")]
    EmptyResponse,
    #[error("vision service returned a non-JSON body (first byte {first_byte:#04x})")]
    NotJson { first_byte: u8 },
    #[error("malformed vision service response: {0}")]
    MalformedResponse(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_is_readable() {
        let err = DetectionError::Status {
            status: 401,
            message: "Access denied".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "vision service returned status 401: Access denied"
        );
    }

    #[test]
    fn test_not_json_shows_hex_byte() {
        let err = DetectionError::NotJson { first_byte: b'<' };
        assert!(err.to_string().contains("0x3c"));
    }
}
