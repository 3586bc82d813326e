use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

use crate::detection::domain::detection_error::DetectionError;
use crate::detection::domain::detector_init_error::DetectorInitError;
use crate::detection::domain::object_detector::ObjectDetector;
use crate::shared::constants::{AZURE_VISION_KEY_ENV, FRAME_ENCODING};
use crate::shared::detected_object::DetectedObject;
use crate::shared::frame::encode_mat;
use crate::shared::image_info::{FrameInput, ImageInfo};

use super::azure_response::{error_message, AnalyzeResponse};

const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
const VISUAL_FEATURES: &[&str] = &["Faces"];
const DETAILS: &[&str] = &["Celebrities"];

/// Detects faces and celebrities with the Azure Computer Vision `analyze` API.
///
/// One blocking client is built per detector and reused for every request.
/// Requests are never retried; a failed call is one frame without
/// detections.
pub struct AzureVisionDetector {
    vision_key: String,
    endpoint: String,
    client: Client,
}

impl std::fmt::Debug for AzureVisionDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureVisionDetector")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl AzureVisionDetector {
    /// Builds a detector from the `azure_vision_key` environment variable.
    pub fn from_env(
        endpoint: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, DetectorInitError> {
        Self::from_env_var(AZURE_VISION_KEY_ENV, endpoint, timeout)
    }

    pub fn from_env_var(
        variable: &str,
        endpoint: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, DetectorInitError> {
        let key = std::env::var(variable).unwrap_or_default();
        if key.trim().is_empty() {
            return Err(DetectorInitError::MissingCredential {
                variable: variable.to_string(),
            });
        }
        Self::new(key, endpoint, timeout)
    }

    /// `timeout` bounds each request end to end; `None` waits indefinitely.
    pub fn new(
        vision_key: impl Into<String>,
        endpoint: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, DetectorInitError> {
        let vision_key = vision_key.into();
        if vision_key.trim().is_empty() {
            return Err(DetectorInitError::MissingCredential {
                variable: AZURE_VISION_KEY_ENV.to_string(),
            });
        }
        let endpoint = endpoint.into();
        reqwest::Url::parse(&endpoint)
            .map_err(|e| DetectorInitError::InvalidSetting(format!("endpoint {endpoint}: {e}")))?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(DetectorInitError::HttpClient)?;

        Ok(Self {
            vision_key,
            endpoint,
            client,
        })
    }

    fn request(&self, image_bytes: Vec<u8>) -> Result<Vec<DetectedObject>, DetectionError> {
        let response = self
            .vision_request(image_bytes)
            .send()
            .map_err(DetectionError::Transport)?;
        let status = response.status().as_u16();
        let body = response.bytes().map_err(DetectionError::Transport)?;
        interpret_response(status, &body)
    }

    /// Content-Length comes from the body.
    fn vision_request(&self, image_bytes: Vec<u8>) -> reqwest::blocking::RequestBuilder {
        log::debug!("POST {} ({} bytes)", self.endpoint, image_bytes.len());
        self.client
            .post(&self.endpoint)
            .query(&[
                ("details", DETAILS.join(",")),
                ("visualFeatures", VISUAL_FEATURES.join(",")),
            ])
            .header(SUBSCRIPTION_KEY_HEADER, &self.vision_key)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(image_bytes)
    }
}

impl ObjectDetector for AzureVisionDetector {
    fn detect(&mut self, image: &ImageInfo<'_>) -> Result<Vec<DetectedObject>, DetectionError> {
        let bytes = match *image {
            ImageInfo::Path(path) => {
                std::fs::read(path).map_err(|source| DetectionError::ReadImage {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            ImageInfo::Bytes(bytes) => bytes.to_vec(),
            ImageInfo::Matrix(mat) => encode_mat(mat, FRAME_ENCODING)?,
        };
        self.request(bytes)
    }

    fn preferred_input(&self) -> FrameInput {
        FrameInput::Encoded
    }
}

/// Turns a raw HTTP status and body into detected objects.
///
/// The first byte decides whether the body is JSON-shaped; a non-200 status
/// is an error whatever the body looks like.
fn interpret_response(status: u16, body: &[u8]) -> Result<Vec<DetectedObject>, DetectionError> {
    let json_shaped = body.first() == Some(&b'{');

    if status != 200 {
        let message = if json_shaped {
            error_message(body)
        } else {
            None
        }
        .unwrap_or_else(|| String::from_utf8_lossy(body).chars().take(200).collect());
        return Err(DetectionError::Status { status, message });
    }

    let Some(&first_byte) = body.first() else {
        return Err(DetectionError::EmptyResponse);
    };
    if !json_shaped {
        return Err(DetectionError::NotJson { first_byte });
    }

    let parsed: AnalyzeResponse =
        serde_json::from_slice(body).map_err(DetectionError::MalformedResponse)?;
    if log::log_enabled!(log::Level::Debug) {
        if let Ok(json) = serde_json::to_string(&parsed) {
            log::debug!("result: {json}");
        }
    }
    Ok(parsed.into_objects())
}
