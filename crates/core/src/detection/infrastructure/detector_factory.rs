use std::path::PathBuf;
use std::time::Duration;

use crate::detection::domain::backend_kind::BackendKind;
use crate::detection::domain::detector_init_error::DetectorInitError;
use crate::detection::domain::object_detector::ObjectDetector;
use crate::shared::constants::{
    AZURE_REQUEST_TIMEOUT_SECS, AZURE_VISION_ENDPOINT, DEFAULT_CASCADE_LABEL,
    DEFAULT_CASCADE_NAME, DEFAULT_CASCADE_URL,
};

use super::azure_vision_detector::AzureVisionDetector;
use super::cascade_detector::{CascadeDetector, CascadeParams};
use super::cascade_resolver::{self, ProgressFn};

/// Everything needed to build either backend.
#[derive(Clone, Debug)]
pub struct DetectorSettings {
    pub backend: BackendKind,
    /// Explicit cascade definition; resolved from system dirs, cache or
    /// download when `None`.
    pub cascade_path: Option<PathBuf>,
    pub label: String,
    pub cascade_params: CascadeParams,
    pub endpoint: String,
    /// `None` disables the request timeout.
    pub request_timeout: Option<Duration>,
}

impl Default for DetectorSettings {
    fn default() -> Self {
        Self {
            backend: BackendKind::Haar,
            cascade_path: None,
            label: DEFAULT_CASCADE_LABEL.to_string(),
            cascade_params: CascadeParams::default(),
            endpoint: AZURE_VISION_ENDPOINT.to_string(),
            request_timeout: Some(Duration::from_secs(AZURE_REQUEST_TIMEOUT_SECS)),
        }
    }
}

/// Builds the detector chosen by `settings.backend`.
///
/// `progress` is only used when the cascade definition has to be downloaded.
pub fn create_detector(
    settings: &DetectorSettings,
    progress: Option<ProgressFn>,
) -> Result<Box<dyn ObjectDetector>, DetectorInitError> {
    match settings.backend {
        BackendKind::Haar => {
            let path = cascade_resolver::resolve(
                settings.cascade_path.as_deref(),
                DEFAULT_CASCADE_NAME,
                DEFAULT_CASCADE_URL,
                progress,
            )?;
            log::info!("Using cascade detector ({})", path.display());
            let detector =
                CascadeDetector::new(&path, settings.label.clone(), settings.cascade_params)?;
            Ok(Box::new(detector))
        }
        BackendKind::Azure => {
            log::info!("Using Azure vision detector ({})", settings.endpoint);
            let detector =
                AzureVisionDetector::from_env(settings.endpoint.clone(), settings.request_timeout)?;
            Ok(Box::new(detector))
        }
    }
}
