use std::path::PathBuf;

use thiserror::Error;

/// Why a cascade definition file could not be located or fetched.
#[derive(Error, Debug)]
pub enum CascadeResolveError {
    #[error("cascade file not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to create cache directory: {0}")]
    CacheDir(#[source] std::io::Error),
    #[error("download failed for {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to write cascade to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not determine cache directory")]
    NoCacheDir,
}

/// Why a detector could not be built. Construction failures are fatal to
/// the run, unlike per-frame [`DetectionError`](super::detection_error::DetectionError)s.
#[derive(Error, Debug)]
pub enum DetectorInitError {
    #[error("missing credential: set the {variable} environment variable")]
    MissingCredential { variable: String },
    #[error(transparent)]
    CascadeResolve(#[from] CascadeResolveError),
    #[error("failed to load cascade classifier {path}: {reason}")]
    ClassifierLoad { path: PathBuf, reason: String },
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    #[error("invalid setting: {0}")]
    InvalidSetting(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_error_passes_through_unchanged() {
        let err: DetectorInitError = CascadeResolveError::NoCacheDir.into();
        assert_eq!(err.to_string(), "could not determine cache directory");
    }

    #[test]
    fn test_missing_credential_names_variable() {
        let err = DetectorInitError::MissingCredential {
            variable: "azure_vision_key".into(),
        };
        assert_eq!(
            err.to_string(),
            "missing credential: set the azure_vision_key environment variable"
        );
    }

    #[test]
    fn test_classifier_load_names_the_file() {
        let err = DetectorInitError::ClassifierLoad {
            path: PathBuf::from("/tmp/broken.xml"),
            reason: "empty classifier".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to load cascade classifier /tmp/broken.xml: empty classifier"
        );
    }
}
