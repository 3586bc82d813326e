use std::path::PathBuf;

use thiserror::Error;

/// Failures opening or reading an acquisition source. All of them end the run.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("cannot open {source_name}")]
    Open { source_name: String },
    #[error("cannot read image {0}")]
    UnreadableImage(PathBuf),
    #[error("{context}: {source}")]
    OpenCv {
        context: String,
        #[source]
        source: opencv::Error,
    },
}

impl SourceError {
    pub fn opencv(context: impl Into<String>, source: opencv::Error) -> Self {
        Self::OpenCv {
            context: context.into(),
            source,
        }
    }
}
