use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NewsError {
    #[error("failed to parse JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("no such file: {}", .0.display())]
    NotFound(PathBuf),
    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unexpected document shape: {0}")]
    Shape(String),
    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),
}

impl NewsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            NewsError::NotFound(path)
        } else {
            NewsError::Io { path, source }
        }
    }
}
