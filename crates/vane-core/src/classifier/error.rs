use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("classifier artifact not found at path: {path}")]
    ArtifactNotFound { path: PathBuf },

    #[error("failed to load classifier artifact: {reason}")]
    LoadFailed { reason: String },

    #[error("invalid classifier artifact: {reason}")]
    InvalidArtifact { reason: String },

    #[error("embedding dimension mismatch: classifier expects {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}

impl From<candle_core::Error> for ClassifierError {
    fn from(err: candle_core::Error) -> Self {
        ClassifierError::LoadFailed {
            reason: err.to_string(),
        }
    }
}

impl From<std::io::Error> for ClassifierError {
    fn from(err: std::io::Error) -> Self {
        ClassifierError::LoadFailed {
            reason: err.to_string(),
        }
    }
}
