use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while extracting headlines from a loaded payload.
#[derive(Debug, Error)]
pub enum InputError {
    /// The file suffix is not one of the recognized types.
    #[error("unsupported file type '{name}': expected .txt, .csv, or .json")]
    UnsupportedType { name: String },

    /// The payload parsed but matched none of the accepted structures.
    #[error("unsupported JSON structure: {reason}")]
    UnsupportedStructure { reason: String },

    /// The payload was not valid JSON at all.
    #[error("invalid JSON: {source}")]
    MalformedJson {
        #[from]
        source: serde_json::Error,
    },

    /// The file could not be read from disk.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
