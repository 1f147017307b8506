//! Error types for the generator.

use std::path::PathBuf;

/// Errors that can occur while loading manifests or writing output.
#[derive(Debug, thiserror::Error)]
pub enum GenError {
    /// IO error (reading manifests or writing output).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The manifest is not valid JSON for the expected shape.
    #[error("Failed to parse manifest '{path}': {source}")]
    Parse {
        /// Path to the manifest.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_json::Error,
    },

    /// The manifest parsed but describes something unusable.
    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    /// Strict mode and at least one field was dropped.
    #[error("{0} field(s) could not be generated")]
    FieldsDropped(usize),
}

/// Result type for generator operations.
pub type Result<T> = std::result::Result<T, GenError>;
