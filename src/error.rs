//! Error types for page scanning.

use thiserror::Error;

/// Everything that can go wrong while reading a page, loading a label table,
/// or writing results.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The page could not be read or handed to the markup parser.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A label table file is not valid YAML or has the wrong shape.
    #[error("Failed to parse label table: {0}")]
    Labels(#[from] serde_yaml::Error),

    /// A parsed record could not be encoded as JSON.
    #[error("Failed to encode record: {0}")]
    Json(#[from] serde_json::Error),

    /// The query URL could not be assembled.
    #[error("Invalid query URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Unknown language code: {0}. Expected one of: cz, ru")]
    UnknownLanguage(String),

    /// The worker thread parsing this page panicked.
    #[error("Worker thread panicked")]
    WorkerPanicked,
}

/// A convenience `Result` type alias using the crate's `ScanError` type.
pub type Result<T> = std::result::Result<T, ScanError>;
