//! Export error types.

use thiserror::Error;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Errors from timeline serialization.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("XML serialization failed: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Produced document is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Frame rate must be positive, got {0}")]
    InvalidFps(u32),
}
