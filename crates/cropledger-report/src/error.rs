//! Error types for report assembly.

use std::path::PathBuf;
use thiserror::Error;

/// Failure while turning laid-out pages into a PDF file.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A required image could not be read or decoded.
    #[error("cannot embed image {path}: {message}")]
    Image {
        /// Image file.
        path: PathBuf,
        /// Decoder message.
        message: String,
    },
    /// The PDF library failed to serialize the document.
    #[error("cannot serialize PDF: {0}")]
    Pdf(String),
    /// Reading or writing a file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Result alias for report assembly.
pub type Result<T> = std::result::Result<T, ReportError>;
