//! Request failures and the status codes they map to.

use axum::http::StatusCode;
use cropledger_core::{InputError, MetricsError};
use cropledger_report::{PipelineError, ReportError};
use thiserror::Error;

/// Everything that can stop `/generate` from returning a PDF.
///
/// The display text is what the user sees above the form.
#[derive(Debug, Error)]
pub enum AppError {
    /// Required fields missing, bad acreage, or no usable entries.
    #[error("{0}")]
    InvalidInput(#[from] InputError),
    /// Metrics could not be computed.
    #[error("Calculation error: {0}")]
    Calculation(MetricsError),
    /// The PDF could not be assembled or written.
    #[error("PDF generation failed: {0}")]
    Assembly(ReportError),
    /// The finished PDF could not be read back for the response.
    #[error("Error sending file: {0}")]
    Delivery(#[source] std::io::Error),
    /// Anything else.
    #[error("An unexpected error occurred: {0}")]
    Unexpected(anyhow::Error),
}

impl AppError {
    /// HTTP status for this failure.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) | Self::Calculation(_) => StatusCode::BAD_REQUEST,
            Self::Assembly(_) | Self::Delivery(_) | Self::Unexpected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Calculation(e) => Self::Calculation(e),
            PipelineError::Assembly(e) => Self::Assembly(e),
        }
    }
}
