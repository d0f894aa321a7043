//! Report error types.

use thiserror::Error;

/// Errors from serializing or writing reports. Synthesis itself cannot fail.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
