//! Error taxonomy for backend exchanges.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failure of a single request/response exchange with the workspace backend.
pub enum BackendError {
    /// The request never produced a response (network failure, CORS rejection, DOM error).
    #[error("{0}")]
    Transport(String),
    /// The backend answered with a status outside `200..=299`.
    #[error("{message} (HTTP {status})")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Backend-provided detail, or the raw response text.
        message: String,
    },
    /// A success response carried a body of the wrong shape.
    #[error("unexpected response: {0}")]
    Decode(String),
    /// No backend is wired for this build or target.
    #[error("workspace backend unavailable: {0}")]
    Unavailable(&'static str),
}

impl BackendError {
    /// Builds a [`BackendError::Status`] from a status code and raw response body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = crate::backend::types::decode_error_detail(body)
            .unwrap_or_else(|| match body.trim() {
                "" => format!("request failed with status {status}"),
                raw => raw.to_string(),
            });
        Self::Status { status, message }
    }

    /// Returns the HTTP status for [`BackendError::Status`] errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
