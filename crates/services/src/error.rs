//! Shared error types for the services crate.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors emitted by the quiz API transports and services.
///
/// Fetch failures reach callers unchanged; nothing in this crate retries or
/// rewrites them.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizApiError {
    #[error("not found: {path}")]
    NotFound { path: String },
    #[error("request to {path} failed with status {status}")]
    Status {
        status: StatusCode,
        path: String,
        /// Message from the service's `{"detail": ...}` body, when present.
        detail: Option<String>,
    },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("unexpected response payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
    #[error("text to extend cannot be empty")]
    EmptyText,
}

impl QuizApiError {
    /// Service-provided detail message, if the error carries one.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            QuizApiError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}
