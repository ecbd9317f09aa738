//! Request transport seam.
//!
//! Services talk to the quiz service only through [`QuizTransport`], so the
//! HTTP client can be swapped for [`InMemoryTransport`] in tests.

mod http;
mod memory;

use std::fmt;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::QuizApiError;

pub use http::HttpTransport;
pub use memory::{InMemoryTransport, RecordedRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        })
    }
}

/// Successful response from the quiz service.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    /// Decoded JSON body; `Value::Null` for empty bodies.
    pub data: Value,
}

impl ApiResponse {
    #[must_use]
    pub fn new(status: StatusCode, data: Value) -> Self {
        Self { status, data }
    }

    #[must_use]
    pub fn ok(data: Value) -> Self {
        Self::new(StatusCode::OK, data)
    }

    /// Deserialize the payload into `T`.
    ///
    /// # Errors
    ///
    /// Returns `QuizApiError::InvalidPayload` if the body does not match `T`.
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T, QuizApiError> {
        Ok(serde_json::from_value(self.data)?)
    }
}

/// Capability set the services need from the request layer.
#[async_trait]
pub trait QuizTransport: Send + Sync {
    /// # Errors
    ///
    /// Returns `QuizApiError::NotFound` for 404s, `QuizApiError::Status` for
    /// other unsuccessful statuses, or a transport-level error.
    async fn get(&self, path: &str) -> Result<ApiResponse, QuizApiError>;

    /// # Errors
    ///
    /// Same as [`QuizTransport::get`].
    async fn post(&self, path: &str, body: Option<Value>) -> Result<ApiResponse, QuizApiError>;

    /// # Errors
    ///
    /// Same as [`QuizTransport::get`].
    async fn delete(&self, path: &str) -> Result<ApiResponse, QuizApiError>;
}

/// Map a raw status and body onto the transport contract.
pub(crate) fn check_status(
    status: StatusCode,
    path: &str,
    data: Value,
) -> Result<ApiResponse, QuizApiError> {
    if status == StatusCode::NOT_FOUND {
        return Err(QuizApiError::NotFound {
            path: path.to_owned(),
        });
    }
    if !status.is_success() {
        let detail = data
            .get("detail")
            .and_then(Value::as_str)
            .map(str::to_owned);
        return Err(QuizApiError::Status {
            status,
            path: path.to_owned(),
            detail,
        });
    }
    Ok(ApiResponse::new(status, data))
}
