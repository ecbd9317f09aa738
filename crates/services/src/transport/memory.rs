use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::Value;

use super::{ApiResponse, Method, QuizTransport, check_status};
use crate::error::QuizApiError;

/// A request observed by [`InMemoryTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
enum CannedReply {
    Respond(ApiResponse),
    Fail(String),
}

/// Canned-response transport for tests and offline prototyping.
///
/// Routes without a registered reply answer with `NotFound`.
#[derive(Clone, Default)]
pub struct InMemoryTransport {
    replies: Arc<Mutex<HashMap<(Method, String), CannedReply>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl InMemoryTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the response for `method path`, replacing any earlier one.
    pub fn respond(&self, method: Method, path: impl Into<String>, response: ApiResponse) {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((method, path.into()), CannedReply::Respond(response));
    }

    /// Shorthand for a `200 OK` JSON response.
    pub fn respond_json(&self, method: Method, path: impl Into<String>, data: Value) {
        self.respond(method, path, ApiResponse::ok(data));
    }

    /// Make `method path` fail below the HTTP layer.
    pub fn fail(&self, method: Method, path: impl Into<String>, message: impl Into<String>) {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((method, path.into()), CannedReply::Fail(message.into()));
    }

    /// Requests seen so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn handle(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<ApiResponse, QuizApiError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedRequest {
                method,
                path: path.to_owned(),
                body,
            });

        let reply = self
            .replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(method, path.to_owned()))
            .cloned();

        match reply {
            Some(CannedReply::Respond(response)) => {
                check_status(response.status, path, response.data)
            }
            Some(CannedReply::Fail(message)) => Err(QuizApiError::Transport(message)),
            None => Err(QuizApiError::NotFound {
                path: path.to_owned(),
            }),
        }
    }
}

#[async_trait]
impl QuizTransport for InMemoryTransport {
    async fn get(&self, path: &str) -> Result<ApiResponse, QuizApiError> {
        self.handle(Method::Get, path, None)
    }

    async fn post(&self, path: &str, body: Option<Value>) -> Result<ApiResponse, QuizApiError> {
        self.handle(Method::Post, path, body)
    }

    async fn delete(&self, path: &str) -> Result<ApiResponse, QuizApiError> {
        self.handle(Method::Delete, path, None)
    }
}
