use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use tracing::debug;

use super::{ApiResponse, Method, QuizTransport, check_status};
use crate::config::QuizApiConfig;
use crate::error::QuizApiError;

/// `reqwest`-backed transport against a live quiz service.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    config: QuizApiConfig,
}

impl HttpTransport {
    #[must_use]
    pub fn new(config: QuizApiConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    #[must_use]
    pub fn with_client(client: Client, config: QuizApiConfig) -> Self {
        Self { client, config }
    }

    #[must_use]
    pub fn config(&self) -> &QuizApiConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.config.endpoint(path);
        let builder = match method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Delete => self.client.delete(url),
        };
        match &self.config.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<ApiResponse, QuizApiError> {
        debug!(%method, path, "quiz api request");

        let mut request = self.request(method, path);
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        let data = decode_body(status, &bytes)?;

        debug!(%method, path, status = status.as_u16(), "quiz api response");
        check_status(status, path, data)
    }
}

#[async_trait]
impl QuizTransport for HttpTransport {
    async fn get(&self, path: &str) -> Result<ApiResponse, QuizApiError> {
        self.send(Method::Get, path, None).await
    }

    async fn post(&self, path: &str, body: Option<Value>) -> Result<ApiResponse, QuizApiError> {
        self.send(Method::Post, path, body).await
    }

    async fn delete(&self, path: &str) -> Result<ApiResponse, QuizApiError> {
        self.send(Method::Delete, path, None).await
    }
}

/// Turn a response body into JSON.
///
/// Empty bodies become `Value::Null`. Error bodies that are not JSON also
/// become `Value::Null`, leaving the status to speak for itself.
///
/// # Errors
///
/// Returns `QuizApiError::InvalidPayload` if a successful response carries a
/// body that is not JSON.
fn decode_body(status: StatusCode, bytes: &[u8]) -> Result<Value, QuizApiError> {
    if bytes.is_empty() {
        return Ok(Value::Null);
    }
    if status.is_success() {
        return Ok(serde_json::from_slice(bytes)?);
    }
    Ok(serde_json::from_slice(bytes).unwrap_or(Value::Null))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_no_content_body_is_null() {
        let data = decode_body(StatusCode::NO_CONTENT, b"").unwrap();
        assert_eq!(data, Value::Null);

        let response = check_status(StatusCode::NO_CONTENT, "/quiz/sessions/s1/", data).unwrap();
        assert_eq!(response.data, Value::Null);
    }

    #[test]
    fn html_error_page_still_maps_to_status() {
        let page = b"<html><body>Bad Gateway</body></html>";
        let data = decode_body(StatusCode::BAD_GATEWAY, page).unwrap();
        assert_eq!(data, Value::Null);

        let err = check_status(StatusCode::BAD_GATEWAY, "/quiz/sessions/s1/", data).unwrap_err();
        assert!(matches!(
            err,
            QuizApiError::Status { status, detail: None, .. } if status == StatusCode::BAD_GATEWAY
        ));
    }

    #[test]
    fn html_not_found_page_maps_to_not_found() {
        let data = decode_body(StatusCode::NOT_FOUND, b"<h1>Not Found</h1>").unwrap();
        let err = check_status(StatusCode::NOT_FOUND, "/quiz/sessions/s1/", data).unwrap_err();
        assert!(matches!(err, QuizApiError::NotFound { .. }));
    }

    #[test]
    fn json_error_body_is_kept() {
        let data = decode_body(StatusCode::BAD_REQUEST, br#"{"detail": "no"}"#).unwrap();
        assert_eq!(data, json!({"detail": "no"}));
    }

    #[test]
    fn malformed_success_body_is_invalid_payload() {
        let err = decode_body(StatusCode::OK, b"{\"session_id\":").unwrap_err();
        assert!(matches!(err, QuizApiError::InvalidPayload(_)));
    }
}
