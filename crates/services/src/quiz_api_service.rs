use std::sync::Arc;

use quiz_core::model::{
    HistoryEntry, IncompleteSession, IncompleteSessionCheck, Question, QuestionGroup, QuestionId,
    QuizSession, SessionId,
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::QuizApiError;
use crate::paths;
use crate::transport::QuizTransport;

/// Thin typed wrapper over the quiz service endpoints.
///
/// Every call is a single request; failures propagate unchanged.
#[derive(Clone)]
pub struct QuizApiService {
    transport: Arc<dyn QuizTransport>,
}

impl QuizApiService {
    #[must_use]
    pub fn new(transport: Arc<dyn QuizTransport>) -> Self {
        Self { transport }
    }

    /// # Errors
    ///
    /// Returns `QuizApiError` if the request fails or the payload is malformed.
    pub async fn question_groups(&self) -> Result<Vec<QuestionGroup>, QuizApiError> {
        self.transport.get(paths::QUESTION_GROUPS).await?.into_data()
    }

    /// All questions, ungrouped.
    ///
    /// # Errors
    ///
    /// Returns `QuizApiError` if the request fails or the payload is malformed.
    pub async fn all_questions(&self) -> Result<Vec<Question>, QuizApiError> {
        self.transport.get(paths::ALL_QUESTIONS).await?.into_data()
    }

    /// Start a new session for the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns `QuizApiError` if the request fails or the payload is malformed.
    pub async fn create_session(&self) -> Result<QuizSession, QuizApiError> {
        self.transport.post(paths::SESSIONS, None).await?.into_data()
    }

    /// Save or overwrite the answer to one question.
    ///
    /// `value` is sent as-is; the service stores it JSON-encoded.
    ///
    /// # Errors
    ///
    /// Returns `QuizApiError::NotFound` for an unknown session, or
    /// `QuizApiError::Status` when the session is no longer in progress.
    pub async fn save_answer(
        &self,
        session_id: &SessionId,
        question_id: &QuestionId,
        value: Value,
    ) -> Result<(), QuizApiError> {
        let body = json!({
            "question_id": question_id,
            "value": value,
        });
        self.transport
            .post(&paths::session_action(session_id, "answers"), Some(body))
            .await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `QuizApiError::Status` if the session was already completed or
    /// abandoned.
    pub async fn complete_session(
        &self,
        session_id: &SessionId,
    ) -> Result<QuizSession, QuizApiError> {
        self.transport
            .post(&paths::session_action(session_id, "complete"), None)
            .await?
            .into_data()
    }

    /// Most recent sessions first. The service applies its own default limit
    /// when `limit` is `None`.
    ///
    /// # Errors
    ///
    /// Returns `QuizApiError` if the request fails or the payload is malformed.
    pub async fn history(&self, limit: Option<u32>) -> Result<Vec<HistoryEntry>, QuizApiError> {
        self.transport.get(&paths::history(limit)).await?.into_data()
    }

    /// # Errors
    ///
    /// Returns `QuizApiError` if the request fails or the payload is malformed.
    pub async fn check_incomplete(&self) -> Result<IncompleteSession, QuizApiError> {
        let check: IncompleteSessionCheck = self
            .transport
            .get(paths::CHECK_INCOMPLETE)
            .await?
            .into_data()?;
        Ok(check.into_incomplete())
    }

    /// Raw report payload for a session.
    ///
    /// # Errors
    ///
    /// Returns `QuizApiError` if the request fails.
    pub async fn report(&self, session_id: &SessionId) -> Result<Value, QuizApiError> {
        let response = self
            .transport
            .get(&paths::session_action(session_id, "report"))
            .await?;
        Ok(response.data)
    }

    /// Delete an unfinished session.
    ///
    /// # Errors
    ///
    /// Returns `QuizApiError::Status` if the session is not in progress.
    pub async fn delete_session(&self, session_id: &SessionId) -> Result<(), QuizApiError> {
        self.transport.delete(&paths::session(session_id)).await?;
        Ok(())
    }

    /// Ask the service to elaborate a short free-text answer.
    ///
    /// # Errors
    ///
    /// Returns `QuizApiError::EmptyText` for blank input without sending a
    /// request, or `QuizApiError` if the request fails.
    pub async fn extend_text_with_ai(&self, text: &str) -> Result<String, QuizApiError> {
        if text.trim().is_empty() {
            return Err(QuizApiError::EmptyText);
        }
        let response: ExtendTextResponse = self
            .transport
            .post(paths::EXTEND_TEXT_WITH_AI, Some(json!({ "text": text })))
            .await?
            .into_data()?;
        Ok(response.extended_text)
    }
}

#[derive(Debug, Deserialize)]
struct ExtendTextResponse {
    extended_text: String,
}
