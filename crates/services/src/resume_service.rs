use std::sync::Arc;

use quiz_core::model::{QuizSession, SessionId};
use quiz_core::ResumedSession;
use tracing::{debug, warn};

use crate::error::QuizApiError;
use crate::paths;
use crate::transport::QuizTransport;

/// Rebuilds the client-side answer map of a partially completed session.
///
/// Holds no state between calls; concurrent resumes of the same session
/// produce independent results.
#[derive(Clone)]
pub struct SessionResumeService {
    transport: Arc<dyn QuizTransport>,
}

impl SessionResumeService {
    #[must_use]
    pub fn new(transport: Arc<dyn QuizTransport>) -> Self {
        Self { transport }
    }

    /// Fetch `session_id` and decode its recorded answers.
    ///
    /// Answers that look like encoded JSON but fail to parse are kept as the
    /// original string and reported in `ResumedSession::fallbacks`; they never
    /// fail the call.
    ///
    /// # Errors
    ///
    /// Returns `QuizApiError::NotFound` if the session does not exist, any
    /// other transport error unchanged, or `QuizApiError::InvalidPayload` if
    /// the body is not a session record.
    pub async fn resume(&self, session_id: &SessionId) -> Result<ResumedSession, QuizApiError> {
        let session: QuizSession = self
            .transport
            .get(&paths::session(session_id))
            .await?
            .into_data()?;

        let resumed = ResumedSession::from_session(session);

        for fallback in &resumed.fallbacks {
            warn!(
                session_id = %session_id,
                question_id = %fallback.question_id,
                reason = %fallback.reason,
                "answer value looked like JSON but did not parse; keeping raw string"
            );
        }
        for question_id in &resumed.overwritten {
            debug!(
                session_id = %session_id,
                question_id = %question_id,
                "duplicate answer record, keeping the later one"
            );
        }
        debug!(
            session_id = %session_id,
            answers = resumed.answers.len(),
            "session resumed"
        );

        Ok(resumed)
    }
}
