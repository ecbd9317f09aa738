use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::SessionId;
use crate::model::session::SessionStatus;
use crate::model::timestamp::lenient_timestamp;

/// One row of the user's quiz history listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub session_id: SessionId,
    #[serde(default)]
    pub status: SessionStatus,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration_ms: Option<i64>,
    #[serde(default)]
    pub answer_count: u32,
}

/// Most recent unfinished session, if the user has one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IncompleteSession {
    None,
    Pending {
        session_id: SessionId,
        start_time: Option<DateTime<Utc>>,
        answers_count: u32,
        total_questions: u32,
    },
}

impl IncompleteSession {
    #[must_use]
    pub fn session_id(&self) -> Option<&SessionId> {
        match self {
            IncompleteSession::None => None,
            IncompleteSession::Pending { session_id, .. } => Some(session_id),
        }
    }
}

/// Wire shape of the incomplete-session check; flattened into
/// [`IncompleteSession`] by [`IncompleteSessionCheck::into_incomplete`].
#[derive(Debug, Clone, Deserialize)]
pub struct IncompleteSessionCheck {
    pub has_incomplete: bool,
    #[serde(default)]
    pub session_id: Option<SessionId>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub answers_count: u32,
    #[serde(default)]
    pub total_questions: u32,
}

impl IncompleteSessionCheck {
    /// A positive check without a session id is treated as no session.
    #[must_use]
    pub fn into_incomplete(self) -> IncompleteSession {
        match (self.has_incomplete, self.session_id) {
            (true, Some(session_id)) => IncompleteSession::Pending {
                session_id,
                start_time: self.start_time,
                answers_count: self.answers_count,
                total_questions: self.total_questions,
            },
            _ => IncompleteSession::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pending_check_keeps_progress() {
        let check: IncompleteSessionCheck = serde_json::from_value(json!({
            "has_incomplete": true,
            "session_id": "AROMA_1",
            "start_time": "2024-03-01T00:00:00Z",
            "answers_count": 5,
            "total_questions": 40
        }))
        .unwrap();

        let incomplete = check.into_incomplete();
        assert_eq!(incomplete.session_id(), Some(&SessionId::new("AROMA_1")));
        match incomplete {
            IncompleteSession::Pending {
                answers_count,
                total_questions,
                ..
            } => {
                assert_eq!(answers_count, 5);
                assert_eq!(total_questions, 40);
            }
            IncompleteSession::None => panic!("expected pending session"),
        }
    }

    #[test]
    fn negative_check_has_no_session() {
        let check: IncompleteSessionCheck =
            serde_json::from_value(json!({"has_incomplete": false})).unwrap();
        assert_eq!(check.into_incomplete(), IncompleteSession::None);
    }

    #[test]
    fn positive_check_without_id_is_none() {
        let check: IncompleteSessionCheck =
            serde_json::from_value(json!({"has_incomplete": true})).unwrap();
        assert_eq!(check.into_incomplete(), IncompleteSession::None);
    }

    #[test]
    fn history_entry_decodes() {
        let entry: HistoryEntry = serde_json::from_value(json!({
            "session_id": "AROMA_2",
            "status": "completed",
            "start_time": "2024-03-01T00:00:00Z",
            "end_time": "2024-03-01T00:10:00Z",
            "duration_ms": 600000,
            "answer_count": 40
        }))
        .unwrap();
        assert!(entry.status.is_completed());
        assert_eq!(entry.duration_ms, Some(600_000));
    }

    #[test]
    fn naive_timestamps_are_read_as_utc() {
        let entry: HistoryEntry = serde_json::from_value(json!({
            "session_id": "AROMA_3",
            "start_time": "2024-03-01T08:00:00",
            "end_time": "garbled"
        }))
        .unwrap();
        assert_eq!(
            entry.start_time.unwrap().to_rfc3339(),
            "2024-03-01T08:00:00+00:00"
        );
        assert!(entry.end_time.is_none());

        let check: IncompleteSessionCheck = serde_json::from_value(json!({
            "has_incomplete": true,
            "session_id": "AROMA_3",
            "start_time": "2024-03-01 08:00:00.5"
        }))
        .unwrap();
        assert!(check.start_time.is_some());
    }
}
