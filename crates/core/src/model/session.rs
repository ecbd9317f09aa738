use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::model::ids::{QuestionId, SessionId};
use crate::model::timestamp::lenient_timestamp;

//
// ─── SESSION STATUS ────────────────────────────────────────────────────────────
//

/// Lifecycle state of a quiz session as reported by the service.
///
/// Unknown states are kept verbatim in `Other` so a newer backend does not
/// break session decoding.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SessionStatus {
    #[default]
    InProgress,
    Completed,
    Abandoned,
    Other(String),
}

impl SessionStatus {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            SessionStatus::InProgress => "in_progress",
            SessionStatus::Completed => "completed",
            SessionStatus::Abandoned => "abandoned",
            SessionStatus::Other(raw) => raw,
        }
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, SessionStatus::Completed)
    }
}

impl From<String> for SessionStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "in_progress" => Self::InProgress,
            "completed" => Self::Completed,
            "abandoned" => Self::Abandoned,
            _ => Self::Other(value),
        }
    }
}

impl From<SessionStatus> for String {
    fn from(value: SessionStatus) -> Self {
        value.as_str().to_owned()
    }
}

//
// ─── ANSWER RECORD ─────────────────────────────────────────────────────────────
//

/// One recorded response inside a session, exactly as the service stores it.
///
/// `value` may be a primitive or a string holding serialized JSON; see
/// [`crate::decode::decode_answer_value`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: QuestionId,
    #[serde(default)]
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

impl AnswerRecord {
    #[must_use]
    pub fn new(question_id: impl Into<QuestionId>, value: Value) -> Self {
        Self {
            question_id: question_id.into(),
            value,
            text: None,
            created_at: None,
        }
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Read-only copy of a server-side quiz session.
///
/// Fields the client does not model are retained in `extra` so the record can
/// be handed back to callers without loss. The id is read from `session_id`,
/// or from `id` when `session_id` is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SessionRecord")]
pub struct QuizSession {
    pub session_id: SessionId,
    pub status: SessionStatus,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration_ms: Option<i64>,
    pub user: Option<String>,
    pub total_questions: Option<u32>,
    /// `None` when the service omitted the collection or sent something that
    /// is not a sequence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answers: Option<Vec<AnswerRecord>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Wire shape of a session before the id is settled.
#[derive(Deserialize)]
struct SessionRecord {
    #[serde(default)]
    session_id: Option<SessionId>,
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    status: SessionStatus,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    start_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    duration_ms: Option<i64>,
    #[serde(default)]
    user: Option<String>,
    #[serde(default)]
    total_questions: Option<u32>,
    #[serde(default, deserialize_with = "answers_if_sequence")]
    answers: Option<Vec<AnswerRecord>>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl TryFrom<SessionRecord> for QuizSession {
    type Error = String;

    fn try_from(record: SessionRecord) -> Result<Self, Self::Error> {
        let mut extra = record.extra;
        let session_id = match (record.session_id, record.id) {
            (Some(session_id), id) => {
                if let Some(id) = id {
                    extra.insert("id".to_owned(), id);
                }
                session_id
            }
            (None, Some(id)) => SessionId::deserialize(id).map_err(|e| format!("id: {e}"))?,
            (None, None) => return Err("missing field `session_id`".to_owned()),
        };

        Ok(Self {
            session_id,
            status: record.status,
            start_time: record.start_time,
            end_time: record.end_time,
            duration_ms: record.duration_ms,
            user: record.user,
            total_questions: record.total_questions,
            answers: record.answers,
            extra,
        })
    }
}

impl QuizSession {
    #[must_use]
    pub fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            status: SessionStatus::InProgress,
            start_time: None,
            end_time: None,
            duration_ms: None,
            user: None,
            total_questions: None,
            answers: None,
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn with_answers(mut self, answers: Vec<AnswerRecord>) -> Self {
        self.answers = Some(answers);
        self
    }

    /// Recorded answers, or an empty slice when the collection is missing.
    #[must_use]
    pub fn answer_records(&self) -> &[AnswerRecord] {
        self.answers.as_deref().unwrap_or_default()
    }
}

fn answers_if_sequence<'de, D>(deserializer: D) -> Result<Option<Vec<AnswerRecord>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .map(AnswerRecord::deserialize)
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_service_payload() {
        let raw = json!({
            "session_id": "AROMA_x1",
            "status": "in_progress",
            "start_time": "2024-03-01T08:00:00+08:00",
            "end_time": null,
            "duration_ms": null,
            "user": "alice",
            "total_questions": 2,
            "completed_at": null,
            "answers": [
                {"question_id": "q1", "value": "\"a\"", "text": null, "created_at": "2024-03-01T00:01:00Z"},
                {"question_id": 2, "value": "[1, 2]"}
            ]
        });

        let session: QuizSession = serde_json::from_value(raw).unwrap();

        assert_eq!(session.session_id, SessionId::new("AROMA_x1"));
        assert_eq!(session.status, SessionStatus::InProgress);
        assert_eq!(
            session.start_time.unwrap().to_rfc3339(),
            "2024-03-01T00:00:00+00:00"
        );
        assert_eq!(session.answer_records().len(), 2);
        assert_eq!(session.answer_records()[1].question_id, QuestionId::from(2_u64));
        assert!(session.extra.contains_key("completed_at"));
    }

    #[test]
    fn accepts_id_alias_and_missing_fields() {
        let session: QuizSession = serde_json::from_value(json!({"id": "s1"})).unwrap();
        assert_eq!(session.session_id, SessionId::new("s1"));
        assert!(session.answers.is_none());
        assert!(session.answer_records().is_empty());
    }

    #[test]
    fn session_id_wins_over_id() {
        let session: QuizSession =
            serde_json::from_value(json!({"id": 17, "session_id": "AROMA_2"})).unwrap();
        assert_eq!(session.session_id, SessionId::new("AROMA_2"));
        assert_eq!(session.extra.get("id"), Some(&json!(17)));
    }

    #[test]
    fn missing_id_is_rejected() {
        let err = serde_json::from_value::<QuizSession>(json!({"status": "completed"})).unwrap_err();
        assert!(err.to_string().contains("session_id"));
    }

    #[test]
    fn naive_and_garbled_timestamps_do_not_fail_decoding() {
        let session: QuizSession = serde_json::from_value(json!({
            "session_id": "s1",
            "start_time": "2024-03-01T08:00:00.123456",
            "end_time": "not a time",
            "answers": [{"question_id": 1, "value": "x", "created_at": "2024-03-01T08:01:00"}]
        }))
        .unwrap();

        assert_eq!(
            session.start_time.unwrap().to_rfc3339(),
            "2024-03-01T08:00:00.123456+00:00"
        );
        assert!(session.end_time.is_none());
        assert!(session.answer_records()[0].created_at.is_some());
    }

    #[test]
    fn non_sequence_answers_are_treated_as_absent() {
        let session: QuizSession =
            serde_json::from_value(json!({"id": "s1", "answers": {"q1": "x"}})).unwrap();
        assert!(session.answers.is_none());

        let session: QuizSession =
            serde_json::from_value(json!({"id": "s1", "answers": null})).unwrap();
        assert!(session.answers.is_none());
    }

    #[test]
    fn unknown_status_is_preserved() {
        let session: QuizSession =
            serde_json::from_value(json!({"id": "s1", "status": "archived"})).unwrap();
        assert_eq!(session.status, SessionStatus::Other("archived".into()));
        assert_eq!(session.status.as_str(), "archived");
    }

    #[test]
    fn completed_status_round_trips_as_string() {
        let json = serde_json::to_value(SessionStatus::Completed).unwrap();
        assert_eq!(json, json!("completed"));
        assert!(SessionStatus::Completed.is_completed());
    }
}
