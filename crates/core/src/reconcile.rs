use serde::Serialize;
use thiserror::Error;

use crate::decode::{DecodedAnswer, decode_answer_value};
use crate::model::{AnswerMap, AnswerRecord, QuestionId, QuizSession};

//
// ─── DECODE FALLBACK ───────────────────────────────────────────────────────────
//

/// Non-fatal observation: an answer looked like encoded JSON but did not
/// parse, so the original string was kept.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("answer for question {question_id} kept verbatim: {reason}")]
pub struct DecodeFallback {
    pub question_id: QuestionId,
    pub raw: String,
    pub reason: String,
}

//
// ─── RECONCILIATION ────────────────────────────────────────────────────────────
//

/// Answer map plus everything worth reporting about how it was built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconciledAnswers {
    pub answers: AnswerMap,
    pub fallbacks: Vec<DecodeFallback>,
    /// Question ids that appeared more than once; the last record won.
    pub overwritten: Vec<QuestionId>,
}

/// Decode each record and key it by question id.
///
/// Later records replace earlier ones with the same id.
#[must_use]
pub fn reconcile_answers<I>(records: I) -> ReconciledAnswers
where
    I: IntoIterator<Item = AnswerRecord>,
{
    let mut out = ReconciledAnswers::default();

    for record in records {
        let decoded = decode_answer_value(record.value);
        if let DecodedAnswer::Fallback { raw, error } = &decoded {
            out.fallbacks.push(DecodeFallback {
                question_id: record.question_id.clone(),
                raw: raw.clone(),
                reason: error.to_string(),
            });
        }

        if out
            .answers
            .insert(record.question_id.clone(), decoded.into_value())
            .is_some()
        {
            out.overwritten.push(record.question_id);
        }
    }

    out
}

//
// ─── RESUMED SESSION ───────────────────────────────────────────────────────────
//

/// A fetched session together with its client-ready answer map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumedSession {
    pub session: QuizSession,
    pub answers: AnswerMap,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fallbacks: Vec<DecodeFallback>,
    #[serde(skip)]
    pub overwritten: Vec<QuestionId>,
}

impl ResumedSession {
    /// Rebuild the answer map from the session's own records.
    ///
    /// A session without an answers collection yields an empty map.
    #[must_use]
    pub fn from_session(session: QuizSession) -> Self {
        let ReconciledAnswers {
            answers,
            fallbacks,
            overwritten,
        } = reconcile_answers(session.answer_records().iter().cloned());

        Self {
            session,
            answers,
            fallbacks,
            overwritten,
        }
    }
}
