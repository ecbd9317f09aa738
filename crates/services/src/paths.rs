//! Service routes, relative to the configured base URL.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use quiz_core::model::SessionId;

/// Characters escaped inside a single path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

pub const QUESTION_GROUPS: &str = "/quiz/question-groups/";
pub const ALL_QUESTIONS: &str = "/quiz/all-questions/";
pub const SESSIONS: &str = "/quiz/sessions/";
pub const SESSION_HISTORY: &str = "/quiz/sessions/history/";
pub const CHECK_INCOMPLETE: &str = "/quiz/sessions/check-incomplete/";
pub const EXTEND_TEXT_WITH_AI: &str = "/quiz/extend-text-with-ai/";

#[must_use]
pub fn session(id: &SessionId) -> String {
    format!("{SESSIONS}{}/", segment(id))
}

#[must_use]
pub fn session_action(id: &SessionId, action: &str) -> String {
    format!("{SESSIONS}{}/{action}/", segment(id))
}

#[must_use]
pub fn history(limit: Option<u32>) -> String {
    match limit {
        Some(limit) => format!("{SESSION_HISTORY}?limit={limit}"),
        None => SESSION_HISTORY.to_owned(),
    }
}

fn segment(id: &SessionId) -> String {
    utf8_percent_encode(id.as_str(), SEGMENT).to_string()
}
