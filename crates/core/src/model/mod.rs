mod answer_map;
mod catalogue;
mod history;
mod ids;
mod session;
mod timestamp;

pub use answer_map::AnswerMap;
pub use catalogue::{Question, QuestionGroup, QuestionKind, QuestionOption};
pub use history::{HistoryEntry, IncompleteSession, IncompleteSessionCheck};
pub use ids::{ParseIdError, QuestionId, SessionId};
pub use session::{AnswerRecord, QuizSession, SessionStatus};
pub use timestamp::parse_timestamp;
