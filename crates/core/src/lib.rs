#![forbid(unsafe_code)]

pub mod decode;
pub mod model;
pub mod navigation;
pub mod reconcile;

pub use decode::{DecodedAnswer, decode_answer_value};
pub use reconcile::{DecodeFallback, ReconciledAnswers, ResumedSession, reconcile_answers};
