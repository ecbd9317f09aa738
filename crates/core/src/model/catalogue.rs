use serde::{Deserialize, Serialize};

use crate::model::ids::QuestionId;

/// Selectable option of a choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Kind of input a question expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    Single,
    Multiple,
    SingleWithText,
    ImageSingle,
    ImageMultiple,
    Text,
}

impl QuestionKind {
    /// Whether answers to this kind are stored as a list of option values.
    #[must_use]
    pub fn is_multi_select(&self) -> bool {
        matches!(self, QuestionKind::Multiple | QuestionKind::ImageMultiple)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    #[serde(default)]
    pub group_id: Option<String>,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(default)]
    pub image_range: Option<serde_json::Value>,
    #[serde(default)]
    pub images_path: Option<String>,
    #[serde(default = "one")]
    pub min_selection: u32,
    #[serde(default = "one")]
    pub max_selection: u32,
    #[serde(default)]
    pub show_text_when: Option<String>,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
}

/// A titled group of questions shown together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionGroup {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

fn one() -> u32 {
    1
}
