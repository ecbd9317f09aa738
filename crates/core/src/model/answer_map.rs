use std::collections::HashMap;
use std::collections::hash_map;

use serde::Serialize;
use serde_json::Value;

use crate::model::ids::QuestionId;

/// Decoded answers keyed by question, ready to pre-populate a quiz view.
///
/// Built fresh on every resume and owned by whoever requested it; there is no
/// shared or persisted copy.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AnswerMap(HashMap<QuestionId, Value>);

impl AnswerMap {
    #[must_use]
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Insert an answer, returning the value it replaced.
    pub fn insert(&mut self, question_id: QuestionId, value: Value) -> Option<Value> {
        self.0.insert(question_id, value)
    }

    #[must_use]
    pub fn get(&self, question_id: &QuestionId) -> Option<&Value> {
        self.0.get(question_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, QuestionId, Value> {
        self.0.iter()
    }

    #[must_use]
    pub fn into_inner(self) -> HashMap<QuestionId, Value> {
        self.0
    }
}

impl<'a> IntoIterator for &'a AnswerMap {
    type Item = (&'a QuestionId, &'a Value);
    type IntoIter = hash_map::Iter<'a, QuestionId, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(QuestionId, Value)> for AnswerMap {
    fn from_iter<I: IntoIterator<Item = (QuestionId, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
