// ABOUTME: Answer set accumulated by a form session
// ABOUTME: Insertion-ordered mapping from field id to submitted value

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    values: IndexMap<String, String>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer, returning the value it replaced
    pub fn insert(&mut self, field_id: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(field_id.into(), value.into())
    }

    pub fn with(mut self, field_id: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(field_id, value);
        self
    }

    pub fn remove(&mut self, field_id: &str) -> Option<String> {
        self.values.shift_remove(field_id)
    }

    pub fn get(&self, field_id: &str) -> Option<&str> {
        self.values.get(field_id).map(String::as_str)
    }

    /// Answer for `field_id` unless it is absent or blank
    pub fn non_empty(&self, field_id: &str) -> Option<&str> {
        self.get(field_id).filter(|value| !value.trim().is_empty())
    }

    pub fn is_answered(&self, field_id: &str) -> bool {
        self.non_empty(field_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(field_id, value)| (field_id.as_str(), value.as_str()))
    }

    /// Copy of this set keeping only the given fields
    pub fn restricted_to(&self, field_ids: &HashSet<&str>) -> AnswerSet {
        self.values
            .iter()
            .filter(|(field_id, _)| field_ids.contains(field_id.as_str()))
            .map(|(field_id, value)| (field_id.clone(), value.clone()))
            .collect()
    }
}

impl FromIterator<(String, String)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl Extend<(String, String)> for AnswerSet {
    fn extend<I: IntoIterator<Item = (String, String)>>(&mut self, iter: I) {
        self.values.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_answers_are_not_answered() {
        let answers = AnswerSet::new()
            .with("name", "Ada")
            .with("email", "")
            .with("company", "   ");

        assert!(answers.is_answered("name"));
        assert!(!answers.is_answered("email"));
        assert!(!answers.is_answered("company"));
        assert!(!answers.is_answered("missing"));
        assert_eq!(answers.get("company"), Some("   "));
    }

    #[test]
    fn test_insert_replaces_and_keeps_order() {
        let mut answers = AnswerSet::new().with("a", "1").with("b", "2");
        assert_eq!(answers.insert("a", "3"), Some("1".to_string()));

        let collected: Vec<_> = answers.iter().collect();
        assert_eq!(collected, vec![("a", "3"), ("b", "2")]);

        answers.remove("a");
        assert_eq!(answers.len(), 1);
    }

    #[test]
    fn test_restricted_to() {
        let answers = AnswerSet::new().with("a", "1").with("b", "2").with("c", "3");
        let keep: HashSet<&str> = ["a", "c"].into_iter().collect();

        let restricted = answers.restricted_to(&keep);
        assert_eq!(restricted, AnswerSet::new().with("a", "1").with("c", "3"));
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let answers = AnswerSet::new().with("main_selection", "two");
        let json = serde_json::to_string(&answers).unwrap();
        assert_eq!(json, r#"{"main_selection":"two"}"#);
    }
}
