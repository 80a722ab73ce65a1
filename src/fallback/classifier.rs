//! Keyword classifier

use crate::knowledge::{Topic, TopicRule};

/// Map text to the first topic whose keywords appear in it.
///
/// Matching is case-insensitive substring containment, so "mathematics"
/// matches the keyword "math". Rules are tested in slice order.
pub fn classify(text: &str, rules: &[TopicRule]) -> Option<Topic> {
    let lowered = text.to_lowercase();
    rules
        .iter()
        .find(|rule| {
            rule.keywords
                .iter()
                .filter(|keyword| !keyword.trim().is_empty())
                .any(|keyword| lowered.contains(keyword.as_str()))
        })
        .map(|rule| rule.topic)
}
