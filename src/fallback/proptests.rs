//! Property-based tests for the keyword fallback

use super::{classify, LocalSimulator};
use crate::knowledge::{KnowledgeBase, Topic};
use proptest::prelude::*;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

proptest! {
    /// Classification depends only on the input text
    #[test]
    fn classify_is_pure(texts in proptest::collection::vec("[a-zA-Z ?!]{0,40}", 1..10)) {
        let rules = KnowledgeBase::arena_tuition().rules;
        let first: Vec<Option<Topic>> = texts.iter().map(|t| classify(t, &rules)).collect();

        let mut reversed: Vec<Option<Topic>> = texts.iter().rev().map(|t| classify(t, &rules)).collect();
        reversed.reverse();

        prop_assert_eq!(first, reversed);
    }

    /// Case never changes the outcome
    #[test]
    fn classify_ignores_case(text in "[a-zA-Z ]{0,40}") {
        let rules = KnowledgeBase::arena_tuition().rules;
        prop_assert_eq!(
            classify(&text.to_uppercase(), &rules),
            classify(&text.to_lowercase(), &rules)
        );
    }

    /// Any text containing a rule's keyword is classified to that rule or one before it
    #[test]
    fn keyword_hit_is_never_missed(
        prefix in "[a-z ]{0,15}",
        suffix in "[a-z ]{0,15}",
        rule_idx in 0usize..5,
        kw_seed in any::<usize>(),
    ) {
        let rules = KnowledgeBase::arena_tuition().rules;
        let rule = &rules[rule_idx];
        let keyword = &rule.keywords[kw_seed % rule.keywords.len()];
        let text = format!("{prefix}{keyword}{suffix}");

        let topic = classify(&text, &rules);
        let position = topic.and_then(|t| rules.iter().position(|r| r.topic == t));
        prop_assert!(matches!(position, Some(p) if p <= rule_idx));
    }

    /// The local fallback always has something to say
    #[test]
    fn simulator_reply_never_empty(text in "\\PC{0,60}") {
        let simulator = LocalSimulator::new(
            Arc::new(KnowledgeBase::arena_tuition()),
            Duration::ZERO,
            CancellationToken::new(),
        );
        prop_assert!(!simulator.reply_for(&text).trim().is_empty());
    }
}
