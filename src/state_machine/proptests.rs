//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across arbitrary event sequences.

use super::*;
use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

#[derive(Debug, Clone)]
enum Step {
    Submit(String),
    Resolve(String),
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        "[a-zA-Z ?]{1,30}".prop_map(Step::Submit),
        "[a-zA-Z !]{1,30}".prop_map(Step::Resolve),
    ]
}

/// Timestamps drawn from a tiny window so many collide on the same millisecond
fn arb_timestamp() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..3).prop_map(|offset| Utc.timestamp_millis_opt(1_700_000_000_000 + offset).unwrap())
}

fn event_for(conv: &Conversation, step: &Step, at: DateTime<Utc>) -> Event {
    match step {
        Step::Submit(text) => Event::Submit {
            id: conv.next_message_id(at),
            text: text.clone(),
            timestamp: at,
        },
        Step::Resolve(text) => Event::Resolved {
            id: conv.next_message_id(at),
            text: text.clone(),
            timestamp: at,
        },
    }
}

fn seeded() -> Conversation {
    Conversation::seeded("Hello!", Utc.timestamp_millis_opt(1_700_000_000_000).unwrap())
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Ids never repeat, whatever the timing of submissions
    #[test]
    fn message_ids_unique(steps in proptest::collection::vec((arb_step(), arb_timestamp()), 0..40)) {
        let mut conv = seeded();
        for (step, at) in &steps {
            let event = event_for(&conv, step, *at);
            let _ = conv.apply(event);
        }

        let mut ids: Vec<&str> = conv.messages().iter().map(|m| m.id.as_str()).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), total);
    }

    /// The log only ever grows, and existing entries keep their identity
    #[test]
    fn log_is_append_only(steps in proptest::collection::vec((arb_step(), arb_timestamp()), 0..40)) {
        let mut conv = seeded();
        for (step, at) in &steps {
            let before: Vec<(String, String)> = conv
                .messages()
                .iter()
                .map(|m| (m.id.clone(), m.text.clone()))
                .collect();

            let event = event_for(&conv, step, *at);
            let _ = conv.apply(event);

            let after: Vec<(String, String)> = conv
                .messages()
                .iter()
                .map(|m| (m.id.clone(), m.text.clone()))
                .collect();
            prop_assert!(after.len() >= before.len());
            prop_assert_eq!(&after[..before.len()], &before[..]);
        }
    }

    /// At most one user message is unresolved, and only while composing
    #[test]
    fn at_most_one_outstanding_message(steps in proptest::collection::vec((arb_step(), arb_timestamp()), 0..40)) {
        let mut conv = seeded();
        for (step, at) in &steps {
            let event = event_for(&conv, step, *at);
            let _ = conv.apply(event);

            let outstanding = conv
                .messages()
                .iter()
                .filter(|m| m.status == Some(DeliveryStatus::Sent))
                .count();
            let composing = conv.snapshot().composing;
            prop_assert!(outstanding <= 1);
            prop_assert_eq!(outstanding == 1, composing);
        }
    }

    /// Rejected events change nothing
    #[test]
    fn rejection_is_side_effect_free(steps in proptest::collection::vec((arb_step(), arb_timestamp()), 0..40)) {
        let mut conv = seeded();
        for (step, at) in &steps {
            let snapshot = conv.snapshot();
            let state = conv.state().clone();

            let event = event_for(&conv, step, *at);
            if conv.apply(event).is_err() {
                prop_assert_eq!(conv.snapshot(), snapshot);
                prop_assert_eq!(conv.state(), &state);
            }
        }
    }

    /// Bot messages never carry a status; user messages always do
    #[test]
    fn status_only_on_user_messages(steps in proptest::collection::vec((arb_step(), arb_timestamp()), 0..40)) {
        let mut conv = seeded();
        for (step, at) in &steps {
            let event = event_for(&conv, step, *at);
            let _ = conv.apply(event);
        }
        for message in conv.messages() {
            match message.sender {
                Sender::Bot => prop_assert!(message.status.is_none()),
                Sender::User => prop_assert!(message.status.is_some()),
            }
        }
    }
}
