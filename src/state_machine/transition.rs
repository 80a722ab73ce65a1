//! Pure state transition function
//!
//! Two transitions exist: `submit` from Idle and `resolved` from Composing.
//! Everything else is rejected without effects.

use super::{ConvState, Effect, Event, Message};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ConvState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ConvState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Invalid transition: {event} while {state}")]
    InvalidTransition {
        event: &'static str,
        state: &'static str,
    },
}

/// Pure transition function
///
/// Given the same inputs it always produces the same outputs, with no I/O.
pub fn transition(state: &ConvState, event: Event) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // Idle + Submit -> Composing
        (ConvState::Idle, Event::Submit { id, text, timestamp }) => {
            let message = Message::user(id.clone(), text, timestamp);
            Ok(TransitionResult::new(ConvState::Composing {
                pending_message_id: id,
            })
            .with_effect(Effect::append(message))
            .with_effect(Effect::composing(true))
            .with_effect(Effect::RequestReply))
        }

        // Composing + Resolved -> Idle
        (
            ConvState::Composing { pending_message_id },
            Event::Resolved { id, text, timestamp },
        ) => Ok(TransitionResult::new(ConvState::Idle)
            .with_effect(Effect::MarkRead {
                message_id: pending_message_id.clone(),
            })
            .with_effect(Effect::append(Message::bot(id, text, timestamp)))
            .with_effect(Effect::composing(false))),

        // One turn at a time: submit while composing is refused, not queued
        (state, event) => Err(TransitionError::InvalidTransition {
            event: event.name(),
            state: state.name(),
        }),
    }
}
