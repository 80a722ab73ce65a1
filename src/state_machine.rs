//! Conversation state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions.
//! [`Conversation::apply`] is the only way to change the message log.

mod conversation;
mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use conversation::{Conversation, ConversationSnapshot};
pub use effect::Effect;
pub use event::Event;
pub use state::{ConvState, DeliveryStatus, Message, Sender};
pub use transition::{transition, TransitionError, TransitionResult};
