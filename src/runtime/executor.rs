//! Conversation runtime executor

use super::traits::ReplyResolver;
use super::SseEvent;

use crate::state_machine::{
    Conversation, ConversationSnapshot, Effect, Event, Message, TransitionError,
};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

const BROADCAST_CAPACITY: usize = 128;

/// Generic conversation runtime that can work with any reply resolver
pub struct ConversationRuntime<R>
where
    R: ReplyResolver + 'static,
{
    conversation: RwLock<Conversation>,
    resolver: Arc<R>,
    broadcast_tx: broadcast::Sender<SseEvent>,
}

impl<R> ConversationRuntime<R>
where
    R: ReplyResolver + 'static,
{
    /// Start a conversation holding only `greeting`
    pub fn new(greeting: &str, resolver: R) -> Self {
        let (broadcast_tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            conversation: RwLock::new(Conversation::seeded(greeting, Utc::now())),
            resolver: Arc::new(resolver),
            broadcast_tx,
        }
    }

    /// Append a user message and start resolving the reply in the background.
    ///
    /// Fails without touching the log while a reply is still being composed.
    /// Callers are expected to have rejected blank text already.
    pub async fn submit(self: &Arc<Self>, text: &str) -> Result<Message, TransitionError> {
        let (message, history) = {
            let mut conversation = self.conversation.write().await;
            let now = Utc::now();
            let id = conversation.next_message_id(now);
            let effects = conversation.apply(Event::Submit {
                id: id.clone(),
                text: text.to_string(),
                timestamp: now,
            })?;

            // Announce under the lock so subscribers see log order
            let request_reply = self.announce(&conversation, &effects);
            let history = request_reply.then(|| conversation.history());
            let message = conversation
                .message(&id)
                .cloned()
                .unwrap_or_else(|| Message::user(id, text, now));
            (message, history)
        };

        tracing::info!(message_id = %message.id, "User message submitted");

        if let Some(history) = history {
            self.spawn_reply(history);
        }

        Ok(message)
    }

    /// Deliver the bot reply for the pending user message
    pub async fn resolved(&self, text: String) -> Result<Message, TransitionError> {
        let mut conversation = self.conversation.write().await;
        let now = Utc::now();
        let id = conversation.next_message_id(now);
        let effects = conversation.apply(Event::Resolved {
            id: id.clone(),
            text: text.clone(),
            timestamp: now,
        })?;
        self.announce(&conversation, &effects);

        Ok(conversation
            .message(&id)
            .cloned()
            .unwrap_or_else(|| Message::bot(id, text, now)))
    }

    pub async fn snapshot(&self) -> ConversationSnapshot {
        self.conversation.read().await.snapshot()
    }

    /// Snapshot plus a receiver for every change made after it
    pub async fn subscribe(&self) -> (ConversationSnapshot, broadcast::Receiver<SseEvent>) {
        // Events are only sent under the write lock, so nothing slips between the two
        let conversation = self.conversation.read().await;
        (conversation.snapshot(), self.broadcast_tx.subscribe())
    }

    fn spawn_reply(self: &Arc<Self>, history: Vec<crate::llm::ChatTurn>) {
        let runtime = Arc::clone(self);
        tokio::spawn(async move {
            let reply = runtime.resolver.resolve(&history).await;
            match runtime.resolved(reply).await {
                Ok(message) => {
                    tracing::info!(message_id = %message.id, "Bot reply appended");
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to deliver bot reply");
                }
            }
        });
    }

    /// Broadcast the visible effects. Returns whether a reply was requested.
    fn announce(&self, conversation: &Conversation, effects: &[Effect]) -> bool {
        let mut request_reply = false;
        for effect in effects {
            let event = match effect {
                Effect::AppendMessage { message } => SseEvent::Message {
                    message: message.clone(),
                },
                Effect::MarkRead { message_id } => match conversation.message(message_id) {
                    Some(message) => SseEvent::MessageUpdated {
                        message: message.clone(),
                    },
                    None => continue,
                },
                Effect::NotifyStateChange { composing } => SseEvent::StateChange {
                    composing: *composing,
                },
                Effect::RequestReply => {
                    request_reply = true;
                    continue;
                }
            };
            // No receivers is fine
            let _ = self.broadcast_tx.send(event);
        }
        request_reply
    }
}
