//! Domain knowledge for the tuition assistant
//!
//! Holds the persona instruction sent with every remote request, the seeded
//! greeting, and the keyword rules used by the local fallback. The data is
//! passed around as an explicit value so each piece can be swapped in tests.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Persona instruction for Arena Tuition Classes
const ARENA_PERSONA: &str = r"You are a helpful assistant for Arena Tuition Classes.

Details:
- Available Subjects: Mathematics, Science, English
- Grades: 1st to 12th

Fees Structure:
- Primary (1-5): $40/month
- Middle (6-8): $50/month
- High School (9-12): $70/month

Location: 123 Education Lane, Knowledge City
Contact: +1 234 567 8900

Instructions:
- Be polite and helpful.
- Keep responses concise, similar to WhatsApp messages.
- If asked about enrolling, guide them to visit the office.
- Use emojis occasionally.";

const ARENA_GREETING: &str = "Hello! Welcome to Arena Tuition Classes. How can I help you today?";

const ARENA_DEFAULT_REPLY: &str = "Thanks for reaching out to Arena Tuition Classes! 😊 I can help with fees, subjects, class timings, our location and enrollment. What would you like to know?";

/// Classification bucket for the local fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Pricing,
    Subjects,
    Schedule,
    Location,
    Enroll,
}

impl Topic {
    pub fn as_str(self) -> &'static str {
        match self {
            Topic::Pricing => "pricing",
            Topic::Subjects => "subjects",
            Topic::Schedule => "schedule",
            Topic::Location => "location",
            Topic::Enroll => "enroll",
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword set for one topic together with its canned reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicRule {
    pub topic: Topic,
    /// Lower-case fragments matched by substring containment
    pub keywords: Vec<String>,
    pub reply: String,
}

impl TopicRule {
    fn new(topic: Topic, keywords: &[&str], reply: &str) -> Self {
        Self {
            topic,
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
            reply: reply.to_string(),
        }
    }
}

/// Errors raised while loading a knowledge file
#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("Failed to read knowledge file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse knowledge file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid knowledge base: {0}")]
    Invalid(String),
}

/// Everything the assistant knows about the business it represents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    /// System instruction sent with every remote completion request
    pub persona: String,
    /// First bot message of every conversation
    pub greeting: String,
    /// Rules in priority order; the first match wins
    pub rules: Vec<TopicRule>,
    /// Reply used when no rule matches
    pub default_reply: String,
}

impl KnowledgeBase {
    /// Built-in knowledge for Arena Tuition Classes
    pub fn arena_tuition() -> Self {
        Self {
            persona: ARENA_PERSONA.to_string(),
            greeting: ARENA_GREETING.to_string(),
            rules: vec![
                TopicRule::new(
                    Topic::Pricing,
                    &["fee", "price", "cost", "charge", "how much", "pay"],
                    "Our monthly fees are 💰\n- Primary (1-5): $40/month\n- Middle (6-8): $50/month\n- High School (9-12): $70/month",
                ),
                TopicRule::new(
                    Topic::Subjects,
                    &["subject", "math", "science", "english", "teach", "course", "grade"],
                    "We teach Mathematics, Science and English for grades 1st to 12th 📚",
                ),
                TopicRule::new(
                    Topic::Schedule,
                    &["schedule", "timing", "time", "when", "hours", "days", "batch"],
                    "Batch timings depend on the grade and subject 🕓 Please call us at +1 234 567 8900 and we'll share the current schedule.",
                ),
                TopicRule::new(
                    Topic::Location,
                    &["where", "location", "located", "address", "direction", "reach you"],
                    "You can find us at 123 Education Lane, Knowledge City 📍",
                ),
                TopicRule::new(
                    Topic::Enroll,
                    &["enroll", "enrol", "admission", "join", "register", "sign up"],
                    "We'd love to have you! 🎉 To enroll, please visit our office at 123 Education Lane, Knowledge City and our team will guide you through admission.",
                ),
            ],
            default_reply: ARENA_DEFAULT_REPLY.to_string(),
        }
    }

    /// Load a knowledge base from a JSON file.
    ///
    /// Keywords are normalized before validation, so a file may use any case.
    pub fn load(path: &Path) -> Result<Self, KnowledgeError> {
        let raw = std::fs::read_to_string(path)?;
        let mut knowledge: KnowledgeBase = serde_json::from_str(&raw)?;
        knowledge.normalize_keywords();
        knowledge.validate()?;
        Ok(knowledge)
    }

    /// Trim and lower-case every keyword, dropping blank ones
    pub fn normalize_keywords(&mut self) {
        for rule in &mut self.rules {
            rule.keywords = rule
                .keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect();
        }
    }

    /// Reject data that would let the fallback produce an empty reply
    pub fn validate(&self) -> Result<(), KnowledgeError> {
        if self.persona.trim().is_empty() {
            return Err(KnowledgeError::Invalid("persona is empty".to_string()));
        }
        if self.greeting.trim().is_empty() {
            return Err(KnowledgeError::Invalid("greeting is empty".to_string()));
        }
        if self.default_reply.trim().is_empty() {
            return Err(KnowledgeError::Invalid("default_reply is empty".to_string()));
        }

        let mut seen = HashSet::new();
        for rule in &self.rules {
            if !seen.insert(rule.topic) {
                return Err(KnowledgeError::Invalid(format!(
                    "topic {} listed more than once",
                    rule.topic
                )));
            }
            if rule.reply.trim().is_empty() {
                return Err(KnowledgeError::Invalid(format!(
                    "topic {} has an empty reply",
                    rule.topic
                )));
            }
            if rule.keywords.is_empty() {
                return Err(KnowledgeError::Invalid(format!(
                    "topic {} has no keywords",
                    rule.topic
                )));
            }
            if let Some(keyword) = rule
                .keywords
                .iter()
                .find(|k| k.trim().is_empty() || **k != k.trim().to_lowercase())
            {
                return Err(KnowledgeError::Invalid(format!(
                    "topic {} has keyword {keyword:?} that is blank or not trimmed lower-case",
                    rule.topic
                )));
            }
        }

        Ok(())
    }

    /// Canned reply for a topic, if a rule exists for it
    pub fn reply_for(&self, topic: Topic) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.topic == topic)
            .map(|rule| rule.reply.as_str())
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::arena_tuition()
    }
}
