//! Chat transcript messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a single chat message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub uuid::Uuid);

impl MessageId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    User,
    Assistant,
}

/// One entry in the append-only conversation. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: MessageId,
    pub author: Author,
    pub text: String,
    pub created_at: DateTime<Utc>,
    /// Set on assistant replies to a serious assessment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity_flag: Option<bool>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: MessageId::new(),
            author: Author::User,
            text: text.into(),
            created_at,
            severity_flag: None,
        }
    }

    pub fn assistant(text: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: MessageId::new(),
            author: Author::Assistant,
            text: text.into(),
            created_at,
            severity_flag: None,
        }
    }

    /// Mark an assistant reply with the outcome of its assessment.
    pub fn with_severity_flag(mut self, serious: bool) -> Self {
        self.severity_flag = Some(serious);
        self
    }

    pub fn is_serious(&self) -> bool {
        self.severity_flag.unwrap_or(false)
    }
}
