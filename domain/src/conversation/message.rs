//! Conversation messages

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static NEXT_LOCAL_ID: AtomicU64 = AtomicU64::new(1);

/// Identifier of a message, unique within a conversation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh id for a locally created message.
    ///
    /// Combines the wall clock with a process-wide counter so two ids minted
    /// within the same millisecond still differ.
    pub fn generate() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        let seq = NEXT_LOCAL_ID.fetch_add(1, Ordering::Relaxed);
        Self(format!("local-{millis}-{seq}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Human,
    Ai,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Human => "human",
            Role::Ai => "ai",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "human" | "user" => Ok(Role::Human),
            "ai" | "assistant" => Ok(Role::Ai),
            other => Err(DomainError::UnknownRole(other.to_string())),
        }
    }
}

/// A message in the conversation (Entity)
///
/// Fields are private: a message never changes after it has been appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    role: Role,
    content: String,
}

impl Message {
    pub fn new(id: MessageId, role: Role, content: impl Into<String>) -> Self {
        Self {
            id,
            role,
            content: content.into(),
        }
    }

    pub fn human(id: MessageId, content: impl Into<String>) -> Self {
        Self::new(id, Role::Human, content)
    }

    pub fn ai(id: MessageId, content: impl Into<String>) -> Self {
        Self::new(id, Role::Ai, content)
    }

    pub fn id(&self) -> &MessageId {
        &self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_ai(&self) -> bool {
        self.role == Role::Ai
    }

    pub fn is_human(&self) -> bool {
        self.role == Role::Human
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!("human".parse::<Role>().unwrap(), Role::Human);
        assert_eq!("AI".parse::<Role>().unwrap(), Role::Ai);
        assert_eq!("assistant".parse::<Role>().unwrap(), Role::Ai);
        assert!("tool".parse::<Role>().is_err());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = MessageId::generate();
        let b = MessageId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("local-"));
    }

    #[test]
    fn test_message_accessors() {
        let msg = Message::ai(MessageId::new("m1"), "The answer is 4.");
        assert_eq!(msg.id().as_str(), "m1");
        assert!(msg.is_ai());
        assert!(!msg.is_human());
        assert_eq!(msg.content(), "The answer is 4.");
    }

    #[test]
    fn test_message_serde_shape() {
        let msg = Message::human(MessageId::new("h1"), "hi");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["id"], "h1");
        assert_eq!(json["role"], "human");
        assert_eq!(json["content"], "hi");
    }
}
