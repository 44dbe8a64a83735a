//! Conversation messages exchanged with the storefront chat widget.

use serde::{Deserialize, Serialize};

/// Author of a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single message in the conversation history, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: Role,
    pub content: String,
}

impl ConversationMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_use_lowercase_names() {
        let msg = ConversationMessage::assistant("Dzień dobry");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "assistant");
        assert_eq!(json["content"], "Dzień dobry");
    }

    #[test]
    fn unknown_role_is_rejected() {
        let err = serde_json::from_str::<ConversationMessage>(r#"{"role":"tool","content":"x"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn missing_content_is_rejected() {
        let err = serde_json::from_str::<ConversationMessage>(r#"{"role":"user"}"#);
        assert!(err.is_err());
    }
}
