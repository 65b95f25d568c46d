//! Chat completion request and response types

use serde::{Deserialize, Serialize};

/// Message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One conversation message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Chat completion request body.
///
/// The deployment is part of the URL, so no model field is sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    /// Conversation messages
    pub messages: Vec<ChatMessage>,

    /// Sampling temperature (0.0 to 2.0)
    pub temperature: f32,
}

impl ChatRequest {
    /// Create a request with the given temperature and no messages
    pub fn new(temperature: f32) -> Self {
        Self {
            messages: Vec::new(),
            temperature,
        }
    }

    /// Add a message to the conversation.
    pub fn message(mut self, message: ChatMessage) -> Self {
        self.messages.push(message);
        self
    }

    /// Content of the first message with the given role
    pub fn content_of(&self, role: Role) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == role)
            .map(|m| m.content.as_str())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponseRaw {
    #[serde(default)]
    pub choices: Vec<ChoiceRaw>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChoiceRaw {
    pub message: ResponseMessageRaw,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponseMessageRaw {
    // null when the completion was filtered
    pub content: Option<String>,
}
