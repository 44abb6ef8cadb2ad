//! Groq adapter types and canonical turn conversion.

use crate::{Speaker, Turn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroqRequest {
    pub model: String,
    pub messages: Vec<GroqMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroqMessage {
    pub role: GroqRole,
    pub content: String,
}

impl GroqMessage {
    pub fn new(role: GroqRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

impl From<&Turn> for GroqMessage {
    fn from(value: &Turn) -> Self {
        Self::new(value.speaker().into(), value.content())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroqRole {
    System,
    User,
    Assistant,
}

impl GroqRole {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl From<Speaker> for GroqRole {
    fn from(value: Speaker) -> Self {
        match value {
            Speaker::User => Self::User,
            Speaker::Assistant => Self::Assistant,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroqResponse {
    pub model: String,
    pub content: String,
    pub finish_reason: Option<String>,
}
