//! Gemini adapter types and canonical turn conversion.

use crate::{Speaker, Turn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiRequest {
    pub model: String,
    pub system_instruction: String,
    pub contents: Vec<GeminiContent>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiContent {
    pub role: GeminiRole,
    pub text: String,
}

impl GeminiContent {
    pub fn new(role: GeminiRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }
}

impl From<&Turn> for GeminiContent {
    fn from(value: &Turn) -> Self {
        Self::new(value.speaker().into(), value.content())
    }
}

/// Gemini labels assistant turns `model`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeminiRole {
    User,
    Model,
}

impl GeminiRole {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Model => "model",
        }
    }
}

impl From<Speaker> for GeminiRole {
    fn from(value: Speaker) -> Self {
        match value {
            Speaker::User => Self::User,
            Speaker::Assistant => Self::Model,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiResponse {
    pub model_version: Option<String>,
    pub text: String,
    pub finish_reason: Option<String>,
}
