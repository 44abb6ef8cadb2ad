//! Groq (OpenAI-compatible) HTTP payload serde models.

use serde::{Deserialize, Serialize};

use crate::ProviderError;

use super::types::{GroqRequest, GroqResponse};

pub(crate) fn build_api_request(request: GroqRequest) -> Result<GroqApiRequest, ProviderError> {
    if request.messages.is_empty() {
        return Err(ProviderError::invalid_request(
            "Groq request requires at least one message",
        ));
    }

    Ok(GroqApiRequest {
        model: request.model,
        messages: request
            .messages
            .into_iter()
            .map(|message| GroqApiMessage {
                role: message.role.as_str().to_string(),
                content: message.content,
            })
            .collect(),
        stream: false,
    })
}

#[derive(Debug, Serialize)]
pub(crate) struct GroqApiRequest {
    pub model: String,
    pub messages: Vec<GroqApiMessage>,
    pub stream: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct GroqApiMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GroqApiResponse {
    pub model: String,
    #[serde(default)]
    pub choices: Vec<GroqApiChoice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GroqApiChoice {
    pub message: GroqApiAssistantMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GroqApiAssistantMessage {
    pub content: Option<String>,
}

impl TryFrom<GroqApiResponse> for GroqResponse {
    type Error = ProviderError;

    fn try_from(value: GroqApiResponse) -> Result<Self, Self::Error> {
        let choice = value.choices.into_iter().next().ok_or_else(|| {
            ProviderError::malformed_response("Groq response did not include choices")
        })?;

        Ok(Self {
            model: value.model,
            content: choice.message.content.unwrap_or_default(),
            finish_reason: choice.finish_reason,
        })
    }
}
