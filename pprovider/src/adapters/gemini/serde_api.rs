//! Gemini `generateContent` payload serde models and conversion helpers.

use serde::{Deserialize, Serialize};

use crate::ProviderError;

use super::types::{GeminiRequest, GeminiResponse};

pub(crate) fn build_api_request(request: GeminiRequest) -> Result<GeminiApiRequest, ProviderError> {
    if request.contents.is_empty() {
        return Err(ProviderError::invalid_request(
            "Gemini request requires at least one content entry",
        ));
    }

    let system_instruction = if request.system_instruction.trim().is_empty() {
        None
    } else {
        Some(GeminiApiSystemInstruction {
            parts: vec![GeminiApiPart {
                text: request.system_instruction,
            }],
        })
    };

    Ok(GeminiApiRequest {
        system_instruction,
        contents: request
            .contents
            .into_iter()
            .map(|content| GeminiApiContent {
                role: content.role.as_str().to_string(),
                parts: vec![GeminiApiPart { text: content.text }],
            })
            .collect(),
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeminiApiRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<GeminiApiSystemInstruction>,
    pub contents: Vec<GeminiApiContent>,
}

#[derive(Debug, Serialize)]
pub(crate) struct GeminiApiSystemInstruction {
    pub parts: Vec<GeminiApiPart>,
}

#[derive(Debug, Serialize)]
pub(crate) struct GeminiApiContent {
    pub role: String,
    pub parts: Vec<GeminiApiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct GeminiApiPart {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeminiApiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiApiCandidate>,
    pub prompt_feedback: Option<GeminiApiPromptFeedback>,
    pub model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeminiApiCandidate {
    pub content: Option<GeminiApiCandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeminiApiCandidateContent {
    #[serde(default)]
    pub parts: Vec<GeminiApiPart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeminiApiPromptFeedback {
    pub block_reason: Option<String>,
}

impl TryFrom<GeminiApiResponse> for GeminiResponse {
    type Error = ProviderError;

    fn try_from(value: GeminiApiResponse) -> Result<Self, Self::Error> {
        let block_reason = value
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason);

        let Some(candidate) = value.candidates.into_iter().next() else {
            let message = match block_reason {
                Some(reason) => format!("Gemini blocked the prompt: {reason}"),
                None => "Gemini response did not include candidates".to_string(),
            };
            return Err(ProviderError::malformed_response(message));
        };

        let Some(content) = candidate.content else {
            let reason = candidate.finish_reason.as_deref().unwrap_or("unknown");
            return Err(ProviderError::malformed_response(format!(
                "Gemini candidate had no content (finish reason {reason})"
            )));
        };

        let text = content
            .parts
            .into_iter()
            .map(|part| part.text)
            .collect::<String>();

        Ok(Self {
            model_version: value.model_version,
            text,
            finish_reason: candidate.finish_reason,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeminiApiModelList {
    #[serde(default)]
    pub models: Vec<GeminiApiModel>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeminiApiModel {
    pub name: String,
}
