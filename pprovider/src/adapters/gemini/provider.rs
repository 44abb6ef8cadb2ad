//! Gemini provider implementation over transport and canonical turns.

use std::sync::Arc;

use reqwest::Client;

use crate::{
    ModelProvider, ProviderError, ProviderFuture, ProviderId, ProviderOutcome,
    SecureCredentialManager, Turn,
};

use super::auth::resolve_gemini_auth;
use super::transport::{GeminiHttpTransport, GeminiTransport};
use super::types::{GeminiContent, GeminiRequest, GeminiRole};

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const GEMINI_DEFAULT_MODEL: &str = "gemini-1.5-flash";

#[derive(Clone)]
pub struct GeminiProvider {
    credentials: Arc<SecureCredentialManager>,
    transport: Arc<dyn GeminiTransport>,
    model: String,
}

impl GeminiProvider {
    pub fn new(
        credentials: Arc<SecureCredentialManager>,
        transport: Arc<dyn GeminiTransport>,
    ) -> Self {
        Self {
            credentials,
            transport,
            model: GEMINI_DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        let model = model.into();
        if !model.trim().is_empty() {
            self.model = model;
        }
        self
    }

    pub fn default_http_transport(client: Client) -> GeminiHttpTransport {
        GeminiHttpTransport::new(client)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// The system prompt travels separately as `systemInstruction`; contents are
    /// the history followed by the new user message.
    pub(crate) fn build_request(
        &self,
        system_prompt: &str,
        history: &[Turn],
        user_message: &str,
    ) -> GeminiRequest {
        let mut contents = Vec::with_capacity(history.len() + 1);
        contents.extend(history.iter().map(GeminiContent::from));
        contents.push(GeminiContent::new(GeminiRole::User, user_message));

        GeminiRequest {
            model: self.model.clone(),
            system_instruction: system_prompt.to_string(),
            contents,
        }
    }

    async fn try_generate(
        &self,
        system_prompt: &str,
        history: &[Turn],
        user_message: &str,
    ) -> Result<String, ProviderError> {
        let api_key = resolve_gemini_auth(&self.credentials)?;
        let request = self.build_request(system_prompt, history, user_message);
        let response = self.transport.generate_content(request, api_key).await?;
        Ok(response.text)
    }
}

impl ModelProvider for GeminiProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Gemini
    }

    fn generate<'a>(
        &'a self,
        system_prompt: &'a str,
        history: &'a [Turn],
        user_message: &'a str,
    ) -> ProviderFuture<'a, ProviderOutcome> {
        Box::pin(async move {
            let result = self.try_generate(system_prompt, history, user_message).await;
            ProviderOutcome::from_result(ProviderId::Gemini, result)
        })
    }
}
