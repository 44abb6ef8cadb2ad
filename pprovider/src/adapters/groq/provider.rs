//! Groq provider implementation over transport and canonical turns.

use std::sync::Arc;

use reqwest::Client;

use crate::{
    ModelProvider, ProviderError, ProviderFuture, ProviderId, ProviderOutcome,
    SecureCredentialManager, Turn,
};

use super::auth::resolve_groq_auth;
use super::transport::{GroqHttpTransport, GroqTransport};
use super::types::{GroqMessage, GroqRequest, GroqRole};

pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const GROQ_DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

#[derive(Clone)]
pub struct GroqProvider {
    credentials: Arc<SecureCredentialManager>,
    transport: Arc<dyn GroqTransport>,
    model: String,
}

impl GroqProvider {
    pub fn new(credentials: Arc<SecureCredentialManager>, transport: Arc<dyn GroqTransport>) -> Self {
        Self {
            credentials,
            transport,
            model: GROQ_DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        let model = model.into();
        if !model.trim().is_empty() {
            self.model = model;
        }
        self
    }

    pub fn default_http_transport(client: Client) -> GroqHttpTransport {
        GroqHttpTransport::new(client)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// System prompt first, then history, then the new user message.
    pub(crate) fn build_request(
        &self,
        system_prompt: &str,
        history: &[Turn],
        user_message: &str,
    ) -> GroqRequest {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(GroqMessage::new(GroqRole::System, system_prompt));
        messages.extend(history.iter().map(GroqMessage::from));
        messages.push(GroqMessage::new(GroqRole::User, user_message));

        GroqRequest {
            model: self.model.clone(),
            messages,
        }
    }

    async fn try_generate(
        &self,
        system_prompt: &str,
        history: &[Turn],
        user_message: &str,
    ) -> Result<String, ProviderError> {
        let api_key = resolve_groq_auth(&self.credentials)?;
        let request = self.build_request(system_prompt, history, user_message);
        let response = self.transport.complete(request, api_key).await?;
        Ok(response.content)
    }
}

impl ModelProvider for GroqProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Groq
    }

    fn generate<'a>(
        &'a self,
        system_prompt: &'a str,
        history: &'a [Turn],
        user_message: &'a str,
    ) -> ProviderFuture<'a, ProviderOutcome> {
        Box::pin(async move {
            let result = self.try_generate(system_prompt, history, user_message).await;
            ProviderOutcome::from_result(ProviderId::Groq, result)
        })
    }
}
