//! Gemini transport trait and reqwest-based HTTP implementation.

use reqwest::Client;

use crate::adapters::http::{map_send_error, parse_error};
use crate::{ProviderError, ProviderFuture, SecretString};

use super::provider::GEMINI_BASE_URL;
use super::serde_api::{GeminiApiResponse, build_api_request};
use super::types::{GeminiRequest, GeminiResponse};

pub trait GeminiTransport: Send + Sync + std::fmt::Debug {
    fn generate_content<'a>(
        &'a self,
        request: GeminiRequest,
        api_key: SecretString,
    ) -> ProviderFuture<'a, Result<GeminiResponse, ProviderError>>;
}

#[derive(Debug, Clone)]
pub struct GeminiHttpTransport {
    client: Client,
    base_url: String,
}

impl GeminiHttpTransport {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: GEMINI_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self, model: &str) -> String {
        let model = model.trim_start_matches("models/");
        format!(
            "{}/models/{model}:generateContent",
            self.base_url.trim_end_matches('/')
        )
    }
}

impl GeminiTransport for GeminiHttpTransport {
    fn generate_content<'a>(
        &'a self,
        request: GeminiRequest,
        api_key: SecretString,
    ) -> ProviderFuture<'a, Result<GeminiResponse, ProviderError>> {
        Box::pin(async move {
            let url = self.endpoint(&request.model);
            let api_request = build_api_request(request)?;
            let response = self
                .client
                .post(url)
                .header("x-goog-api-key", api_key.expose())
                .json(&api_request)
                .send()
                .await
                .map_err(map_send_error)?;

            if !response.status().is_success() {
                return Err(parse_error(response, "Gemini").await);
            }

            let parsed: GeminiApiResponse = response
                .json()
                .await
                .map_err(|err| ProviderError::malformed_response(err.to_string()))?;

            GeminiResponse::try_from(parsed)
        })
    }
}
