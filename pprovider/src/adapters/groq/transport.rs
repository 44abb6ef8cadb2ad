//! Groq transport trait and reqwest-based HTTP implementation.

use reqwest::Client;

use crate::adapters::http::{map_send_error, parse_error};
use crate::{ProviderError, ProviderFuture, SecretString};

use super::provider::GROQ_BASE_URL;
use super::serde_api::{GroqApiResponse, build_api_request};
use super::types::{GroqRequest, GroqResponse};

pub trait GroqTransport: Send + Sync + std::fmt::Debug {
    fn complete<'a>(
        &'a self,
        request: GroqRequest,
        api_key: SecretString,
    ) -> ProviderFuture<'a, Result<GroqResponse, ProviderError>>;
}

#[derive(Debug, Clone)]
pub struct GroqHttpTransport {
    client: Client,
    base_url: String,
}

impl GroqHttpTransport {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: GROQ_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

impl GroqTransport for GroqHttpTransport {
    fn complete<'a>(
        &'a self,
        request: GroqRequest,
        api_key: SecretString,
    ) -> ProviderFuture<'a, Result<GroqResponse, ProviderError>> {
        Box::pin(async move {
            let api_request = build_api_request(request)?;
            let response = self
                .client
                .post(self.endpoint("chat/completions"))
                .bearer_auth(api_key.expose())
                .json(&api_request)
                .send()
                .await
                .map_err(map_send_error)?;

            if !response.status().is_success() {
                return Err(parse_error(response, "Groq").await);
            }

            let parsed: GroqApiResponse = response
                .json()
                .await
                .map_err(|err| ProviderError::malformed_response(err.to_string()))?;

            GroqResponse::try_from(parsed)
        })
    }
}
