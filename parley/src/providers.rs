//! Stable provider construction surface for facade consumers.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::{ModelProvider, ProviderError, ProviderId, SecretString, SecureCredentialManager};

#[derive(Debug, Clone)]
pub struct ProviderBuildConfig {
    pub provider_id: ProviderId,
    pub api_key: SecretString,
    pub model: Option<String>,
    pub timeout: Duration,
}

impl ProviderBuildConfig {
    pub fn new(provider_id: ProviderId, api_key: impl Into<String>) -> Self {
        Self {
            provider_id,
            api_key: SecretString::new(api_key),
            model: None,
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

pub fn build_provider_from_api_key(
    provider_id: ProviderId,
    api_key: impl Into<String>,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    build_provider_with_config(ProviderBuildConfig::new(provider_id, api_key))
}

pub fn build_provider_with_config(
    config: ProviderBuildConfig,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    let api_key = config.api_key.expose().trim().to_string();
    if api_key.is_empty() {
        return Err(ProviderError::authentication(
            "provider API key must not be empty",
        ));
    }

    let credentials = Arc::new(SecureCredentialManager::new());
    let http = Client::builder()
        .timeout(config.timeout)
        .build()
        .map_err(|err| ProviderError::transport(err.to_string()))?;
    let model = config.model.unwrap_or_default();

    match config.provider_id {
        ProviderId::Gemini => build_gemini_provider(credentials, api_key, model, http),
        ProviderId::Groq => build_groq_provider(credentials, api_key, model, http),
    }
}

pub async fn list_models_with_api_key(
    provider_id: ProviderId,
    api_key: impl Into<String>,
) -> Result<Vec<String>, ProviderError> {
    let api_key = api_key.into();
    match provider_id {
        ProviderId::Gemini => list_gemini_models(api_key).await,
        ProviderId::Groq => Err(ProviderError::invalid_request(
            "model listing is currently supported for Gemini only",
        )),
    }
}

#[cfg(feature = "provider-gemini")]
fn build_gemini_provider(
    credentials: Arc<SecureCredentialManager>,
    api_key: String,
    model: String,
    http: Client,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    use pprovider::adapters::gemini::GeminiProvider;

    credentials.set_gemini_api_key(api_key)?;
    let transport = Arc::new(GeminiProvider::default_http_transport(http));
    Ok(Arc::new(
        GeminiProvider::new(credentials, transport).with_model(model),
    ))
}

#[cfg(not(feature = "provider-gemini"))]
fn build_gemini_provider(
    _credentials: Arc<SecureCredentialManager>,
    _api_key: String,
    _model: String,
    _http: Client,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    Err(ProviderError::invalid_request(
        "provider-gemini feature is not enabled on parley",
    ))
}

#[cfg(feature = "provider-groq")]
fn build_groq_provider(
    credentials: Arc<SecureCredentialManager>,
    api_key: String,
    model: String,
    http: Client,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    use pprovider::adapters::groq::GroqProvider;

    credentials.set_groq_api_key(api_key)?;
    let transport = Arc::new(GroqProvider::default_http_transport(http));
    Ok(Arc::new(
        GroqProvider::new(credentials, transport).with_model(model),
    ))
}

#[cfg(not(feature = "provider-groq"))]
fn build_groq_provider(
    _credentials: Arc<SecureCredentialManager>,
    _api_key: String,
    _model: String,
    _http: Client,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    Err(ProviderError::invalid_request(
        "provider-groq feature is not enabled on parley",
    ))
}

#[cfg(feature = "provider-gemini")]
async fn list_gemini_models(api_key: String) -> Result<Vec<String>, ProviderError> {
    pprovider::adapters::gemini::list_gemini_models(api_key).await
}

#[cfg(not(feature = "provider-gemini"))]
async fn list_gemini_models(_api_key: String) -> Result<Vec<String>, ProviderError> {
    Err(ProviderError::invalid_request(
        "provider-gemini feature is not enabled on parley",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProviderErrorKind;

    #[test]
    fn blank_key_is_rejected_before_building() {
        let error = build_provider_from_api_key(ProviderId::Gemini, "   ")
            .err()
            .expect("blank key must fail");
        assert_eq!(error.kind, ProviderErrorKind::Authentication);
    }

    #[cfg(feature = "provider-gemini")]
    #[test]
    fn gemini_key_with_wrong_prefix_is_rejected() {
        let error = build_provider_from_api_key(ProviderId::Gemini, "gsk_groq_key")
            .err()
            .expect("prefix must match");
        assert_eq!(error.kind, ProviderErrorKind::Authentication);
    }

    #[cfg(all(feature = "provider-gemini", feature = "provider-groq"))]
    #[test]
    fn builds_each_provider_with_its_id() {
        let gemini = build_provider_with_config(
            ProviderBuildConfig::new(ProviderId::Gemini, "AIza-key").with_model("gemini-2.0-flash"),
        )
        .expect("gemini should build");
        let groq = build_provider_from_api_key(ProviderId::Groq, "gsk_key").expect("groq should build");

        assert_eq!(gemini.id(), ProviderId::Gemini);
        assert_eq!(groq.id(), ProviderId::Groq);
    }

    #[test]
    fn build_config_debug_redacts_key() {
        let config = ProviderBuildConfig::new(ProviderId::Groq, "gsk_secret");
        assert!(!format!("{config:?}").contains("gsk_secret"));
    }

    #[tokio::test]
    async fn groq_model_listing_is_unsupported() {
        let error = list_models_with_api_key(ProviderId::Groq, "gsk_key")
            .await
            .expect_err("groq listing unsupported");
        assert_eq!(error.kind, ProviderErrorKind::InvalidRequest);
    }
}
