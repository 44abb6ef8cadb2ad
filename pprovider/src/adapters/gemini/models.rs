use reqwest::Client;

use crate::ProviderError;
use crate::adapters::http::{map_send_error, parse_error};

use super::provider::GEMINI_BASE_URL;
use super::serde_api::GeminiApiModelList;

pub async fn list_gemini_models(api_key: impl Into<String>) -> Result<Vec<String>, ProviderError> {
    list_gemini_models_with_base_url(GEMINI_BASE_URL, api_key).await
}

/// Returns the first page of model names (e.g. `models/gemini-1.5-flash`), sorted.
pub async fn list_gemini_models_with_base_url(
    base_url: impl Into<String>,
    api_key: impl Into<String>,
) -> Result<Vec<String>, ProviderError> {
    let api_key = api_key.into();
    if api_key.trim().is_empty() {
        return Err(ProviderError::authentication(
            "Gemini API key must not be empty",
        ));
    }

    let base_url = base_url.into();
    let endpoint = format!("{}/models", base_url.trim_end_matches('/'));

    let response = Client::new()
        .get(endpoint)
        .header("x-goog-api-key", api_key)
        .send()
        .await
        .map_err(map_send_error)?;

    if !response.status().is_success() {
        return Err(parse_error(response, "Gemini").await);
    }

    let parsed = response
        .json::<GeminiApiModelList>()
        .await
        .map_err(|err| ProviderError::malformed_response(err.to_string()))?;

    let mut names = parsed
        .models
        .into_iter()
        .map(|model| model.name)
        .collect::<Vec<_>>();
    names.sort();
    Ok(names)
}
