//! Gemini-specific credential helpers and auth resolution policy.

use crate::{ProviderError, ProviderId, SecretString, SecureCredentialManager};

impl SecureCredentialManager {
    /// Stores a Google AI Studio key. These keys are expected to start with `AIza`.
    pub fn set_gemini_api_key(&self, api_key: impl Into<String>) -> Result<(), ProviderError> {
        let api_key = api_key.into();
        if !api_key.starts_with("AIza") {
            return Err(ProviderError::authentication(
                "Gemini API key must start with 'AIza'",
            ));
        }

        self.set_api_key(ProviderId::Gemini, api_key)
    }
}

pub(crate) fn resolve_gemini_auth(
    credentials: &SecureCredentialManager,
) -> Result<SecretString, ProviderError> {
    credentials
        .api_key(ProviderId::Gemini)?
        .ok_or_else(|| ProviderError::authentication("no Gemini API key configured"))
}
