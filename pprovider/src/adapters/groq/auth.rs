//! Groq-specific credential helpers and auth resolution policy.

use crate::{ProviderError, ProviderId, SecretString, SecureCredentialManager};

impl SecureCredentialManager {
    /// Stores a Groq API key. Groq keys are expected to start with `gsk_`.
    pub fn set_groq_api_key(&self, api_key: impl Into<String>) -> Result<(), ProviderError> {
        let api_key = api_key.into();
        if !api_key.starts_with("gsk_") {
            return Err(ProviderError::authentication(
                "Groq API key must start with 'gsk_'",
            ));
        }

        self.set_api_key(ProviderId::Groq, api_key)
    }
}

pub(crate) fn resolve_groq_auth(
    credentials: &SecureCredentialManager,
) -> Result<SecretString, ProviderError> {
    credentials
        .api_key(ProviderId::Groq)?
        .ok_or_else(|| ProviderError::authentication("no Groq API key configured"))
}
