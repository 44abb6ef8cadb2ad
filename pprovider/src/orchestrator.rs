//! Ordered fallback across the active provider list.
//!
//! ```rust
//! use pprovider::ResponseOrchestrator;
//!
//! let orchestrator = ResponseOrchestrator::builder().build();
//! assert!(!orchestrator.has_providers());
//! ```

use std::sync::Arc;
use std::time::Instant;

use crate::{
    AttemptPolicy, ModelProvider, NoopOperationHooks, ProviderFailure, ProviderId,
    ProviderOperationHooks, ProviderOutcome, ProviderRegistry, Turn, execute_with_timeout,
};

pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a friendly AI Avatar. You answer questions concisely and with a helpful tone.";

/// What one orchestration pass produced.
///
/// `failures` holds one entry per attempted provider that failed, in attempt
/// order. When `text` is present they are diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationReport {
    pub text: Option<String>,
    pub provider: Option<ProviderId>,
    pub failures: Vec<ProviderFailure>,
}

impl GenerationReport {
    pub fn is_success(&self) -> bool {
        self.text.is_some()
    }

    /// True when nothing was attempted because no provider is active.
    pub fn no_providers_attempted(&self) -> bool {
        self.text.is_none() && self.failures.is_empty()
    }
}

#[derive(Clone)]
pub struct ResponseOrchestrator {
    providers: Vec<Arc<dyn ModelProvider>>,
    system_prompt: String,
    policy: AttemptPolicy,
    hooks: Arc<dyn ProviderOperationHooks>,
}

impl ResponseOrchestrator {
    pub fn builder() -> ResponseOrchestratorBuilder {
        ResponseOrchestratorBuilder::default()
    }

    pub fn from_registry(registry: &ProviderRegistry) -> Self {
        Self::builder().providers(registry.active()).build()
    }

    pub fn has_providers(&self) -> bool {
        !self.providers.is_empty()
    }

    pub fn provider_ids(&self) -> Vec<ProviderId> {
        self.providers.iter().map(|provider| provider.id()).collect()
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub async fn generate_response(
        &self,
        user_message: &str,
        context_window: &[Turn],
    ) -> GenerationReport {
        let mut failures = Vec::new();

        for (index, provider) in self.providers.iter().enumerate() {
            let attempt = index + 1;
            let id = provider.id();
            self.hooks.on_attempt_start(id, attempt);

            let started = Instant::now();
            let outcome = execute_with_timeout(
                id,
                &self.policy,
                provider.generate(&self.system_prompt, context_window, user_message),
            )
            .await;
            let elapsed = started.elapsed();

            match outcome {
                ProviderOutcome::Success(text) => {
                    self.hooks.on_success(id, attempt, elapsed);
                    return GenerationReport {
                        text: Some(text),
                        provider: Some(id),
                        failures,
                    };
                }
                ProviderOutcome::Failure(failure) => {
                    self.hooks.on_failure(id, attempt, elapsed, &failure.error);
                    failures.push(failure);

                    if let Some(next) = self.providers.get(index + 1) {
                        self.hooks.on_fallback(id, next.id());
                    }
                }
            }
        }

        self.hooks.on_exhausted(self.providers.len());
        GenerationReport {
            text: None,
            provider: None,
            failures,
        }
    }
}

pub struct ResponseOrchestratorBuilder {
    providers: Vec<Arc<dyn ModelProvider>>,
    system_prompt: String,
    policy: AttemptPolicy,
    hooks: Arc<dyn ProviderOperationHooks>,
}

impl Default for ResponseOrchestratorBuilder {
    fn default() -> Self {
        Self {
            providers: Vec::new(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            policy: AttemptPolicy::default(),
            hooks: Arc::new(NoopOperationHooks),
        }
    }
}

impl ResponseOrchestratorBuilder {
    /// Appends a provider after those already added.
    pub fn provider(mut self, provider: Arc<dyn ModelProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn providers(mut self, providers: Vec<Arc<dyn ModelProvider>>) -> Self {
        self.providers.extend(providers);
        self
    }

    pub fn system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    pub fn policy(mut self, policy: AttemptPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn hooks(mut self, hooks: Arc<dyn ProviderOperationHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn build(self) -> ResponseOrchestrator {
        ResponseOrchestrator {
            providers: self.providers,
            system_prompt: self.system_prompt,
            policy: self.policy,
            hooks: self.hooks,
        }
    }
}
