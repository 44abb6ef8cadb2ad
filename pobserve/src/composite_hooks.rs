use std::sync::Arc;
use std::time::Duration;

use pprovider::{ProviderError, ProviderId, ProviderOperationHooks};

/// Forwards every callback to each wrapped hook, in insertion order.
#[derive(Clone, Default)]
pub struct CompositeProviderHooks {
    hooks: Vec<Arc<dyn ProviderOperationHooks>>,
}

impl CompositeProviderHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, hooks: Arc<dyn ProviderOperationHooks>) -> Self {
        self.hooks.push(hooks);
        self
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl ProviderOperationHooks for CompositeProviderHooks {
    fn on_attempt_start(&self, provider: ProviderId, attempt: usize) {
        for hooks in &self.hooks {
            hooks.on_attempt_start(provider, attempt);
        }
    }

    fn on_success(&self, provider: ProviderId, attempt: usize, elapsed: Duration) {
        for hooks in &self.hooks {
            hooks.on_success(provider, attempt, elapsed);
        }
    }

    fn on_failure(
        &self,
        provider: ProviderId,
        attempt: usize,
        elapsed: Duration,
        error: &ProviderError,
    ) {
        for hooks in &self.hooks {
            hooks.on_failure(provider, attempt, elapsed, error);
        }
    }

    fn on_fallback(&self, from: ProviderId, to: ProviderId) {
        for hooks in &self.hooks {
            hooks.on_fallback(from, to);
        }
    }

    fn on_exhausted(&self, attempts: usize) {
        for hooks in &self.hooks {
            hooks.on_exhausted(attempts);
        }
    }
}
