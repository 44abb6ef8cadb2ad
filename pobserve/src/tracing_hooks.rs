//! Tracing-based observability hooks for provider attempts and fallback.
//!
//! ```rust
//! use pobserve::TracingObservabilityHooks;
//! use pprovider::ProviderOperationHooks;
//!
//! fn accepts_provider_hooks(_hooks: &dyn ProviderOperationHooks) {}
//!
//! let hooks = TracingObservabilityHooks;
//! accepts_provider_hooks(&hooks);
//! ```

use std::time::Duration;

use pprovider::{ProviderError, ProviderId, ProviderOperationHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObservabilityHooks;

impl ProviderOperationHooks for TracingObservabilityHooks {
    fn on_attempt_start(&self, provider: ProviderId, attempt: usize) {
        tracing::info!(
            phase = "provider",
            event = "attempt_start",
            provider = %provider,
            attempt
        );
    }

    fn on_success(&self, provider: ProviderId, attempt: usize, elapsed: Duration) {
        tracing::info!(
            phase = "provider",
            event = "success",
            provider = %provider,
            attempt,
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_failure(
        &self,
        provider: ProviderId,
        attempt: usize,
        elapsed: Duration,
        error: &ProviderError,
    ) {
        tracing::warn!(
            phase = "provider",
            event = "failure",
            provider = %provider,
            attempt,
            elapsed_ms = elapsed.as_millis() as u64,
            error_kind = ?error.kind,
            error = %error
        );
    }

    fn on_fallback(&self, from: ProviderId, to: ProviderId) {
        tracing::warn!(
            phase = "provider",
            event = "fallback",
            from = %from,
            to = %to
        );
    }

    fn on_exhausted(&self, attempts: usize) {
        tracing::error!(phase = "provider", event = "exhausted", attempts);
    }
}
