//! Metrics-based observability hooks for provider attempts and fallback.
//!
//! ```rust
//! use pobserve::MetricsObservabilityHooks;
//! use pprovider::ProviderOperationHooks;
//!
//! fn accepts_provider_hooks(_hooks: &dyn ProviderOperationHooks) {}
//!
//! let hooks = MetricsObservabilityHooks;
//! accepts_provider_hooks(&hooks);
//! ```

use std::time::Duration;

use pprovider::{ProviderError, ProviderId, ProviderOperationHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsObservabilityHooks;

impl ProviderOperationHooks for MetricsObservabilityHooks {
    fn on_attempt_start(&self, provider: ProviderId, _attempt: usize) {
        metrics::counter!(
            "parley_provider_attempt_total",
            "provider" => provider.to_string()
        )
        .increment(1);
    }

    fn on_success(&self, provider: ProviderId, attempt: usize, elapsed: Duration) {
        metrics::counter!(
            "parley_provider_success_total",
            "provider" => provider.to_string()
        )
        .increment(1);
        metrics::histogram!(
            "parley_provider_duration_seconds",
            "provider" => provider.to_string(),
            "status" => "success"
        )
        .record(elapsed.as_secs_f64());
        metrics::histogram!("parley_provider_attempts_per_success").record(attempt as f64);
    }

    fn on_failure(
        &self,
        provider: ProviderId,
        _attempt: usize,
        elapsed: Duration,
        error: &ProviderError,
    ) {
        metrics::counter!(
            "parley_provider_failure_total",
            "provider" => provider.to_string(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "parley_provider_duration_seconds",
            "provider" => provider.to_string(),
            "status" => "failure"
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_fallback(&self, from: ProviderId, to: ProviderId) {
        metrics::counter!(
            "parley_provider_fallback_total",
            "from" => from.to_string(),
            "to" => to.to_string()
        )
        .increment(1);
    }

    fn on_exhausted(&self, _attempts: usize) {
        metrics::counter!("parley_provider_exhausted_total").increment(1);
    }
}
