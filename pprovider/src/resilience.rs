//! Attempt timeout policy and operational hook contracts.

use std::future::Future;
use std::time::Duration;

use crate::{ProviderError, ProviderId, ProviderOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptPolicy {
    pub timeout: Option<Duration>,
}

impl Default for AttemptPolicy {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(60)),
        }
    }
}

impl AttemptPolicy {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }

    pub fn unbounded() -> Self {
        Self { timeout: None }
    }
}

/// Observes the orchestrator's attempt sequence. Attempts are 1-based.
pub trait ProviderOperationHooks: Send + Sync {
    fn on_attempt_start(&self, _provider: ProviderId, _attempt: usize) {}

    fn on_success(&self, _provider: ProviderId, _attempt: usize, _elapsed: Duration) {}

    fn on_failure(
        &self,
        _provider: ProviderId,
        _attempt: usize,
        _elapsed: Duration,
        _error: &ProviderError,
    ) {
    }

    fn on_fallback(&self, _from: ProviderId, _to: ProviderId) {}

    fn on_exhausted(&self, _attempts: usize) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopOperationHooks;

impl ProviderOperationHooks for NoopOperationHooks {}

/// Runs one adapter attempt, converting an elapsed deadline into a timeout failure.
pub async fn execute_with_timeout<F>(
    provider: ProviderId,
    policy: &AttemptPolicy,
    attempt: F,
) -> ProviderOutcome
where
    F: Future<Output = ProviderOutcome>,
{
    let Some(limit) = policy.timeout else {
        return attempt.await;
    };

    match tokio::time::timeout(limit, attempt).await {
        Ok(outcome) => outcome,
        Err(_) => ProviderOutcome::failure(
            provider,
            ProviderError::timeout(format!(
                "no response within {}ms",
                limit.as_millis()
            )),
        ),
    }
}
