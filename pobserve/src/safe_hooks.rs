use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use pprovider::{ProviderError, ProviderId, ProviderOperationHooks};

/// Wraps hooks so a panicking callback never aborts a provider attempt.
pub struct SafeProviderHooks<H> {
    inner: H,
}

impl<H> SafeProviderHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> ProviderOperationHooks for SafeProviderHooks<H>
where
    H: ProviderOperationHooks,
{
    fn on_attempt_start(&self, provider: ProviderId, attempt: usize) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_attempt_start(provider, attempt)
        }));
    }

    fn on_success(&self, provider: ProviderId, attempt: usize, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_success(provider, attempt, elapsed)
        }));
    }

    fn on_failure(
        &self,
        provider: ProviderId,
        attempt: usize,
        elapsed: Duration,
        error: &ProviderError,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_failure(provider, attempt, elapsed, error)
        }));
    }

    fn on_fallback(&self, from: ProviderId, to: ProviderId) {
        let _ = catch_unwind(AssertUnwindSafe(|| self.inner.on_fallback(from, to)));
    }

    fn on_exhausted(&self, attempts: usize) {
        let _ = catch_unwind(AssertUnwindSafe(|| self.inner.on_exhausted(attempts)));
    }
}
