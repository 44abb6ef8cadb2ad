use std::future::Future;
use std::pin::Pin;

use crate::{ProviderId, ProviderOutcome, Turn};

pub type ProviderFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Capability-uniform wrapper around one generation backend.
///
/// Implementations perform exactly one backend call per `generate` and fold
/// every failure (missing credentials, transport, backend error, malformed
/// payload) into [`ProviderOutcome::Failure`].
pub trait ModelProvider: Send + Sync {
    fn id(&self) -> ProviderId;

    fn generate<'a>(
        &'a self,
        system_prompt: &'a str,
        history: &'a [Turn],
        user_message: &'a str,
    ) -> ProviderFuture<'a, ProviderOutcome>;
}
