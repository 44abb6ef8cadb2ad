//! Runtime wiring: configured providers, the orchestrator, and chat services.

use std::sync::Arc;

use crate::{
    AttemptPolicy, ChatService, CompositeProviderHooks, HistoryStore, InMemoryHistoryStore,
    JsonFileHistoryStore, MemoryError, MetricsObservabilityHooks, ParleyConfig,
    ProviderOperationHooks, ProviderRegistry, ResponseOrchestrator, SafeProviderHooks,
    TracingObservabilityHooks, build_provider_with_config,
};

/// Tracing and metrics hooks, each isolated from the other's panics.
pub fn default_hooks() -> Arc<dyn ProviderOperationHooks> {
    Arc::new(
        CompositeProviderHooks::new()
            .with(Arc::new(SafeProviderHooks::new(TracingObservabilityHooks)))
            .with(Arc::new(SafeProviderHooks::new(MetricsObservabilityHooks))),
    )
}

/// Registers every provider that has a key, ranked in fallback order.
/// Providers without a key, or whose key is rejected, are skipped with a warning.
pub fn build_registry(config: &ParleyConfig) -> ProviderRegistry {
    let mut registry = ProviderRegistry::new();

    for (rank, (provider_id, build_config)) in config.provider_configs().into_iter().enumerate() {
        let Some(build_config) = build_config else {
            tracing::warn!(
                provider = %provider_id,
                "API key not configured; provider disabled"
            );
            continue;
        };

        match build_provider_with_config(build_config) {
            Ok(provider) => {
                tracing::info!(provider = %provider_id, rank, "provider enabled");
                registry.register_shared(rank as u32, provider);
            }
            Err(error) => {
                tracing::warn!(
                    provider = %provider_id,
                    error = %error,
                    "provider could not be built; provider disabled"
                );
            }
        }
    }

    registry
}

pub fn build_orchestrator(config: &ParleyConfig) -> ResponseOrchestrator {
    let registry = build_registry(config);
    ResponseOrchestrator::builder()
        .providers(registry.active())
        .policy(AttemptPolicy::new(config.provider_timeout))
        .hooks(default_hooks())
        .build()
}

/// Chat service backed by the JSON history file named in `config`.
pub fn chat_service(config: &ParleyConfig) -> Result<ChatService, MemoryError> {
    let store: Arc<dyn HistoryStore> = Arc::new(JsonFileHistoryStore::new(&config.history_path)?);
    Ok(ChatService::new(Arc::new(build_orchestrator(config)), store))
}

/// Chat service whose history lives only as long as the process.
pub fn in_memory_service(orchestrator: ResponseOrchestrator) -> ChatService {
    ChatService::new(
        Arc::new(orchestrator),
        Arc::new(InMemoryHistoryStore::new()),
    )
}
