//! Common imports for most parley applications.

pub use crate::{
    ChatError, ChatErrorKind, ChatReply, ChatRequest, ChatService, HistoryStore,
    InMemoryHistoryStore, JsonFileHistoryStore, ModelProvider, ParleyConfig, ProviderFailure,
    ProviderId, ProviderOutcome, ResponseOrchestrator, SessionId, Turn,
};
pub use crate::{
    ProviderBuildConfig, build_orchestrator, build_provider_from_api_key,
    build_provider_with_config, chat_service, in_memory_service, list_models_with_api_key,
    router, serve,
};
