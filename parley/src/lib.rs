//! Conversational relay over an ordered chain of LLM providers.
//!
//! This crate is the single dependency for most applications. It re-exports
//! the workspace crates and wires configuration, providers, history storage,
//! and the HTTP surface together.
//!
//! ```rust
//! use parley::{ParleyConfig, build_orchestrator};
//!
//! let config = ParleyConfig::default();
//! let orchestrator = build_orchestrator(&config);
//! assert!(!orchestrator.has_providers());
//! ```

mod config;
mod providers;

pub mod prelude;
pub mod runtime;
pub mod server;

pub use pchat;
pub use pcommon;
pub use pmemory;
pub use pobserve;
pub use pprovider;

pub use config::{
    ConfigError, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_PROVIDER_TIMEOUT, ParleyConfig,
};
pub use pchat::{
    CONTEXT_WINDOW_TURNS, ChatError, ChatErrorKind, ChatReply, ChatRequest, ChatService,
    ChatServiceBuilder, GENERATION_FAILED, HISTORY_UNAVAILABLE, NO_MESSAGE_PROVIDED,
    NO_PROVIDER_CONFIGURED, PERSIST_FAILED, context_window,
};
pub use pcommon::{BoxFuture, DEFAULT_SESSION_ID, SessionId};
pub use pmemory::{
    History, HistoryStore, HistoryStoreConfig, InMemoryHistoryStore, JsonFileHistoryStore,
    MemoryError, MemoryErrorKind, create_history_store,
};
pub use pobserve::{
    CompositeProviderHooks, MetricsObservabilityHooks, SafeProviderHooks,
    TracingObservabilityHooks,
};
pub use pprovider::{
    AttemptPolicy, DEFAULT_SYSTEM_PROMPT, GenerationReport, ModelProvider, NoopOperationHooks,
    ProviderError, ProviderErrorKind, ProviderFailure, ProviderFuture, ProviderId,
    ProviderOperationHooks, ProviderOutcome, ProviderRegistry, ResponseOrchestrator,
    ResponseOrchestratorBuilder, SecretString, SecureCredentialManager, Speaker, Turn,
};
pub use providers::{
    ProviderBuildConfig, build_provider_from_api_key, build_provider_with_config,
    list_models_with_api_key,
};
pub use runtime::{
    build_orchestrator, build_registry, chat_service, default_hooks, in_memory_service,
};
pub use server::{router, serve};
