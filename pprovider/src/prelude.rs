//! Common `pprovider` imports for downstream crates.

pub use crate::{
    AttemptPolicy, GenerationReport, ModelProvider, NoopOperationHooks, ProviderError,
    ProviderErrorKind, ProviderFailure, ProviderFuture, ProviderId, ProviderOperationHooks,
    ProviderOutcome, ProviderRegistry, ResponseOrchestrator, Speaker, Turn,
};
pub use pcommon::BoxFuture;
