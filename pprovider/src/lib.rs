//! Generation backends behind one adapter contract, plus ordered fallback.
//!
//! ```rust
//! use pprovider::{ProviderRegistry, ResponseOrchestrator};
//!
//! let registry = ProviderRegistry::new();
//! let orchestrator = ResponseOrchestrator::from_registry(&registry);
//! assert!(orchestrator.provider_ids().is_empty());
//! ```

pub mod adapters;
pub mod prelude;

mod credentials;
mod error;
mod model;
mod orchestrator;
mod provider;
mod registry;
mod resilience;

pub use credentials::{SecretString, SecureCredentialManager};
pub use error::{ProviderError, ProviderErrorKind};
pub use model::{ProviderFailure, ProviderId, ProviderOutcome, Speaker, Turn};
pub use orchestrator::{
    DEFAULT_SYSTEM_PROMPT, GenerationReport, ResponseOrchestrator, ResponseOrchestratorBuilder,
};
pub use pcommon::BoxFuture;
pub use provider::{ModelProvider, ProviderFuture};
pub use registry::ProviderRegistry;
pub use resilience::{
    AttemptPolicy, NoopOperationHooks, ProviderOperationHooks, execute_with_timeout,
};
