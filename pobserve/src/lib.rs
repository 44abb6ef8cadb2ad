//! Observability hooks for the provider fallback chain.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use pobserve::{
//!     CompositeProviderHooks, MetricsObservabilityHooks, SafeProviderHooks,
//!     TracingObservabilityHooks,
//! };
//!
//! let _hooks = CompositeProviderHooks::new()
//!     .with(Arc::new(SafeProviderHooks::new(TracingObservabilityHooks)))
//!     .with(Arc::new(SafeProviderHooks::new(MetricsObservabilityHooks)));
//! ```

mod composite_hooks;
mod metrics_hooks;
mod safe_hooks;
mod tracing_hooks;

pub use composite_hooks::CompositeProviderHooks;
pub use metrics_hooks::MetricsObservabilityHooks;
pub use safe_hooks::SafeProviderHooks;
pub use tracing_hooks::TracingObservabilityHooks;

pub mod prelude {
    pub use crate::{
        CompositeProviderHooks, MetricsObservabilityHooks, SafeProviderHooks,
        TracingObservabilityHooks,
    };
}

#[cfg(test)]
mod tests;
