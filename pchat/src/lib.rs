//! Chat request handling over the provider fallback chain and history store.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use pchat::{ChatErrorKind, ChatRequest, ChatService};
//! use pprovider::ResponseOrchestrator;
//!
//! let service = ChatService::builder(Arc::new(ResponseOrchestrator::builder().build())).build();
//! let runtime = tokio::runtime::Runtime::new().expect("runtime should start");
//!
//! let error = runtime
//!     .block_on(service.handle(ChatRequest::new("Hello")))
//!     .expect_err("no providers are active");
//! assert_eq!(error.kind, ChatErrorKind::Unavailable);
//! ```

mod error;
mod locks;
mod service;
mod types;
mod window;

pub mod prelude {
    pub use crate::{
        CONTEXT_WINDOW_TURNS, ChatError, ChatErrorKind, ChatReply, ChatRequest, ChatService,
        ChatServiceBuilder, context_window,
    };
    pub use pcommon::SessionId;
}

pub use error::{ChatError, ChatErrorKind};
pub use pcommon::SessionId;
pub use service::{
    ChatService, ChatServiceBuilder, GENERATION_FAILED, HISTORY_UNAVAILABLE, NO_MESSAGE_PROVIDED,
    NO_PROVIDER_CONFIGURED, PERSIST_FAILED,
};
pub use types::{ChatReply, ChatRequest};
pub use window::{CONTEXT_WINDOW_TURNS, context_window};
