//! Conversation history persistence for the chat relay.
//!
//! The store is whole-document: callers `load` every session, change the one
//! they care about, and `save` everything back.

mod backends;
mod error;
mod store;

pub mod prelude {
    pub use crate::{
        DEFAULT_HISTORY_PATH, History, HistoryStore, HistoryStoreConfig, InMemoryHistoryStore,
        JsonFileHistoryStore, MemoryError, MemoryErrorKind, create_default_history_store,
        create_history_store,
    };
}

pub use backends::json_file::{DEFAULT_HISTORY_PATH, JsonFileHistoryStore, default_history_path};
pub use error::{MemoryError, MemoryErrorKind};
pub use store::{
    History, HistoryStore, HistoryStoreConfig, InMemoryHistoryStore, create_default_history_store,
    create_history_store,
};
