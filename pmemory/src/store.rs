//! History store trait, configuration, and the in-memory implementation.
//!
//! ```rust
//! use pmemory::{HistoryStoreConfig, create_history_store};
//!
//! let store = create_history_store(HistoryStoreConfig::InMemory).expect("store should build");
//! # let _ = store;
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use pcommon::BoxFuture;
use pprovider::Turn;

use crate::backends::json_file::{JsonFileHistoryStore, default_history_path};
use crate::error::MemoryError;

/// Every session's turns keyed by session id, oldest turn first.
pub type History = BTreeMap<String, Vec<Turn>>;

/// Whole-document persistence for conversation history.
///
/// `load` yields an empty mapping when the backing data is missing or
/// malformed, and an error when it exists but cannot be read. `save` replaces
/// the entire document.
pub trait HistoryStore: Send + Sync {
    fn load<'a>(&'a self) -> BoxFuture<'a, Result<History, MemoryError>>;

    fn save<'a>(&'a self, history: &'a History) -> BoxFuture<'a, Result<(), MemoryError>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryStoreConfig {
    JsonFile { path: PathBuf },
    InMemory,
}

impl Default for HistoryStoreConfig {
    fn default() -> Self {
        Self::JsonFile {
            path: default_history_path(),
        }
    }
}

pub fn create_history_store(
    config: HistoryStoreConfig,
) -> Result<Arc<dyn HistoryStore>, MemoryError> {
    match config {
        HistoryStoreConfig::JsonFile { path } => Ok(Arc::new(JsonFileHistoryStore::new(path)?)),
        HistoryStoreConfig::InMemory => Ok(Arc::new(InMemoryHistoryStore::new())),
    }
}

pub fn create_default_history_store() -> Result<Arc<dyn HistoryStore>, MemoryError> {
    create_history_store(HistoryStoreConfig::default())
}

#[derive(Debug, Default)]
pub struct InMemoryHistoryStore {
    history: Mutex<History>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(history: History) -> Self {
        Self {
            history: Mutex::new(history),
        }
    }
}

impl HistoryStore for InMemoryHistoryStore {
    fn load<'a>(&'a self) -> BoxFuture<'a, Result<History, MemoryError>> {
        Box::pin(async move {
            let history = self
                .history
                .lock()
                .map_err(|_| MemoryError::storage("in-memory history lock poisoned"))?;
            Ok(history.clone())
        })
    }

    fn save<'a>(&'a self, history: &'a History) -> BoxFuture<'a, Result<(), MemoryError>> {
        Box::pin(async move {
            let mut stored = self
                .history
                .lock()
                .map_err(|_| MemoryError::storage("in-memory history lock poisoned"))?;
            *stored = history.clone();
            Ok(())
        })
    }
}
