use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use pcommon::BoxFuture;
use pprovider::{Speaker, Turn};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

use crate::error::MemoryError;
use crate::store::{History, HistoryStore};

pub const DEFAULT_HISTORY_PATH: &str = "data/memory.json";

pub fn default_history_path() -> PathBuf {
    PathBuf::from(DEFAULT_HISTORY_PATH)
}

/// Stores every session in one JSON document of the form
/// `{"session": [{"role": "user" | "ai", "content": "..."}]}`.
#[derive(Debug)]
pub struct JsonFileHistoryStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileHistoryStore {
    /// Creates the parent directory if needed. The file itself is only
    /// written on the first `save`.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, MemoryError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|error| {
                MemoryError::storage(format!("failed to create history directory: {error}"))
            })?;
        }

        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing and malformed files read as empty. Any other I/O failure is an
    /// error, so a later save cannot overwrite sessions it never saw.
    fn read_history(&self) -> Result<History, MemoryError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "history file not found; starting empty");
                return Ok(History::new());
            }
            Err(error) => {
                tracing::error!(
                    path = %self.path.display(),
                    error = %error,
                    "history file unreadable"
                );
                return Err(MemoryError::storage(format!(
                    "failed to read history file: {error}"
                )));
            }
        };

        match serde_json::from_slice::<PersistedHistory>(&bytes) {
            Ok(persisted) => Ok(persisted.into_history()),
            Err(error) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %error,
                    "history file is corrupt; starting empty"
                );
                Ok(History::new())
            }
        }
    }

    fn write_history(&self, history: &History) -> Result<(), MemoryError> {
        let bytes = encode_pretty(&PersistedHistory::from_history(history))?;
        write_atomic(&self.path, &bytes)
    }
}

impl HistoryStore for JsonFileHistoryStore {
    fn load<'a>(&'a self) -> BoxFuture<'a, Result<History, MemoryError>> {
        Box::pin(async move {
            let _guard = self
                .lock
                .lock()
                .map_err(|_| MemoryError::storage("history file lock poisoned"))?;
            self.read_history()
        })
    }

    fn save<'a>(&'a self, history: &'a History) -> BoxFuture<'a, Result<(), MemoryError>> {
        Box::pin(async move {
            let _guard = self
                .lock
                .lock()
                .map_err(|_| MemoryError::storage("history file lock poisoned"))?;
            self.write_history(history)
        })
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
struct PersistedHistory {
    sessions: BTreeMap<String, Vec<PersistedTurn>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedTurn {
    role: PersistedRole,
    content: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
enum PersistedRole {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "ai")]
    Ai,
}

impl PersistedHistory {
    fn from_history(history: &History) -> Self {
        let sessions = history
            .iter()
            .map(|(session_id, turns)| {
                let turns = turns.iter().map(PersistedTurn::from_turn).collect();
                (session_id.clone(), turns)
            })
            .collect();
        Self { sessions }
    }

    fn into_history(self) -> History {
        self.sessions
            .into_iter()
            .map(|(session_id, turns)| {
                let turns = turns.into_iter().map(PersistedTurn::into_turn).collect();
                (session_id, turns)
            })
            .collect()
    }
}

impl PersistedTurn {
    fn from_turn(turn: &Turn) -> Self {
        let role = match turn.speaker() {
            Speaker::User => PersistedRole::User,
            Speaker::Assistant => PersistedRole::Ai,
        };
        Self {
            role,
            content: turn.content().to_string(),
        }
    }

    fn into_turn(self) -> Turn {
        let speaker = match self.role {
            PersistedRole::User => Speaker::User,
            PersistedRole::Ai => Speaker::Assistant,
        };
        Turn::new(speaker, self.content)
    }
}

fn encode_pretty<T: Serialize>(value: &T) -> Result<Vec<u8>, MemoryError> {
    let mut bytes = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut bytes, formatter);
    value.serialize(&mut serializer).map_err(|error| {
        MemoryError::serialization(format!("failed to serialize history: {error}"))
    })?;
    Ok(bytes)
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), MemoryError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|error| {
            MemoryError::storage(format!("failed to create history directory: {error}"))
        })?;
    }

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, bytes).map_err(|error| {
        MemoryError::storage(format!("failed to write temporary history file: {error}"))
    })?;

    fs::rename(&tmp, path).map_err(|error| {
        let _ = fs::remove_file(&tmp);
        MemoryError::storage(format!("failed to finalize history file: {error}"))
    })
}
