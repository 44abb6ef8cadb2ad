//! Keyed async locks serializing requests that share a session.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use pcommon::SessionId;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

#[derive(Debug, Default)]
pub(crate) struct SessionLocks {
    entries: Mutex<HashMap<SessionId, SessionEntry>>,
}

#[derive(Debug)]
struct SessionEntry {
    lock: Arc<AsyncMutex<()>>,
    /// Requests holding or waiting for `lock`.
    users: usize,
}

impl SessionLocks {
    pub(crate) async fn acquire(&self, session_id: &SessionId) -> SessionGuard<'_> {
        let (registration, lock) = self.register(session_id);
        // `registration` is dropped with this future if the wait is cancelled.
        let held = lock.lock_owned().await;
        SessionGuard {
            _held: held,
            _registration: registration,
        }
    }

    fn register(&self, session_id: &SessionId) -> (Registration<'_>, Arc<AsyncMutex<()>>) {
        let mut entries = self.entries();
        let entry = entries
            .entry(session_id.clone())
            .or_insert_with(|| SessionEntry {
                lock: Arc::new(AsyncMutex::new(())),
                users: 0,
            });
        entry.users += 1;
        let lock = Arc::clone(&entry.lock);

        let registration = Registration {
            owner: self,
            session_id: session_id.clone(),
        };
        (registration, lock)
    }

    fn release(&self, session_id: &SessionId) {
        let mut entries = self.entries();
        if let Some(entry) = entries.get_mut(session_id) {
            entry.users = entry.users.saturating_sub(1);
            if entry.users == 0 {
                entries.remove(session_id);
            }
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<SessionId, SessionEntry>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.entries().len()
    }
}

struct Registration<'a> {
    owner: &'a SessionLocks,
    session_id: SessionId,
}

impl Drop for Registration<'_> {
    fn drop(&mut self) {
        self.owner.release(&self.session_id);
    }
}

/// Holds a session's lock. Fields drop in order, so the lock is released
/// before the registration is.
pub(crate) struct SessionGuard<'a> {
    _held: OwnedMutexGuard<()>,
    _registration: Registration<'a>,
}
