//! Chat request handling: validate, load context, generate, commit.

use std::sync::Arc;

use pcommon::SessionId;
use pmemory::{History, HistoryStore, InMemoryHistoryStore};
use pprovider::{GenerationReport, ProviderId, ResponseOrchestrator, Turn};
use tokio::sync::Mutex as AsyncMutex;

use crate::locks::SessionLocks;
use crate::window::{CONTEXT_WINDOW_TURNS, context_window};
use crate::{ChatError, ChatReply, ChatRequest};

pub const NO_MESSAGE_PROVIDED: &str = "No message provided";
pub const GENERATION_FAILED: &str = "Failed to generate response";
pub const NO_PROVIDER_CONFIGURED: &str = "No generation provider is configured";
pub const PERSIST_FAILED: &str = "Failed to persist conversation";
pub const HISTORY_UNAVAILABLE: &str = "Failed to load conversation history";

#[derive(Clone)]
pub struct ChatService {
    orchestrator: Arc<ResponseOrchestrator>,
    store: Arc<dyn HistoryStore>,
    window_turns: usize,
    session_locks: Arc<SessionLocks>,
    commit_lock: Arc<AsyncMutex<()>>,
}

impl ChatService {
    pub fn new(orchestrator: Arc<ResponseOrchestrator>, store: Arc<dyn HistoryStore>) -> Self {
        Self::builder(orchestrator).store(store).build()
    }

    pub fn builder(orchestrator: Arc<ResponseOrchestrator>) -> ChatServiceBuilder {
        ChatServiceBuilder::new(orchestrator)
    }

    pub fn orchestrator(&self) -> &ResponseOrchestrator {
        &self.orchestrator
    }

    pub fn store(&self) -> Arc<dyn HistoryStore> {
        Arc::clone(&self.store)
    }

    pub fn provider_ids(&self) -> Vec<ProviderId> {
        self.orchestrator.provider_ids()
    }

    pub async fn handle(&self, request: ChatRequest) -> Result<ChatReply, ChatError> {
        let message = match request.message {
            Some(message) if !message.is_empty() => message,
            _ => return Err(ChatError::invalid_request(NO_MESSAGE_PROVIDED)),
        };
        let session_id = SessionId::resolve(request.session_id.as_deref());

        // Held through commit so same-session requests see each other's turns.
        let _session = self.session_locks.acquire(&session_id).await;

        let history = self.load_history(&session_id).await?;
        let prior = history
            .get(session_id.as_str())
            .map(Vec::as_slice)
            .unwrap_or_default();
        let window = context_window(prior, self.window_turns);
        tracing::debug!(
            session_id = %session_id,
            history_turns = prior.len(),
            window_turns = window.len(),
            "generating reply"
        );

        let report = self.orchestrator.generate_response(&message, window).await;
        let (response, provider, fallback_failures) = resolve_report(&session_id, report)?;

        self.commit(&session_id, &message, &response).await?;

        Ok(ChatReply {
            session_id,
            response,
            provider,
            fallback_failures,
        })
    }

    async fn commit(
        &self,
        session_id: &SessionId,
        message: &str,
        response: &str,
    ) -> Result<(), ChatError> {
        // The store is whole-document, so commits for different sessions
        // must not interleave their reload and save.
        let _commit = self.commit_lock.lock().await;

        // A failed reload must abort: saving a partial document would drop
        // every session it did not contain.
        let mut history = self.load_history(session_id).await?;
        history
            .entry(session_id.as_str().to_string())
            .or_default()
            .extend([Turn::user(message), Turn::assistant(response)]);

        self.store.save(&history).await.map_err(|error| {
            tracing::error!(session_id = %session_id, error = %error, "failed to persist conversation");
            ChatError::store(PERSIST_FAILED).with_details(vec![error.to_string()])
        })
    }

    async fn load_history(&self, session_id: &SessionId) -> Result<History, ChatError> {
        let history = self.store.load().await.inspect_err(|error| {
            tracing::error!(session_id = %session_id, error = %error, "failed to load conversation history");
        })?;
        Ok(history)
    }
}

fn resolve_report(
    session_id: &SessionId,
    report: GenerationReport,
) -> Result<(String, ProviderId, Vec<String>), ChatError> {
    let details = report
        .failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>();

    match (report.text, report.provider) {
        (Some(text), Some(provider)) => {
            if !details.is_empty() {
                tracing::info!(
                    session_id = %session_id,
                    provider = %provider,
                    failed = details.len(),
                    "reply generated after fallback"
                );
            }
            Ok((text, provider, details))
        }
        _ if details.is_empty() => {
            tracing::error!(session_id = %session_id, "no generation provider is configured");
            Err(ChatError::unavailable(NO_PROVIDER_CONFIGURED))
        }
        _ => {
            tracing::error!(
                session_id = %session_id,
                failures = ?details,
                "all generation providers failed"
            );
            Err(ChatError::generation_failed(GENERATION_FAILED).with_details(details))
        }
    }
}

pub struct ChatServiceBuilder {
    orchestrator: Arc<ResponseOrchestrator>,
    store: Option<Arc<dyn HistoryStore>>,
    window_turns: usize,
}

impl ChatServiceBuilder {
    pub fn new(orchestrator: Arc<ResponseOrchestrator>) -> Self {
        Self {
            orchestrator,
            store: None,
            window_turns: CONTEXT_WINDOW_TURNS,
        }
    }

    pub fn store(mut self, store: Arc<dyn HistoryStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn window_turns(mut self, window_turns: usize) -> Self {
        self.window_turns = window_turns;
        self
    }

    /// Falls back to an [`InMemoryHistoryStore`] when no store was given.
    pub fn build(self) -> ChatService {
        ChatService {
            orchestrator: self.orchestrator,
            store: self
                .store
                .unwrap_or_else(|| Arc::new(InMemoryHistoryStore::new())),
            window_turns: self.window_turns,
            session_locks: Arc::new(SessionLocks::default()),
            commit_lock: Arc::new(AsyncMutex::new(())),
        }
    }
}
