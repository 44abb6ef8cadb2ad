//! Chat request and reply types.

use pcommon::SessionId;
use pprovider::ProviderId;

/// One inbound chat call. `message` stays optional so the service owns the
/// "missing message" decision regardless of how the request was decoded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatRequest {
    pub message: Option<String>,
    pub session_id: Option<String>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            session_id: None,
        }
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub session_id: SessionId,
    pub response: String,
    pub provider: ProviderId,
    /// Display strings of providers that failed before `provider` answered.
    pub fallback_failures: Vec<String>,
}
