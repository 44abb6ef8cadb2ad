//! Chat-layer errors and classification.

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatErrorKind {
    /// Missing or empty message. Nothing was attempted.
    InvalidRequest,
    /// Every active provider failed.
    GenerationFailed,
    /// No provider is active, so nothing was attempted.
    Unavailable,
    /// History could not be loaded, or the reply could not be persisted.
    Store,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatError {
    pub kind: ChatErrorKind,
    pub message: String,
    pub details: Vec<String>,
}

impl ChatError {
    pub fn new(kind: ChatErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: Vec::new(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::InvalidRequest, message)
    }

    pub fn generation_failed(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::GenerationFailed, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::Unavailable, message)
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::Store, message)
    }

    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }
}

impl Display for ChatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)?;
        if !self.details.is_empty() {
            write!(f, " ({})", self.details.join("; "))?;
        }
        Ok(())
    }
}

impl Error for ChatError {}

impl From<pmemory::MemoryError> for ChatError {
    fn from(value: pmemory::MemoryError) -> Self {
        ChatError::store(crate::HISTORY_UNAVAILABLE).with_details(vec![value.to_string()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_error_becomes_store_error_with_details() {
        let error = ChatError::from(pmemory::MemoryError::storage("permission denied"));

        assert_eq!(error.kind, ChatErrorKind::Store);
        assert_eq!(error.message, crate::HISTORY_UNAVAILABLE);
        assert_eq!(error.details, vec!["Storage: permission denied"]);
    }
}
