//! Provider-agnostic conversation and generation outcome types.
//!
//! ```rust
//! use pprovider::{ProviderError, ProviderId, ProviderOutcome, Speaker, Turn};
//!
//! let turn = Turn::assistant("Hi there");
//! assert_eq!(turn.speaker(), Speaker::Assistant);
//!
//! let failed = ProviderOutcome::from_result(
//!     ProviderId::Gemini,
//!     Err(ProviderError::transport("connection reset")),
//! );
//! assert!(!failed.is_success());
//! ```

use std::fmt::{Display, Formatter};

use crate::ProviderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProviderId {
    Gemini,
    Groq,
}

impl ProviderId {
    /// Human-facing name used in failure details.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Gemini => "Gemini",
            Self::Groq => "Groq",
        }
    }
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let id = match self {
            Self::Gemini => "gemini",
            Self::Groq => "groq",
        };

        f.write_str(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Speaker {
    User,
    Assistant,
}

/// One committed message in a session history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    speaker: Speaker,
    content: String,
}

impl Turn {
    pub fn new(speaker: Speaker, content: impl Into<String>) -> Self {
        Self {
            speaker,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Speaker::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Speaker::Assistant, content)
    }

    pub fn speaker(&self) -> Speaker {
        self.speaker
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// A single adapter's failure, tagged with the adapter that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderFailure {
    pub provider: ProviderId,
    pub error: ProviderError,
}

impl ProviderFailure {
    pub fn new(provider: ProviderId, error: ProviderError) -> Self {
        Self { provider, error }
    }

    pub fn detail(&self) -> &str {
        &self.error.message
    }
}

impl Display for ProviderFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.provider.display_name(), self.error.message)
    }
}

/// Result of one `generate` call. An empty `Success` is still a success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderOutcome {
    Success(String),
    Failure(ProviderFailure),
}

impl ProviderOutcome {
    pub fn from_result(provider: ProviderId, result: Result<String, ProviderError>) -> Self {
        match result {
            Ok(text) => Self::Success(text),
            Err(error) => Self::Failure(ProviderFailure::new(provider, error)),
        }
    }

    pub fn failure(provider: ProviderId, error: ProviderError) -> Self {
        Self::Failure(ProviderFailure::new(provider, error))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}
