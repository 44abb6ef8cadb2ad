//! Shared utilities and strongly-typed common values for workspace crates.
//!
//! ```rust
//! use pcommon::SessionId;
//!
//! let session = SessionId::from("session-1");
//! assert_eq!(session.as_str(), "session-1");
//! assert_eq!(SessionId::resolve(None).as_str(), "default_user");
//! ```

pub mod future {
    //! Shared async future aliases.
    //!
    //! ```rust
    //! use pcommon::BoxFuture;
    //!
    //! fn str_len<'a>(value: &'a str) -> BoxFuture<'a, usize> {
    //!     Box::pin(async move { value.len() })
    //! }
    //!
    //! let _future = str_len("hello");
    //! ```

    use std::future::Future;
    use std::pin::Pin;

    pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
}

pub mod context {
    //! Session identifier newtype shared by the store, chat, and server layers.
    //!
    //! ```rust
    //! use pcommon::SessionId;
    //!
    //! let session = SessionId::new("session-42");
    //! assert_eq!(session.to_string(), "session-42");
    //! assert_eq!(SessionId::resolve(None), SessionId::default());
    //! assert_eq!(SessionId::resolve(Some("   ")).as_str(), "   ");
    //! ```

    use std::fmt::{Display, Formatter};

    /// Session used when a caller does not name one.
    pub const DEFAULT_SESSION_ID: &str = "default_user";

    #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct SessionId(String);

    impl SessionId {
        pub fn new(value: impl Into<String>) -> Self {
            Self(value.into())
        }

        /// Falls back to [`DEFAULT_SESSION_ID`] only when no identifier was
        /// sent. Any value given, including an empty one, is used verbatim.
        pub fn resolve(value: Option<&str>) -> Self {
            value.map(Self::new).unwrap_or_default()
        }

        pub fn as_str(&self) -> &str {
            self.0.as_str()
        }

        pub fn into_string(self) -> String {
            self.0
        }
    }

    impl Default for SessionId {
        fn default() -> Self {
            Self(DEFAULT_SESSION_ID.to_string())
        }
    }

    impl Display for SessionId {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.0)
        }
    }

    impl From<String> for SessionId {
        fn from(value: String) -> Self {
            Self(value)
        }
    }

    impl From<&str> for SessionId {
        fn from(value: &str) -> Self {
            Self(value.to_string())
        }
    }
}

pub use context::{DEFAULT_SESSION_ID, SessionId};
pub use future::BoxFuture;

#[cfg(test)]
mod tests {
    use super::{DEFAULT_SESSION_ID, SessionId};

    #[test]
    fn session_id_round_trips_strings() {
        let session = SessionId::new("session-1");

        assert_eq!(session.as_str(), "session-1");
        assert_eq!(session.to_string(), "session-1");
        assert_eq!(session.into_string(), "session-1".to_string());
    }

    #[test]
    fn resolve_defaults_only_missing_ids() {
        assert_eq!(SessionId::resolve(None).as_str(), DEFAULT_SESSION_ID);
        assert_eq!(SessionId::resolve(Some("")).as_str(), "");
        assert_eq!(SessionId::resolve(Some(" \t")).as_str(), " \t");
        assert_eq!(SessionId::resolve(Some("s1")).as_str(), "s1");
    }
}
