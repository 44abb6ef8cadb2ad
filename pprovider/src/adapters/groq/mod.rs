mod auth;
mod provider;
mod serde_api;
mod transport;
mod types;

pub use provider::{GROQ_BASE_URL, GROQ_DEFAULT_MODEL, GroqProvider};
pub use transport::{GroqHttpTransport, GroqTransport};
pub use types::{GroqMessage, GroqRequest, GroqResponse, GroqRole};
