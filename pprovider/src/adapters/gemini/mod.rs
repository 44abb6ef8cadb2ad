mod auth;
mod models;
mod provider;
mod serde_api;
mod tests;
mod transport;
mod types;

pub use models::{list_gemini_models, list_gemini_models_with_base_url};
pub use provider::{GEMINI_BASE_URL, GEMINI_DEFAULT_MODEL, GeminiProvider};
pub use transport::{GeminiHttpTransport, GeminiTransport};
pub use types::{GeminiContent, GeminiRequest, GeminiResponse, GeminiRole};
