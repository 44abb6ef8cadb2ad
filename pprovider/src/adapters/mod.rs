#[cfg(any(feature = "provider-gemini", feature = "provider-groq"))]
mod http;

#[cfg(feature = "provider-gemini")]
pub mod gemini;

#[cfg(feature = "provider-groq")]
pub mod groq;
