//! Process configuration read from the environment.
//!
//! ```rust
//! use parley::ParleyConfig;
//!
//! let config = ParleyConfig::from_lookup(|key| match key {
//!     "GEMINI_API_KEY" => Some("AIza-example".to_string()),
//!     "PORT" => Some("8080".to_string()),
//!     _ => None,
//! })
//! .expect("config should parse");
//!
//! assert_eq!(config.port, 8080);
//! assert!(config.groq_api_key.is_none());
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use pmemory::DEFAULT_HISTORY_PATH;
use pprovider::{ProviderId, SecretString};

use crate::ProviderBuildConfig;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub key: &'static str,
    pub message: String,
}

impl ConfigError {
    fn invalid(key: &'static str, value: &str, expected: &str) -> Self {
        Self {
            key,
            message: format!("expected {expected}, got '{value}'"),
        }
    }
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {}: {}", self.key, self.message)
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct ParleyConfig {
    pub gemini_api_key: Option<SecretString>,
    pub groq_api_key: Option<SecretString>,
    pub gemini_model: Option<String>,
    pub groq_model: Option<String>,
    pub host: IpAddr,
    pub port: u16,
    pub history_path: PathBuf,
    pub provider_timeout: Duration,
}

impl Default for ParleyConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            groq_api_key: None,
            gemini_model: None,
            groq_model: None,
            host: DEFAULT_HOST,
            port: DEFAULT_PORT,
            history_path: PathBuf::from(DEFAULT_HISTORY_PATH),
            provider_timeout: DEFAULT_PROVIDER_TIMEOUT,
        }
    }
}

impl ParleyConfig {
    /// Loads `.env` when present, then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(error) = dotenv::dotenv() {
            if !error.not_found() {
                tracing::warn!(error = %error, "failed to load .env file");
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let host = match read("HOST") {
            Some(value) => value
                .parse::<IpAddr>()
                .map_err(|_| ConfigError::invalid("HOST", &value, "an IP address"))?,
            None => defaults.host,
        };
        let port = match read("PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError::invalid("PORT", &value, "a port number"))?,
            None => defaults.port,
        };
        let provider_timeout = match read("PROVIDER_TIMEOUT_SECS") {
            Some(value) => value
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or_else(|| {
                    ConfigError::invalid("PROVIDER_TIMEOUT_SECS", &value, "a positive integer")
                })?,
            None => defaults.provider_timeout,
        };

        Ok(Self {
            gemini_api_key: read("GEMINI_API_KEY").map(SecretString::new),
            groq_api_key: read("GROQ_API_KEY").map(SecretString::new),
            gemini_model: read("GEMINI_MODEL"),
            groq_model: read("GROQ_MODEL"),
            host,
            port,
            history_path: read("HISTORY_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.history_path),
            provider_timeout,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Per-provider build settings in fallback order. Providers without a key
    /// are still listed with `api_key: None` so callers can report them.
    pub fn provider_configs(&self) -> Vec<(ProviderId, Option<ProviderBuildConfig>)> {
        [
            (ProviderId::Gemini, &self.gemini_api_key, &self.gemini_model),
            (ProviderId::Groq, &self.groq_api_key, &self.groq_model),
        ]
        .into_iter()
        .map(|(provider_id, api_key, model)| {
            let config = api_key.as_ref().map(|key| {
                let mut config = ProviderBuildConfig::new(provider_id, key.expose())
                    .with_timeout(self.provider_timeout);
                if let Some(model) = model {
                    config = config.with_model(model.clone());
                }
                config
            });
            (provider_id, config)
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ParleyConfig, ConfigError> {
        let vars = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        ParleyConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]).expect("empty env is valid");

        assert!(config.gemini_api_key.is_none());
        assert!(config.groq_api_key.is_none());
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:5000");
        assert_eq!(config.history_path, PathBuf::from("data/memory.json"));
        assert_eq!(config.provider_timeout, Duration::from_secs(60));
    }

    #[test]
    fn blank_keys_are_treated_as_absent() {
        let config = config_from(&[("GEMINI_API_KEY", "   "), ("GROQ_API_KEY", "gsk_x")])
            .expect("config should parse");

        assert!(config.gemini_api_key.is_none());
        assert_eq!(
            config.groq_api_key.as_ref().map(SecretString::expose),
            Some("gsk_x")
        );
    }

    #[test]
    fn invalid_port_is_a_configuration_error() {
        let error = config_from(&[("PORT", "http")]).expect_err("port must be numeric");

        assert_eq!(error.key, "PORT");
        assert_eq!(error.to_string(), "invalid PORT: expected a port number, got 'http'");
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let error =
            config_from(&[("PROVIDER_TIMEOUT_SECS", "0")]).expect_err("timeout must be positive");
        assert_eq!(error.key, "PROVIDER_TIMEOUT_SECS");
    }

    #[test]
    fn provider_configs_keep_fallback_order_and_overrides() {
        let config = config_from(&[
            ("GEMINI_API_KEY", "AIza-key"),
            ("GEMINI_MODEL", "gemini-2.0-flash"),
            ("PROVIDER_TIMEOUT_SECS", "15"),
        ])
        .expect("config should parse");

        let providers = config.provider_configs();

        assert_eq!(providers[0].0, ProviderId::Gemini);
        assert_eq!(providers[1].0, ProviderId::Groq);
        let gemini = providers[0].1.as_ref().expect("gemini configured");
        assert_eq!(gemini.model.as_deref(), Some("gemini-2.0-flash"));
        assert_eq!(gemini.timeout, Duration::from_secs(15));
        assert!(providers[1].1.is_none());
    }
}
