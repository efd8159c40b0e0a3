//! Configuration for the relay loop
//!
//! All environment access happens here, once, at startup. The resulting
//! `Config` is immutable and handed to each component's constructor; the
//! clients and the loop never consult the environment themselves.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Bearer credential for the relay endpoint.
pub const ENV_RELAY_AUTH_TOKEN: &str = "GAIANET_AUTH_TOKEN";
/// POST target for the relay endpoint.
pub const ENV_RELAY_API_URL: &str = "API_URL";
/// Credential for the completion provider.
pub const ENV_PROVIDER_API_KEY: &str = "GROQ_API_KEY";
/// Per-iteration delay in seconds.
pub const ENV_SLEEP_INTERVAL: &str = "SLEEP_INTERVAL_SECS";
/// Question file path.
pub const ENV_QUESTIONS_FILE: &str = "QUESTIONS_FILE";

pub const DEFAULT_SLEEP_SECS: u64 = 5;
pub const DEFAULT_QUESTIONS_FILE: &str = "questions.txt";

/// Fatal, startup-only errors. Any of these exits the process before the
/// loop is entered.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid value {value:?} for {var}: {reason}")]
    InvalidVar {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("questions file {} could not be read: {source}", .path.display())]
    QuestionsUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("questions file {} contains no non-blank lines", .path.display())]
    QuestionsEmpty { path: PathBuf },
}

/// Immutable process configuration, read once from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer token sent to the relay endpoint
    pub relay_auth_token: String,

    /// URL the relay client POSTs to
    pub relay_api_url: String,

    /// API key for the completion provider
    pub provider_api_key: String,

    /// Delay between loop iterations
    pub sleep_interval: Duration,

    /// File holding one question per line
    pub questions_file: PathBuf,
}

impl Config {
    /// Read configuration from the process environment, loading a `.env`
    /// file from the working directory first if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let relay_auth_token = require(ENV_RELAY_AUTH_TOKEN)?;
        let relay_api_url = require(ENV_RELAY_API_URL)?;
        let provider_api_key = require(ENV_PROVIDER_API_KEY)?;

        let sleep_interval = sleep_interval_from(optional(ENV_SLEEP_INTERVAL))?;
        let questions_file = optional(ENV_QUESTIONS_FILE)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_QUESTIONS_FILE));

        Ok(Self {
            relay_auth_token,
            relay_api_url,
            provider_api_key,
            sleep_interval,
            questions_file,
        })
    }
}

fn sleep_interval_from(raw: Option<String>) -> Result<Duration, ConfigError> {
    match raw {
        Some(raw) => {
            let secs = raw.parse::<u64>().map_err(|e| ConfigError::InvalidVar {
                var: ENV_SLEEP_INTERVAL,
                value: raw.clone(),
                reason: e.to_string(),
            })?;
            Ok(Duration::from_secs(secs))
        }
        None => Ok(Duration::from_secs(DEFAULT_SLEEP_SECS)),
    }
}

fn require(var: &'static str) -> Result<String, ConfigError> {
    optional(var).ok_or(ConfigError::MissingVar(var))
}

/// Blank and whitespace-only values count as unset.
fn optional(var: &'static str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sleep_interval_defaults() {
        let interval = sleep_interval_from(None).unwrap();
        assert_eq!(interval, Duration::from_secs(DEFAULT_SLEEP_SECS));
    }

    #[test]
    fn test_sleep_interval_parses_seconds() {
        let interval = sleep_interval_from(Some("12".to_string())).unwrap();
        assert_eq!(interval, Duration::from_secs(12));
    }

    #[test]
    fn test_sleep_interval_rejects_garbage() {
        let err = sleep_interval_from(Some("soon".to_string())).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidVar {
                var: ENV_SLEEP_INTERVAL,
                ..
            }
        ));
    }
}
