//! Configuration types for the homework bot

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::api_client::DEFAULT_ENDPOINT;
use crate::telegram::DEFAULT_TELEGRAM_API_BASE;

pub const PRACTICUM_TOKEN_ENV: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN_ENV: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID_ENV: &str = "TELEGRAM_CHAT_ID";

/// Older deployments export these; read only when the name above is unset
pub const LEGACY_PRACTICUM_TOKEN_ENV: &str = "HW_TOKEN";
pub const LEGACY_TELEGRAM_TOKEN_ENV: &str = "TG_TOKEN";
pub const LEGACY_TELEGRAM_CHAT_ID_ENV: &str = "MY_TG_ID";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub practicum_token: Option<String>,
    #[serde(default)]
    pub telegram_token: Option<String>,
    #[serde(default)]
    pub telegram_chat_id: Option<String>,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_telegram_api_base")]
    pub telegram_api_base: String,
    #[serde(default = "default_retry_interval")]
    pub retry_interval_seconds: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            practicum_token: None,
            telegram_token: None,
            telegram_chat_id: None,
            endpoint: default_endpoint(),
            telegram_api_base: default_telegram_api_base(),
            retry_interval_seconds: default_retry_interval(),
            request_timeout_seconds: default_request_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

/// The three values the bot cannot start without
#[derive(Clone)]
pub struct Credentials {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Overlay credentials from the process environment
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Overlay credentials from `lookup`; non-empty values win over the file.
    /// Each setting is looked up under its current name first, then under
    /// its legacy name.
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let fields = [
            (
                PRACTICUM_TOKEN_ENV,
                LEGACY_PRACTICUM_TOKEN_ENV,
                &mut self.practicum_token,
            ),
            (
                TELEGRAM_TOKEN_ENV,
                LEGACY_TELEGRAM_TOKEN_ENV,
                &mut self.telegram_token,
            ),
            (
                TELEGRAM_CHAT_ID_ENV,
                LEGACY_TELEGRAM_CHAT_ID_ENV,
                &mut self.telegram_chat_id,
            ),
        ];
        for (key, legacy, field) in fields {
            let found = [key, legacy]
                .into_iter()
                .find_map(|name| lookup(name).filter(|v| !v.is_empty()).map(|v| (name, v)));
            if let Some((name, value)) = found {
                if name == legacy {
                    tracing::warn!(
                        "Using deprecated {} from environment; set {} instead",
                        legacy,
                        key
                    );
                } else {
                    tracing::debug!("Using {} from environment", key);
                }
                *field = Some(value);
            }
        }
    }

    /// Check the startup precondition: every credential must be present
    pub fn credentials(&self) -> crate::Result<Credentials> {
        fn required(value: &Option<String>, name: &str) -> crate::Result<String> {
            value
                .as_deref()
                .filter(|v| !v.trim().is_empty())
                .map(str::to_string)
                .ok_or_else(|| {
                    crate::HomeworkBotError::Config(format!(
                        "Missing required setting {}",
                        name
                    ))
                })
        }

        Ok(Credentials {
            practicum_token: required(&self.practicum_token, PRACTICUM_TOKEN_ENV)?,
            telegram_token: required(&self.telegram_token, TELEGRAM_TOKEN_ENV)?,
            telegram_chat_id: required(&self.telegram_chat_id, TELEGRAM_CHAT_ID_ENV)?,
        })
    }

    pub fn retry_interval(&self) -> Duration {
        Duration::from_secs(self.retry_interval_seconds)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_telegram_api_base() -> String {
    DEFAULT_TELEGRAM_API_BASE.to_string()
}

fn default_retry_interval() -> u64 {
    600
}

fn default_request_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::HomeworkBotError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)?;
    Ok(config)
}
