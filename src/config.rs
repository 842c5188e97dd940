//! Configuration handling for the intake app
//!
//! Read from `config.json` in the platform config directory, then overridden
//! by environment variables, then validated into the values the controller
//! and the HTTP client are built with.

use crate::intake::DEFAULT_ENDPOINT;
use crate::state::FormSettings;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const ENDPOINT_ENV: &str = "NARADDON_CONSULT_ENDPOINT";
pub const RESET_DELAY_ENV: &str = "NARADDON_CONSULT_RESET_DELAY_MS";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Invalid configuration values
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error("endpoint must be an http(s) URL, got {0:?}")]
    Endpoint(String),

    #[error("{name} is not a number: {value:?}")]
    Env { name: &'static str, value: String },
}

/// User configuration, every key optional
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ConsultConfig {
    /// Submission endpoint URL
    pub endpoint: Option<String>,
    pub request_timeout_secs: Option<u64>,
    /// Delay before the form resets after a successful submission
    pub reset_delay_ms: Option<u64>,
    pub message_max_length: Option<usize>,
    /// Log file, defaults to one in the platform data directory
    pub log_file: Option<PathBuf>,
}

/// Validated configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub endpoint: String,
    pub request_timeout: Duration,
    pub settings: FormSettings,
    pub log_file: Option<PathBuf>,
}

impl ConsultConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "naraddon", "naraddon-consult")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Log file used when none is configured; stderr belongs to the terminal UI
    pub fn default_log_file() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_local_dir().join("naraddon-consult.log"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: ConsultConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Apply overrides from the process environment
    pub fn with_env(self) -> Result<Self, ConfigError> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from `lookup`, keyed by environment variable name
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(endpoint) = lookup(ENDPOINT_ENV).filter(|v| !v.trim().is_empty()) {
            self.endpoint = Some(endpoint.trim().to_string());
        }
        if let Some(value) = lookup(RESET_DELAY_ENV) {
            let delay = value.trim().parse::<u64>().map_err(|_| ConfigError::Env {
                name: RESET_DELAY_ENV,
                value: value.clone(),
            })?;
            self.reset_delay_ms = Some(delay);
        }
        Ok(self)
    }

    /// Fill in defaults and validate
    pub fn resolve(&self) -> Result<ResolvedConfig, ConfigError> {
        let endpoint = self
            .endpoint
            .clone()
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::Endpoint(endpoint));
        }

        let timeout_secs = self
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ConfigError::Zero {
                field: "request_timeout_secs",
            });
        }

        let reset_delay = self
            .reset_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(FormSettings::DEFAULT_RESET_DELAY);
        if reset_delay.is_zero() {
            return Err(ConfigError::Zero {
                field: "reset_delay_ms",
            });
        }

        let message_max_length = self
            .message_max_length
            .unwrap_or(FormSettings::DEFAULT_MESSAGE_MAX_LENGTH);
        if message_max_length == 0 {
            return Err(ConfigError::Zero {
                field: "message_max_length",
            });
        }

        Ok(ResolvedConfig {
            endpoint,
            request_timeout: Duration::from_secs(timeout_secs),
            settings: FormSettings {
                reset_delay,
                message_max_length,
            },
            log_file: self.log_file.clone().or_else(Self::default_log_file),
        })
    }
}
