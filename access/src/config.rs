//! Access Layer Configuration
//!
//! Loads configuration from environment variables.

use anyhow::{bail, Result};
use std::env;

use crate::gate::DeniedCopy;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

/// Configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Fallback log filter when `RUST_LOG` is not set (default: `console_access=info`)
    pub log_level: String,

    /// Log output format (default: JSON)
    pub log_format: LogFormat,

    /// Title override for the access denied panel
    pub denied_title: Option<String>,

    /// Message override for the access denied panel
    pub denied_message: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let log_format = match env::var("LOG_FORMAT") {
            Err(_) => LogFormat::Json,
            Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "" | "json" => LogFormat::Json,
                "pretty" => LogFormat::Pretty,
                other => bail!("LOG_FORMAT must be `json` or `pretty`, got `{other}`"),
            },
        };

        Ok(Self {
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "console_access=info".into()),
            log_format,
            denied_title: non_empty_var("DENIED_TITLE"),
            denied_message: non_empty_var("DENIED_MESSAGE"),
        })
    }

    /// Denied panel wording with any configured overrides applied.
    #[must_use]
    pub fn denied_copy(&self) -> DeniedCopy {
        let defaults = DeniedCopy::default();
        DeniedCopy {
            title: self.denied_title.clone().unwrap_or(defaults.title),
            message: self.denied_message.clone().unwrap_or(defaults.message),
        }
    }

    /// Create a default configuration for testing.
    #[must_use]
    pub fn default_for_test() -> Self {
        Self {
            log_level: "console_access=debug".into(),
            log_format: LogFormat::Pretty,
            denied_title: None,
            denied_message: None,
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
