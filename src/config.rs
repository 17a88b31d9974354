//! Client configuration from the environment

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_REPORT_PATH: &str = "guia-relatorio.html";
pub const REPORT_PATH: &str = "/report";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must not be empty")]
    Empty { var: &'static str },
    #[error("{var} must be a positive number of seconds, got {value:?}")]
    InvalidTimeout { var: &'static str, value: String },
}

/// Settings for one chat session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin, without a trailing slash
    pub base_url: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
    pub log_dir: PathBuf,
    /// Where the fetched report is written
    pub report_path: PathBuf,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = match lookup("GUIA_BASE_URL") {
            Some(url) => {
                let url = url.trim().trim_end_matches('/');
                if url.is_empty() {
                    return Err(ConfigError::Empty {
                        var: "GUIA_BASE_URL",
                    });
                }
                url.to_string()
            }
            None => DEFAULT_BASE_URL.to_string(),
        };

        let request_timeout = match lookup("GUIA_REQUEST_TIMEOUT_SECS") {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => {
                    return Err(ConfigError::InvalidTimeout {
                        var: "GUIA_REQUEST_TIMEOUT_SECS",
                        value,
                    })
                }
            },
            None => None,
        };

        let log_dir = lookup("GUIA_LOG_DIR").map_or_else(std::env::temp_dir, PathBuf::from);
        let report_path = PathBuf::from(
            lookup("GUIA_REPORT_PATH").unwrap_or_else(|| DEFAULT_REPORT_PATH.to_string()),
        );

        Ok(Self {
            base_url,
            request_timeout,
            log_dir,
            report_path,
        })
    }

    /// Destination shown once the profile is ready
    pub fn report_url(&self) -> String {
        format!("{}{REPORT_PATH}", self.base_url)
    }
}
