//! Client configuration read from the environment.

use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";

/// Base URL the page forms resolve against.
pub const ENV_URL: &str = "HTTPDROP_URL";
/// Whole-request timeout in seconds. Unset means wait indefinitely.
pub const ENV_TIMEOUT: &str = "HTTPDROP_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var}={value:?} is not a number of seconds")]
    InvalidTimeout { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source; `from_env` uses the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(url) = lookup(ENV_URL).filter(|v| !v.trim().is_empty()) {
            config.base_url = directory_url(url.trim());
        }
        if let Some(raw) = lookup(ENV_TIMEOUT) {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidTimeout {
                var: ENV_TIMEOUT,
                value: raw.clone(),
            })?;
            config.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }
        Ok(config)
    }
}

/// Append a trailing slash so relative actions resolve below the base path.
fn directory_url(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{url}/")
    }
}
