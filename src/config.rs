//! Client configuration.
//!
//! Built with the builder methods or read from the environment:
//!
//! | Variable | Default |
//! |---|---|
//! | `BLUEPRINT_API_URL` | `https://api.blueprint.xyz` |
//! | `BLUEPRINT_AUTH_GRACE_MS` | `300` |
//! | `BLUEPRINT_STORAGE` | `~/.blueprint/storage.json` |
//! | `BLUEPRINT_LOG` | `info` |

use std::path::PathBuf;
use std::time::Duration;

use crate::adapters::FileStorage;
use crate::api::DEFAULT_API_URL;
use crate::auth::DEFAULT_AUTH_GRACE;
use crate::error::{BlueprintError, BlueprintResult};

pub const API_URL_ENV: &str = "BLUEPRINT_API_URL";
pub const AUTH_GRACE_ENV: &str = "BLUEPRINT_AUTH_GRACE_MS";
pub const STORAGE_ENV: &str = "BLUEPRINT_STORAGE";
pub const LOG_ENV: &str = "BLUEPRINT_LOG";

pub const DEFAULT_LOG_FILTER: &str = "info";

/// # Example
///
/// ```ignore
/// use blueprint::config::ClientConfig;
///
/// let config = ClientConfig::default()
///     .with_api_base_url("http://localhost:4000")
///     .with_auth_grace(Duration::from_millis(500));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_base_url: String,
    /// How long the auth gate waits for the session to rehydrate
    pub auth_grace: Duration,
    /// Session storage file; `None` means the default under the home directory
    pub storage_path: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            auth_grace: DEFAULT_AUTH_GRACE,
            storage_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_auth_grace(mut self, grace: Duration) -> Self {
        self.auth_grace = grace;
        self
    }

    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = Some(path.into());
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Defaults overridden by whichever `BLUEPRINT_*` variables are set.
    /// Empty values are treated as unset.
    pub fn from_env() -> BlueprintResult<Self> {
        let mut config = Self::default();

        if let Some(url) = env_var(API_URL_ENV) {
            config = config.with_api_base_url(url);
        }
        if let Some(raw) = env_var(AUTH_GRACE_ENV) {
            let millis: u64 = raw.parse().map_err(|_| BlueprintError::InvalidConfig {
                key: AUTH_GRACE_ENV.to_string(),
                message: format!("expected milliseconds, got '{}'", raw),
            })?;
            config = config.with_auth_grace(Duration::from_millis(millis));
        }
        if let Some(path) = env_var(STORAGE_ENV) {
            config = config.with_storage_path(path);
        }
        if let Some(filter) = env_var(LOG_ENV) {
            config = config.with_log_filter(filter);
        }

        Ok(config)
    }

    /// Open the configured session storage.
    pub fn storage(&self) -> BlueprintResult<FileStorage> {
        match &self.storage_path {
            Some(path) => Ok(FileStorage::with_path(path)),
            None => FileStorage::new().ok_or(BlueprintError::NoHomeDirectory),
        }
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
