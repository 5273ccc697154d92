//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Remote search endpoint settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Search term defaults
    #[serde(default)]
    pub search: SearchConfig,

    /// Preference persistence settings
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Serialize the configuration back to TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(AppError::validation("api.base_url is empty"));
        }
        Url::parse(&self.api.base_url)
            .map_err(|e| AppError::validation(format!("api.base_url is not a URL: {e}")))?;
        if self.api.user_agent.trim().is_empty() {
            return Err(AppError::validation("api.user_agent is empty"));
        }
        if self.search.preference_key.trim().is_empty() {
            return Err(AppError::validation("search.preference_key is empty"));
        }
        if self.storage.preferences_file.trim().is_empty() {
            return Err(AppError::validation("storage.preferences_file is empty"));
        }
        Ok(())
    }
}

/// Remote search endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Search endpoint; the term is appended as `?query=<term>`
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds, 0 disables the client timeout
    #[serde(default)]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: 0,
        }
    }
}

/// Search term settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Term used when nothing has been persisted yet
    #[serde(default = "defaults::default_term")]
    pub default_term: String,

    /// Key the last search term is stored under
    #[serde(default = "defaults::preference_key")]
    pub preference_key: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_term: defaults::default_term(),
            preference_key: defaults::preference_key(),
        }
    }
}

/// Preference persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// File name of the preference store, relative to the data directory
    #[serde(default = "defaults::preferences_file")]
    pub preferences_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            preferences_file: defaults::preferences_file(),
        }
    }
}

mod defaults {
    pub fn base_url() -> String {
        "https://hn.algolia.com/api/v1/search".into()
    }
    pub fn user_agent() -> String {
        concat!("hacker-stories/", env!("CARGO_PKG_VERSION")).into()
    }
    pub fn default_term() -> String {
        "React".into()
    }
    pub fn preference_key() -> String {
        "search".into()
    }
    pub fn preferences_file() -> String {
        "preferences.json".into()
    }
}
