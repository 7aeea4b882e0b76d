// App configuration - .riofer.json discovery and defaults

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::translate::Language;
use crate::translate::client::DEFAULT_ENDPOINT;

pub const CONFIG_FILE: &str = ".riofer.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(String),

    #[error("failed to parse config: {0}")]
    Parse(String),
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Translation service endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Quiet period before a change fires a request, in milliseconds
    #[serde(default = "default_debounce")]
    pub debounce_ms: u64,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,

    /// Language the user types in
    #[serde(default = "default_source_lang")]
    pub source_lang: Language,

    /// Language to translate into
    #[serde(default = "default_target_lang")]
    pub target_lang: Language,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_debounce() -> u64 {
    500
}

fn default_timeout() -> u64 {
    10
}

fn default_source_lang() -> Language {
    Language::Portuguese
}

fn default_target_lang() -> Language {
    Language::English
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            debounce_ms: default_debounce(),
            request_timeout_secs: default_timeout(),
            source_lang: default_source_lang(),
            target_lang: default_target_lang(),
        }
    }
}

fn find_config() -> Option<PathBuf> {
    // Try current directory first
    let local_config = PathBuf::from(CONFIG_FILE);
    if local_config.exists() {
        return Some(local_config);
    }

    // Try home directory
    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(CONFIG_FILE);
        if home_config.exists() {
            return Some(home_config);
        }
    }

    None
}

impl AppConfig {
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load `.riofer.json` from the current directory or home directory,
    /// falling back to defaults when neither exists.
    pub fn load() -> Result<Self, ConfigError> {
        match find_config() {
            Some(path) => {
                let contents =
                    fs::read_to_string(&path).map_err(|e| ConfigError::Io(e.to_string()))?;
                Self::parse(&contents)
            }
            None => Ok(Self::default()),
        }
    }

    /// Write a fully populated example config for the user to edit.
    pub fn write_example(path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(&Self::default())
            .map_err(|e| ConfigError::Parse(e.to_string()))?;
        fs::write(path, json).map_err(|e| ConfigError::Io(e.to_string()))
    }
}
