//! Configuration loading and management for docsumma.
//!
//! Loads settings from `docsumma.toml` with environment variable overrides for sensitive data.

use crate::pipeline::{Mode, SummaryOptions};
use crate::remote::RemoteConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const CONFIG_FILE: &str = "docsumma.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("missing required API key for provider: {0}")]
    MissingApiKey(String),
}

/// Summarisation defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    /// Strategy used when none is given on the command line
    pub mode: Mode,
    /// Soft bound on heuristic summary length, in characters
    pub max_length: usize,
    /// Target remote summary length, in words
    pub max_words: usize,
    /// Number of key points to extract
    pub num_points: usize,
}

/// LLM backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteSettings {
    /// Base URL of an OpenAI-compatible API
    pub endpoint: String,
    /// Model identifier (e.g., "gpt-3.5-turbo")
    pub model: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// API keys configuration (loaded from environment)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiConfig {
    #[serde(default)]
    pub openai_key: Option<String>,
}

/// Input validation limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Largest accepted PDF, in bytes
    pub max_file_size: u64,
}

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub summarizer: SummarizerConfig,
    #[serde(default)]
    pub remote: RemoteSettings,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub input: InputConfig,
}

impl Config {
    /// Load configuration from the default location (docsumma.toml in cwd or home).
    ///
    /// Falls back to built-in defaults when no file exists.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::find_config_file() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::debug!("no {} found, using defaults", CONFIG_FILE);
                let mut config = Config::default();
                config.apply_env();
                Ok(config)
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.apply_env();
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Override API keys from environment variables
    fn apply_env(&mut self) {
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            self.api.openai_key = Some(key);
        }
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        // Check current directory first
        let local_config = PathBuf::from(CONFIG_FILE);
        if local_config.exists() {
            return Some(local_config);
        }

        // Check home directory
        let home_config = dirs::home_dir()?
            .join(".config")
            .join("docsumma")
            .join(CONFIG_FILE);
        home_config.exists().then_some(home_config)
    }

    /// Get the API key for the remote backend
    pub fn api_key(&self) -> Result<&str, ConfigError> {
        self.api
            .openai_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingApiKey("openai".to_string()))
    }

    /// Connection settings handed to the remote backend
    pub fn remote_config(&self) -> Result<RemoteConfig, ConfigError> {
        Ok(RemoteConfig {
            endpoint: self.remote.endpoint.clone(),
            api_key: self.api_key()?.to_string(),
            model: self.remote.model.clone(),
            timeout: Duration::from_secs(self.remote.timeout_secs),
        })
    }

    /// Summary options from the configured defaults
    pub fn summary_options(&self) -> SummaryOptions {
        SummaryOptions {
            max_length: self.summarizer.max_length,
            max_words: self.summarizer.max_words,
            num_points: self.summarizer.num_points,
        }
    }
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        let options = SummaryOptions::default();
        Self {
            mode: Mode::default(),
            max_length: options.max_length,
            max_words: options.max_words,
            num_points: options.num_points,
        }
    }
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            timeout_secs: 60,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            max_file_size: 10 * 1024 * 1024,
        }
    }
}
