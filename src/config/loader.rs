//! Config struct and loading logic.
//!
//! Priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables
//! 3. `.diffbrief.toml` in the first workspace folder
//! 4. `~/.config/diffbrief/config.toml` (global defaults)
//! 5. Built-in defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants::{CONFIG_DIR, CONFIG_FILENAME, ENV_API_KEY, ENV_API_URL, ENV_MODEL};
use crate::diff::{SummaryError, SummaryLimits};
use crate::env::Env;
use crate::validation::ValidationConstraints;

/// Errors during config loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid [summary] settings: {0}")]
    InvalidSummary(#[from] SummaryError),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub summary: SummaryLimits,
    pub redaction: RedactionConfig,
    pub limits: ValidationConstraints,
    pub provider: ProviderConfig,
    pub logging: LoggingConfig,
}

/// Extra redaction rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RedactionConfig {
    /// Path to a TOML file of additional rules.
    pub additional_rules: Option<String>,
}

/// Remote model settings. Only validated here; nothing is sent.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub api_url: Option<String>,
    pub model: Option<String>,
    pub temperature: f64,
    pub api_key: Option<String>,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            model: None,
            temperature: 0.2,
            api_key: None,
        }
    }
}

/// Log verbosity when `DIFFBRIEF_LOG` is unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load configuration with proper layering.
    pub fn load(workspace_root: Option<&Path>, env: &Env) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                config.merge(Self::load_file(&global_path)?);
            }
        }

        if let Some(root) = workspace_root {
            let local_path = root.join(CONFIG_FILENAME);
            if local_path.exists() {
                config.merge(Self::load_file(&local_path)?);
            }
        }

        config.apply_env_vars(env);
        config.summary.validate()?;

        Ok(config)
    }

    /// Load a config from a specific file.
    fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(CONFIG_DIR).join("config.toml"))
    }

    /// Merge another config into this one; `other` wins wherever it differs from the defaults.
    fn merge(&mut self, other: Config) {
        let summary = SummaryLimits::default();
        if other.summary.max_lines_per_file != summary.max_lines_per_file {
            self.summary.max_lines_per_file = other.summary.max_lines_per_file;
        }
        if other.summary.max_changed_lines != summary.max_changed_lines {
            self.summary.max_changed_lines = other.summary.max_changed_lines;
        }

        if other.redaction.additional_rules.is_some() {
            self.redaction.additional_rules = other.redaction.additional_rules;
        }

        let limits = ValidationConstraints::default();
        if other.limits.max_diff_length != limits.max_diff_length {
            self.limits.max_diff_length = other.limits.max_diff_length;
        }
        if other.limits.max_api_key_length != limits.max_api_key_length {
            self.limits.max_api_key_length = other.limits.max_api_key_length;
        }
        if other.limits.max_commit_message_length != limits.max_commit_message_length {
            self.limits.max_commit_message_length = other.limits.max_commit_message_length;
        }

        if other.provider.api_url.is_some() {
            self.provider.api_url = other.provider.api_url;
        }
        if other.provider.model.is_some() {
            self.provider.model = other.provider.model;
        }
        if other.provider.temperature != ProviderConfig::default().temperature {
            self.provider.temperature = other.provider.temperature;
        }
        if other.provider.api_key.is_some() {
            self.provider.api_key = other.provider.api_key;
        }

        if other.logging.level != LoggingConfig::default().level {
            self.logging.level = other.logging.level;
        }
    }

    fn apply_env_vars(&mut self, env: &Env) {
        if let Some(url) = env.get(ENV_API_URL) {
            self.provider.api_url = Some(url);
        }
        if let Some(model) = env.get(ENV_MODEL) {
            self.provider.model = Some(model);
        }
        if let Some(key) = env.get(ENV_API_KEY) {
            self.provider.api_key = Some(key);
        }
    }
}
