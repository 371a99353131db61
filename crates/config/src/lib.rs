//! Configuration loading, validation, and management for agendum.
//!
//! Loads configuration from `~/.agendum/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use agendum_core::AgendaOrder;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.agendum/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Identifier marker that singles out the AI participant
    #[serde(default = "default_bot_email_domain")]
    pub bot_email_domain: String,

    /// History chunking settings
    #[serde(default)]
    pub chunking: ChunkingConfig,

    /// Summarizer settings
    #[serde(default)]
    pub summary: SummaryConfig,
}

fn default_bot_email_domain() -> String {
    "@ai.com".into()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Agenda block ordering
    #[serde(default)]
    pub agenda_order: AgendaOrder,

    /// Token budget per chunk. Absent means "no limit".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_budget: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
    #[serde(default = "default_model")]
    pub model: String,

    /// Input token limit of the model; history gets what the template leaves
    #[serde(default = "default_input_token_limit")]
    pub input_token_limit: usize,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_top_p")]
    pub top_p: f32,

    #[serde(default = "default_top_k")]
    pub top_k: u32,

    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

fn default_model() -> String {
    "gemini-2.0-flash".into()
}
fn default_input_token_limit() -> usize {
    1_048_576
}
fn default_temperature() -> f32 {
    1.0
}
fn default_top_p() -> f32 {
    0.95
}
fn default_top_k() -> u32 {
    40
}
fn default_max_output_tokens() -> u32 {
    8192
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            input_token_limit: default_input_token_limit(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            top_k: default_top_k(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.agendum/config.toml).
    ///
    /// Environment overrides:
    /// - `AGENDUM_TOKEN_BUDGET` — per-chunk token budget
    /// - `AGENDUM_MODEL` — summary model
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// production).
    fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("AGENDUM_TOKEN_BUDGET") {
            let budget = raw.trim().parse::<usize>().map_err(|e| {
                ConfigError::ValidationError(format!(
                    "AGENDUM_TOKEN_BUDGET must be a non-negative integer, got '{raw}': {e}"
                ))
            })?;
            self.chunking.token_budget = Some(budget);
        }

        if let Some(model) = lookup("AGENDUM_MODEL") {
            self.summary.model = model;
        }

        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".agendum")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.summary.temperature) {
            return Err(ConfigError::ValidationError(
                "summary.temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if !(0.0..=1.0).contains(&self.summary.top_p) {
            return Err(ConfigError::ValidationError(
                "summary.top_p must be between 0.0 and 1.0".into(),
            ));
        }

        if self.summary.input_token_limit == 0 {
            return Err(ConfigError::ValidationError(
                "summary.input_token_limit must be > 0".into(),
            ));
        }

        Ok(())
    }

    /// Generate a default config TOML string (for `agendum config --default`).
    pub fn default_toml() -> String {
        Self::default().to_toml()
    }

    /// Render this configuration as TOML.
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bot_email_domain: default_bot_email_domain(),
            chunking: ChunkingConfig::default(),
            summary: SummaryConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigError> for agendum_core::Error {
    fn from(err: ConfigError) -> Self {
        Self::Config {
            message: err.to_string(),
        }
    }
}
