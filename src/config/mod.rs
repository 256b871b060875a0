//! Configuration management
//!
//! This module handles loading and parsing configuration for the admin console.
//! Configuration can be loaded from:
//! - config.yml file
//! - Environment variables (override file settings)
//!
//! Missing optional values are filled with sensible defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::DEFAULT_PAGE_SIZE;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Derived-view cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
    /// Moderation screen configuration
    #[serde(default)]
    pub moderation: ModerationConfig,
    /// Seed data configuration
    #[serde(default)]
    pub seed: SeedConfig,
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache TTL in seconds
    #[serde(default = "default_ttl")]
    pub ttl_seconds: u64,
    /// Maximum number of cached views
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: default_ttl(),
            max_capacity: default_max_capacity(),
        }
    }
}

fn default_ttl() -> u64 {
    300
}

fn default_max_capacity() -> u64 {
    1000
}

/// Moderation screen configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerationConfig {
    /// Submissions shown per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

/// Seed data configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedConfig {
    /// YAML seed file; the embedded demo dataset is used when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Error type for configuration parsing
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {message}")]
    ParseError {
        path: String,
        message: String,
    },
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

impl Config {
    /// Load configuration from file
    ///
    /// If the file doesn't exist or is empty, returns default configuration.
    /// If the file exists but is invalid YAML, returns an error with details.
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: format_yaml_error(&e),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file with environment variable overrides
    ///
    /// Environment variables follow the pattern:
    /// - APIDIR_CACHE_TTL_SECONDS
    /// - APIDIR_CACHE_MAX_CAPACITY
    /// - APIDIR_MODERATION_PAGE_SIZE
    /// - APIDIR_SEED_PATH
    pub fn load_with_env(path: &std::path::Path) -> anyhow::Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.moderation.page_size == 0 {
            return Err(ConfigError::ValidationError(
                "moderation.page_size must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply environment variable overrides to the configuration
    fn apply_env_overrides(&mut self) {
        if let Ok(ttl) = std::env::var("APIDIR_CACHE_TTL_SECONDS") {
            if let Ok(ttl) = ttl.parse::<u64>() {
                self.cache.ttl_seconds = ttl;
            }
        }
        if let Ok(capacity) = std::env::var("APIDIR_CACHE_MAX_CAPACITY") {
            if let Ok(capacity) = capacity.parse::<u64>() {
                self.cache.max_capacity = capacity;
            }
        }

        if let Ok(page_size) = std::env::var("APIDIR_MODERATION_PAGE_SIZE") {
            match page_size.parse::<usize>() {
                Ok(size) if size > 0 => self.moderation.page_size = size,
                _ => {} // Ignore invalid values
            }
        }

        if let Ok(path) = std::env::var("APIDIR_SEED_PATH") {
            if !path.trim().is_empty() {
                self.seed.path = Some(PathBuf::from(path));
            }
        }
    }
}

/// Format YAML parsing error with location and context
fn format_yaml_error(e: &serde_yaml::Error) -> String {
    if let Some(location) = e.location() {
        format!(
            "at line {}, column {}: {}",
            location.line(),
            location.column(),
            e
        )
    } else {
        e.to_string()
    }
}

// Shared mutex for config tests that modify environment variables.
#[cfg(test)]
static CONFIG_ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());
