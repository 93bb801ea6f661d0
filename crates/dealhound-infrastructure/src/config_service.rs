//! Configuration service implementation.
//!
//! This module provides a ConfigService that loads the application
//! configuration from the configuration file
//! (~/.config/dealhound/config.toml).

use crate::paths::DealhoundPaths;
use dealhound_core::error::{DealhoundError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

fn default_check_interval_secs() -> u64 {
    3600
}

fn default_amazon_domain() -> String {
    "amazon.ca".to_string()
}

/// Application configuration, persisted as TOML.
///
/// Every field has a default so a partial (or missing) file still loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Seconds between reconciliation passes.
    #[serde(default = "default_check_interval_secs")]
    pub check_interval_secs: u64,
    /// Amazon marketplace domain searched against.
    #[serde(default = "default_amazon_domain")]
    pub amazon_domain: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            check_interval_secs: default_check_interval_secs(),
            amazon_domain: default_amazon_domain(),
        }
    }
}

/// Configuration service that loads and caches the application configuration.
///
/// This implementation reads the configuration from config.toml
/// and caches it to avoid repeated file I/O operations.
#[derive(Debug, Clone)]
pub struct ConfigService {
    /// Explicit config file path; `None` resolves the platform default.
    config_path: Option<PathBuf>,
    /// Cached configuration loaded from file.
    /// Uses RwLock for thread-safe lazy loading.
    config: Arc<RwLock<Option<AppConfig>>>,
}

impl ConfigService {
    /// Creates a new ConfigService using the platform default config path.
    ///
    /// The configuration is loaded lazily on first access to avoid blocking
    /// during initialization.
    pub fn new() -> Self {
        Self {
            config_path: None,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates a ConfigService pinned to an explicit config file path.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: Some(path.into()),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the application configuration, loading from file if not cached.
    ///
    /// Never fails: an unreadable or unparsable file yields the defaults.
    pub fn get_config(&self) -> AppConfig {
        // Check if already cached
        {
            let read_lock = self.config.read().unwrap();
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let loaded = self.load_config().unwrap_or_else(|err| {
            tracing::warn!("Falling back to default configuration: {err}");
            AppConfig::default()
        });

        // Cache it
        {
            let mut write_lock = self.config.write().unwrap();
            *write_lock = Some(loaded.clone());
        }

        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap();
        *write_lock = None;
    }

    /// Loads AppConfig from the config file, writing the defaults out when
    /// the file does not exist yet.
    fn load_config(&self) -> Result<AppConfig> {
        let config_path = self.resolve_path()?;

        if !config_path.exists() {
            let default_config = AppConfig::default();
            Self::write_default(&config_path, &default_config)?;
            return Ok(default_config);
        }

        let content = fs::read_to_string(&config_path).map_err(|e| {
            DealhoundError::io(format!("Failed to read config file at {:?}: {}", config_path, e))
        })?;

        Ok(toml::from_str(&content)?)
    }

    fn write_default(config_path: &PathBuf, config: &AppConfig) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                DealhoundError::io(format!(
                    "Failed to create config directory at {:?}: {}",
                    parent, e
                ))
            })?;
        }

        let toml_string = toml::to_string_pretty(config)?;

        fs::write(config_path, toml_string).map_err(|e| {
            DealhoundError::io(format!(
                "Failed to write config file at {:?}: {}",
                config_path, e
            ))
        })
    }

    fn resolve_path(&self) -> Result<PathBuf> {
        match &self.config_path {
            Some(path) => Ok(path.clone()),
            None => DealhoundPaths::config_file()
                .map_err(|e| DealhoundError::config(e.to_string())),
        }
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}
