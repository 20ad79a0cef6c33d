//! Configuration management for landrecords
//!
//! Supports environment variables, config files, and runtime overrides.
//!
//! Config file location: ~/.config/landrecords/config.toml

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{LandRecordsError, Result};

/// Default root of the county records portal
pub const DEFAULT_PORTAL_URL: &str = "http://landrecords.co.harrison.ms.us/";

/// Default bounded wait for each gating element, in milliseconds
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 10_000;

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Whether to show debug output
    #[serde(default)]
    pub debug: bool,
    /// Records portal configuration
    #[serde(default)]
    pub portal: PortalConfig,
    /// Remote executor configuration
    #[serde(default)]
    pub executor: ExecutorConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Records portal configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    /// Portal root the browser navigates to first
    pub url: String,
    /// Timeout for every wait step in ms
    pub wait_timeout_ms: u64,
}

/// Remote browser executor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Endpoint accepting step sequences (no default)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Bearer token sent with every request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    /// Name of the browser tool on the executor side
    pub tool: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: env::var("LANDRECORDS_DEBUG")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            portal: PortalConfig::default(),
            executor: ExecutorConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            url: env::var("LANDRECORDS_PORTAL_URL")
                .unwrap_or_else(|_| DEFAULT_PORTAL_URL.to_string()),
            wait_timeout_ms: env::var("LANDRECORDS_WAIT_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_WAIT_TIMEOUT_MS),
        }
    }
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            endpoint: env::var("LANDRECORDS_EXECUTOR_URL").ok(),
            api_token: env::var("LANDRECORDS_EXECUTOR_TOKEN").ok(),
            tool: env::var("LANDRECORDS_EXECUTOR_TOOL").unwrap_or_else(|_| "browser".to_string()),
            timeout_secs: 120,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("landrecords")
    }

    /// Get the config file path
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load configuration from file, environment, and defaults
    /// Priority: CLI args > config file > env vars > defaults
    ///
    /// A missing config file falls back to defaults; an unreadable or
    /// malformed one is an error.
    pub fn load() -> Result<Self> {
        // Try to load .env file if it exists
        let _ = dotenvy::dotenv();

        Self::load_or_default(&Self::config_file())
    }

    /// Load from a path, using defaults (which respect env vars) when it does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        Self::load_from_path(path)
    }

    /// Load configuration from the default config file only
    pub fn load_from_file() -> Result<Self> {
        Self::load_from_path(&Self::config_file())
    }

    /// Load configuration from an explicit path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(LandRecordsError::config("Config file not found"));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| LandRecordsError::config(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| LandRecordsError::config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to the default config file and return its path
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file();
        self.save_to_path(&path)?;
        Ok(path)
    }

    /// Save configuration to an explicit path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir).map_err(|e| {
                    LandRecordsError::config(format!("Failed to create config dir: {}", e))
                })?;
            }
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| LandRecordsError::config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)
            .map_err(|e| LandRecordsError::config(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Check that the settings can drive a search
    pub fn validate(&self) -> Result<()> {
        self.portal.validate()?;

        if let Some(endpoint) = &self.executor.endpoint {
            url::Url::parse(endpoint).map_err(|e| {
                LandRecordsError::config(format!("Invalid executor endpoint '{}': {}", endpoint, e))
            })?;
        }

        if self.executor.timeout_secs == 0 {
            return Err(LandRecordsError::config(
                "Executor timeout must be a positive number of seconds",
            ));
        }

        if self.executor.tool.trim().is_empty() {
            return Err(LandRecordsError::config("Executor tool name must not be empty"));
        }

        Ok(())
    }
}

impl PortalConfig {
    /// Check the portal URL parses and the wait timeout is positive
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.url).map_err(|e| {
            LandRecordsError::invalid_input(format!("Invalid portal URL '{}': {}", self.url, e))
        })?;

        if self.wait_timeout_ms == 0 {
            return Err(LandRecordsError::invalid_input(
                "Wait timeout must be a positive number of milliseconds",
            ));
        }

        Ok(())
    }
}
