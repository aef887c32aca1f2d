//! Configuration persistence
//!
//! Saves and loads gate settings such as the lockout threshold and where
//! credentials are stored.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::PingateError;
use crate::lockout::{LockoutPolicy, DEFAULT_MAX_TRIES};

/// Configuration file name
const CONFIG_FILE_NAME: &str = "config.json";

/// Directory name under the platform config/data dirs
const APP_DIR_NAME: &str = "pingate";

/// Settings that persist across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingateConfig {
    /// Failed attempts before the lockout prompt
    #[serde(default = "default_max_tries")]
    pub max_tries: u32,

    /// Treat an unset stored PIN as a successful authentication
    ///
    /// This lets a device with no PIN configured through the gate. Disable
    /// it to make Authenticate mode fail closed until a PIN is set.
    #[serde(default = "default_unset_pin_passes")]
    pub unset_pin_passes: bool,

    /// Text shown by the biometric sensor
    #[serde(default = "default_biometric_prompt")]
    pub biometric_prompt: String,

    /// Where credentials and the retry counter live
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

fn default_max_tries() -> u32 {
    DEFAULT_MAX_TRIES
}

fn default_unset_pin_passes() -> bool {
    true
}

fn default_biometric_prompt() -> String {
    "Confirm your identity".to_string()
}

impl Default for PingateConfig {
    fn default() -> Self {
        Self {
            max_tries: default_max_tries(),
            unset_pin_passes: default_unset_pin_passes(),
            biometric_prompt: default_biometric_prompt(),
            data_dir: None,
        }
    }
}

impl PingateConfig {
    /// Get the configuration directory path
    pub fn config_dir() -> Option<PathBuf> {
        // Try XDG_CONFIG_HOME first, then fall back to the platform dir
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return Some(PathBuf::from(xdg_config).join(APP_DIR_NAME));
        }

        dirs::config_dir().map(|p| p.join(APP_DIR_NAME))
    }

    /// Get the full config file path
    pub fn config_file_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join(CONFIG_FILE_NAME))
    }

    /// Default data directory for credentials and counters
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR_NAME)
    }

    /// Effective data directory
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(Self::default_data_dir)
    }

    /// Lockout policy built from `max_tries`
    pub fn lockout_policy(&self) -> LockoutPolicy {
        LockoutPolicy::with_max_tries(self.max_tries)
    }

    /// Load configuration from the default location
    ///
    /// Returns default configuration if the file doesn't exist or can't be
    /// parsed.
    pub fn load() -> Self {
        match Self::config_file_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse config file: {}", e);
                Self::default()
            }),
            Err(e) => {
                tracing::warn!("Failed to read config file: {}", e);
                Self::default()
            }
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::config_file_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Save configuration to an explicit file
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| ConfigError::Io(e.to_string()))?;
        }

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;

        fs::write(path, contents).map_err(|e| ConfigError::Io(e.to_string()))?;

        tracing::debug!("Saved config to {:?}", path);
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialize(String),
}

impl From<ConfigError> for PingateError {
    fn from(e: ConfigError) -> Self {
        PingateError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = PingateConfig::default();
        assert_eq!(config.max_tries, 10);
        assert!(config.unset_pin_passes);
        assert!(config.data_dir.is_none());
        assert_eq!(config.lockout_policy(), LockoutPolicy::default());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: PingateConfig = serde_json::from_str(r#"{"max_tries": 5}"#).unwrap();
        assert_eq!(config.max_tries, 5);
        assert!(config.unset_pin_passes);
        assert_eq!(config.biometric_prompt, "Confirm your identity");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("nested").join(CONFIG_FILE_NAME);

        let config = PingateConfig {
            max_tries: 3,
            unset_pin_passes: false,
            biometric_prompt: "Unlock".to_string(),
            data_dir: Some(temp_dir.path().to_path_buf()),
        };
        config.save_to(&path).unwrap();

        let loaded = PingateConfig::load_from(&path);
        assert_eq!(loaded, config);
        assert_eq!(loaded.data_dir(), temp_dir.path());
    }

    #[test]
    fn test_unparsable_file_falls_back() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "{ broken").unwrap();

        assert_eq!(PingateConfig::load_from(&path), PingateConfig::default());
    }
}
