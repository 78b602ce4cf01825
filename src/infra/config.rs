//! Configuration management infrastructure.
//!
//! Persists the few settings the CLIs need between runs: which reader to
//! open, which PIV slot holds the signing key and where to find the PIN.

use crate::domain::constants::{DEFAULT_PIN_ENV, DEFAULT_READER_FILTER, DEFAULT_SLOT};
use crate::domain::types::PivSlot;
use crate::infra::error::{SignerError, SignerResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Persisted signer settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignerSettings {
    /// Case-insensitive substring a reader name must contain
    pub reader_filter: String,

    /// PIV slot holding the signing certificate and key (hex, e.g. "9c")
    pub slot: String,

    /// Environment variable consulted for the PIN
    pub pin_env: String,
}

impl Default for SignerSettings {
    fn default() -> Self {
        Self {
            reader_filter: DEFAULT_READER_FILTER.to_string(),
            slot: DEFAULT_SLOT.to_string(),
            pin_env: DEFAULT_PIN_ENV.to_string(),
        }
    }
}

impl SignerSettings {
    /// Parsed PIV slot
    pub fn piv_slot(&self) -> SignerResult<PivSlot> {
        self.slot.parse::<PivSlot>().map_err(|e| {
            SignerError::ConfigurationError(format!("Invalid slot '{}': {e}", self.slot))
        })
    }

    /// PIN taken from the configured environment variable, if set
    #[must_use]
    pub fn pin_from_env(&self) -> Option<String> {
        std::env::var(&self.pin_env).ok().filter(|p| !p.is_empty())
    }

    fn validate(&self) -> SignerResult<()> {
        if self.reader_filter.trim().is_empty() {
            return Err(SignerError::ConfigurationError(
                "reader_filter must not be empty".to_string(),
            ));
        }
        self.piv_slot()?;
        Ok(())
    }
}

/// Configuration manager for handling the settings file
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a configuration manager using the default path
    #[must_use]
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a configuration manager with custom path
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            config_path: path.as_ref().to_path_buf(),
        }
    }

    /// Default settings file location
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("yubikey-jwt").join("config.toml")
        } else {
            PathBuf::from("yubikey-jwt.toml")
        }
    }

    /// Get the configuration file path
    #[must_use]
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load settings, falling back to defaults when no file exists
    pub fn load_or_default(&self) -> SignerResult<SignerSettings> {
        if self.config_path.exists() {
            self.load()
        } else {
            log::debug!(
                "No configuration at {}, using defaults",
                self.config_path.display()
            );
            Ok(SignerSettings::default())
        }
    }

    /// Load settings from file
    pub fn load(&self) -> SignerResult<SignerSettings> {
        log::info!("Loading configuration from: {}", self.config_path.display());

        let content = fs::read_to_string(&self.config_path).map_err(|e| {
            SignerError::ConfigurationError(format!(
                "Failed to read config file {}: {}",
                self.config_path.display(),
                e
            ))
        })?;

        let settings: SignerSettings = toml::from_str(&content).map_err(|e| {
            SignerError::ConfigurationError(format!("Failed to parse config file: {e}"))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to file
    pub fn save(&self, settings: &SignerSettings) -> SignerResult<()> {
        settings.validate()?;

        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SignerError::ConfigurationError(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = toml::to_string_pretty(settings).map_err(|e| {
            SignerError::ConfigurationError(format!("Failed to serialize config: {e}"))
        })?;

        fs::write(&self.config_path, content).map_err(|e| {
            SignerError::ConfigurationError(format!(
                "Failed to write config file {}: {}",
                self.config_path.display(),
                e
            ))
        })?;

        log::info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
