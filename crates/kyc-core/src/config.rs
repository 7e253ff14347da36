//! Session configuration
//!
//! Loaded from TOML; every key is optional.
//!
//! ```toml
//! storage_dir = "/var/lib/kyc-forms"
//! suggestion_capacity = 50
//! accent_color = "#105173"
//!
//! [export]
//! filename = "crypto-finance-forms.pdf"
//! settle_delay_ms = 300
//! ```

use crate::error::ConfigError;
use crate::settings::AccentColor;
use kyc_export::ExportConfig;
use kyc_storage::DEFAULT_HISTORY_CAPACITY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OnboardingConfig {
    /// Directory of the durable lists; in-memory when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<PathBuf>,
    /// Entries kept per suggestion history
    pub suggestion_capacity: usize,
    /// Initial accent color
    pub accent_color: AccentColor,
    /// Print and download settings
    pub export: ExportConfig,
}

impl Default for OnboardingConfig {
    fn default() -> Self {
        Self {
            storage_dir: None,
            suggestion_capacity: DEFAULT_HISTORY_CAPACITY,
            accent_color: AccentColor::default(),
            export: ExportConfig::default(),
        }
    }
}

impl OnboardingConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With storage directory
    #[inline]
    #[must_use]
    pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = Some(dir.into());
        self
    }

    /// Load configuration from a TOML file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed or validated
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::io_error(path, e))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string
    ///
    /// # Errors
    /// Returns an error if the TOML is invalid or a value is out of range
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML
    ///
    /// # Errors
    /// Returns an error if serialization fails
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check values are in range
    ///
    /// # Errors
    /// `ConfigError::Validation` describing the first bad value
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.suggestion_capacity == 0 {
            return Err(ConfigError::Validation(
                "suggestion_capacity must be at least 1".into(),
            ));
        }
        self.export
            .validate()
            .map_err(|e| ConfigError::Validation(e.to_string()))
    }
}
