//! Runtime configuration
//!
//! Timings and limits used by the simulated upload, processing and sign-in
//! flows. Every field has a default, so a config file only needs the values
//! it overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Largest accepted upload (10 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Interval between simulated upload progress ticks
pub const DEFAULT_UPLOAD_TICK: Duration = Duration::from_millis(300);

/// Pause between reaching 100% and leaving the upload screen
pub const DEFAULT_UPLOAD_SETTLE: Duration = Duration::from_millis(500);

/// Simulated transformation time
pub const DEFAULT_PROCESSING_DELAY: Duration = Duration::from_millis(3000);

/// Simulated sign-in time
pub const DEFAULT_SIGN_IN_DELAY: Duration = Duration::from_millis(1000);

/// Upper bound (exclusive) of a single progress increment, in percent
pub const DEFAULT_MAX_PROGRESS_INCREMENT: f64 = 10.0;

/// Link attached to shared images
pub const DEFAULT_SHARE_URL: &str = "https://example.com/shared-image";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid JSON
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A value is out of range
    #[error("Invalid config value for {field}: {reason}")]
    Invalid {
        /// Offending field
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// Progress tick interval in milliseconds
    pub upload_tick_ms: u64,
    /// Delay after progress reaches 100, in milliseconds
    pub upload_settle_ms: u64,
    /// Maximum accepted file size in bytes
    pub max_upload_bytes: u64,
    /// Exclusive upper bound of one progress increment
    pub max_progress_increment: f64,
    /// Simulated processing time in milliseconds
    pub processing_delay_ms: u64,
    /// Simulated sign-in time in milliseconds
    pub sign_in_delay_ms: u64,
    /// URL attached to shared images
    pub share_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            upload_tick_ms: DEFAULT_UPLOAD_TICK.as_millis() as u64,
            upload_settle_ms: DEFAULT_UPLOAD_SETTLE.as_millis() as u64,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            max_progress_increment: DEFAULT_MAX_PROGRESS_INCREMENT,
            processing_delay_ms: DEFAULT_PROCESSING_DELAY.as_millis() as u64,
            sign_in_delay_ms: DEFAULT_SIGN_IN_DELAY.as_millis() as u64,
            share_url: DEFAULT_SHARE_URL.to_string(),
        }
    }
}

impl AppConfig {
    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&contents)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Check that every value is usable
    pub fn validate(&self) -> Result<()> {
        if self.upload_tick_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "uploadTickMs",
                reason: "must be greater than zero".to_string(),
            });
        }

        if !self.max_progress_increment.is_finite() || self.max_progress_increment <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "maxProgressIncrement",
                reason: format!("must be a positive number, got {}", self.max_progress_increment),
            });
        }

        if self.share_url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "shareUrl",
                reason: "must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Progress tick interval
    pub fn upload_tick(&self) -> Duration {
        Duration::from_millis(self.upload_tick_ms)
    }

    /// Delay between 100% and navigating to the editor
    pub fn upload_settle(&self) -> Duration {
        Duration::from_millis(self.upload_settle_ms)
    }

    /// Simulated processing time
    pub fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.processing_delay_ms)
    }

    /// Simulated sign-in time
    pub fn sign_in_delay(&self) -> Duration {
        Duration::from_millis(self.sign_in_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_reference_timings() {
        let config = AppConfig::default();
        assert_eq!(config.upload_tick(), Duration::from_millis(300));
        assert_eq!(config.upload_settle(), Duration::from_millis(500));
        assert_eq!(config.processing_delay(), Duration::from_millis(3000));
        assert_eq!(config.sign_in_delay(), Duration::from_millis(1000));
        assert_eq!(config.max_upload_bytes, 10_485_760);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = AppConfig::from_json_str(r#"{"processingDelayMs": 50}"#).unwrap();
        assert_eq!(config.processing_delay(), Duration::from_millis(50));
        assert_eq!(config.upload_tick(), DEFAULT_UPLOAD_TICK);
        assert_eq!(config.share_url, DEFAULT_SHARE_URL);
    }

    #[test]
    fn test_zero_tick_rejected() {
        let err = AppConfig::from_json_str(r#"{"uploadTickMs": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "uploadTickMs", .. }));
    }

    #[test]
    fn test_non_positive_increment_rejected() {
        let err = AppConfig::from_json_str(r#"{"maxProgressIncrement": 0.0}"#).unwrap_err();
        assert!(err.to_string().contains("maxProgressIncrement"));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = AppConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"signInDelayMs": 250, "shareUrl": "https://imagify.test/s"}}"#).unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.sign_in_delay(), Duration::from_millis(250));
        assert_eq!(config.share_url, "https://imagify.test/s");
    }

    #[test]
    fn test_load_missing_file() {
        let err = AppConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
