//! Engine timing loaded from TOML.
//!
//! ```toml
//! sample_rate = 44100
//! block_period_ms = 50
//! hold_ms = 500
//! ```
//!
//! Every field is optional and falls back to the hardware defaults.

use std::path::{Path, PathBuf};

use knobsynth_core::{BLOCK_PERIOD_MS, EngineConfig, HOLD_MS, SAMPLE_RATE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest accepted block period in milliseconds.
pub const MAX_BLOCK_PERIOD_MS: u32 = 1000;

/// Errors raised while loading a [`SynthConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A field is out of range
    #[error("invalid value for '{field}': {reason}")]
    Invalid {
        /// Offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

/// Timing settings for a rendering session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SynthConfig {
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Block period in milliseconds.
    pub block_period_ms: u32,
    /// Voice hold duration in milliseconds.
    pub hold_ms: u32,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            block_period_ms: BLOCK_PERIOD_MS,
            hold_ms: HOLD_MS,
        }
    }
}

impl SynthConfig {
    /// Loads and validates a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parses and validates a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: SynthConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every field against its accepted range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_rate == 0 {
            return Err(ConfigError::Invalid {
                field: "sample_rate",
                reason: "must be positive".to_string(),
            });
        }
        if !(1..=MAX_BLOCK_PERIOD_MS).contains(&self.block_period_ms) {
            return Err(ConfigError::Invalid {
                field: "block_period_ms",
                reason: format!(
                    "{} is outside 1..={MAX_BLOCK_PERIOD_MS}",
                    self.block_period_ms
                ),
            });
        }
        Ok(())
    }

    /// The engine-facing form of these settings.
    pub fn engine(&self) -> EngineConfig {
        EngineConfig {
            sample_rate: self.sample_rate,
            block_period_ms: self.block_period_ms,
            hold_ms: self.hold_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = SynthConfig::from_toml("").unwrap();
        assert_eq!(config, SynthConfig::default());
        assert_eq!(config.engine(), EngineConfig::default());
    }

    #[test]
    fn partial_override() {
        let config = SynthConfig::from_toml("hold_ms = 250\nblock_period_ms = 20").unwrap();
        assert_eq!(config.hold_ms, 250);
        assert_eq!(config.block_period_ms, 20);
        assert_eq!(config.sample_rate, 44_100);
        assert_eq!(config.engine().block_bytes(), 1764);
    }

    #[test]
    fn rejects_zero_sample_rate() {
        let err = SynthConfig::from_toml("sample_rate = 0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "sample_rate",
                ..
            }
        ));
    }

    #[test]
    fn rejects_period_out_of_range() {
        for period in [0, 1001] {
            let err = SynthConfig::from_toml(&format!("block_period_ms = {period}")).unwrap_err();
            assert!(err.to_string().contains("block_period_ms"), "{err}");
        }
        assert!(SynthConfig::from_toml("block_period_ms = 1000").is_ok());
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = SynthConfig::from_toml("voices = 8").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = SynthConfig::load("/nonexistent/knobsynth.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/knobsynth.toml"));
    }
}
