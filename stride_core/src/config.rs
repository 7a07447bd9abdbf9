//! Configuration file support for Stride.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/stride/config.toml`.

use crate::metrics::Tuning;
use crate::parser::{FieldOrder, RecordParser};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub tuning: Tuning,

    #[serde(default)]
    pub parser: ParserConfig,

    #[serde(default)]
    pub body: BodyConfig,
}

/// Record parsing configuration
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ParserConfig {
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    #[serde(default)]
    pub field_order: FieldOrder,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            field_order: FieldOrder::default(),
        }
    }
}

impl ParserConfig {
    /// Build the record parser these settings describe
    pub fn record_parser(&self) -> Result<RecordParser> {
        self.validate()?;
        let delimiter = u8::try_from(self.delimiter)
            .map_err(|_| Error::Config(format!("delimiter {:?} is not ASCII", self.delimiter)))?;
        Ok(RecordParser::new(delimiter, self.field_order))
    }

    fn validate(&self) -> Result<()> {
        let c = self.delimiter;
        if !c.is_ascii()
            || c.is_ascii_alphanumeric()
            || matches!(c, '"' | '.' | '-' | '+' | '\n' | '\r')
        {
            return Err(Error::Config(format!(
                "delimiter {:?} cannot separate record fields",
                c
            )));
        }
        Ok(())
    }
}

/// Default body measurements used when the CLI is not given any
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BodyConfig {
    #[serde(default = "default_weight_kg")]
    pub weight_kg: f64,

    #[serde(default = "default_height_m")]
    pub height_m: f64,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            weight_kg: default_weight_kg(),
            height_m: default_height_m(),
        }
    }
}

// Default value functions
fn default_delimiter() -> char {
    ','
}

fn default_weight_kg() -> f64 {
    70.0
}

fn default_height_m() -> f64 {
    1.75
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load and validate configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| match std::env::var_os("HOME") {
            Some(home) => PathBuf::from(home).join(".config"),
            None => PathBuf::from(".config"),
        });
        base.join("stride").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Check tuning constants, parser settings and body defaults
    pub fn validate(&self) -> Result<()> {
        self.tuning.validate()?;
        self.parser.validate()?;
        for (name, value) in [
            ("body.weight_kg", self.body.weight_kg),
            ("body.height_m", self.body.height_m),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::Config(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
