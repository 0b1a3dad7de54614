//! # Configuration Management
//!
//! This module handles loading the host settings from `watchface.toml`. The
//! watchface itself has no settings UI; the file only describes the display
//! the face is drawn on and how the host tick service is driven.
//!
//! A missing or malformed file is not an error: the defaults describe the
//! stock 144x168 display with a once-per-minute tick.

use crate::geometry::Canvas;
use crate::host::TickUnit;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "watchface.toml";

/// Smallest display width the dial layout supports.
const MIN_WIDTH: u32 = 96;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The dial would not fit on the configured display
    #[error("display {width}x{height} cannot hold the dial")]
    InvalidDisplay { width: u32, height: u32 },
}

/// Application configuration loaded from watchface.toml
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Display geometry
    #[serde(default)]
    pub display: DisplayConfig,
    /// Tick service configuration
    #[serde(default)]
    pub timer: TimerConfig,
}

/// Display geometry
#[derive(Debug, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// Display width in pixels
    pub width: u32,
    /// Display height in pixels
    pub height: u32,
}

/// Tick service configuration
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TimerConfig {
    /// `minute` for normal use, `second` to watch the hand sweep
    #[serde(default)]
    pub unit: TickUnit,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        let canvas = Canvas::default();
        DisplayConfig {
            width: canvas.width,
            height: canvas.height,
        }
    }
}

impl Config {
    /// Load configuration from watchface.toml
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_FILE)
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    log::info!(
                        "Loaded configuration from {} ({}x{}, {:?} ticks)",
                        path.display(),
                        config.display.width,
                        config.display.height,
                        config.timer.unit
                    );
                    config
                }
                Err(e) => {
                    log::warn!("Invalid config file format in {}: {}", path.display(), e);
                    log::warn!("Using default configuration");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No config file at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.display.width, self.display.height)
    }

    /// Check that the dial fits the configured display.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let canvas = self.canvas();
        if canvas.width < MIN_WIDTH || !canvas.ring_fits_vertically() {
            return Err(ConfigError::InvalidDisplay {
                width: canvas.width,
                height: canvas.height,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.display.width, 144);
        assert_eq!(config.display.height, 168);
        assert_eq!(config.timer.unit, TickUnit::Minute);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.display.width, parsed.display.width);
        assert_eq!(config.timer.unit, parsed.timer.unit);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let config = Config::load_from_path("/nonexistent/path");
        // Should fallback to default
        assert_eq!(config.display.width, 144);
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[timer]\nunit = \"second\"").unwrap();

        let config = Config::load_from_path(file.path());
        assert_eq!(config.timer.unit, TickUnit::Second);
        assert_eq!(config.display.height, 168);
    }

    #[test]
    fn test_load_invalid_file_falls_back() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[display]\nwidth = \"wide\"").unwrap();

        let config = Config::load_from_path(file.path());
        assert_eq!(config.display.width, 144);
    }

    #[test]
    fn test_validate_rejects_small_or_square_display() {
        let mut config = Config::default();
        config.display.width = 64;
        config.display.height = 80;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidDisplay {
                width: 64,
                height: 80
            })
        );

        // Ring would run off the top and bottom
        config.display.width = 144;
        config.display.height = 144;
        assert!(config.validate().is_err());
    }
}
