//! Configuration file support
//!
//! Settings are layered: built-in defaults, then a TOML file, then explicit
//! command-line values.
//!
//! ```toml
//! threshold = 235
//! black = false
//! suffix = "_cropped"
//! output_dir_name = "cropped"
//! ```
//!
//! Lookup order when no file is given on the command line:
//! `./bordercrop.toml`, then `<config dir>/bordercrop/config.toml`.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::batch::DEFAULT_OUTPUT_DIR_NAME;
use crate::border::{BorderMode, CropOptions, DEFAULT_SUFFIX, DEFAULT_THRESHOLD};

/// Config file name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "bordercrop.toml";

/// Application directory under the user config dir
const APP_CONFIG_DIR: &str = "bordercrop";

/// Config file name inside the user config dir
const USER_CONFIG_FILE: &str = "config.toml";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// File-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Brightness threshold (0-255)
    pub threshold: u16,
    /// Remove black borders instead of white ones
    pub black: bool,
    /// Suffix for derived output names
    pub suffix: String,
    /// Output folder name used in batch mode when none is given
    pub output_dir_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD as u16,
            black: false,
            suffix: DEFAULT_SUFFIX.to_string(),
            output_dir_name: DEFAULT_OUTPUT_DIR_NAME.to_string(),
        }
    }
}

impl Config {
    /// Load from the first config file found, or defaults if there is none.
    ///
    /// A file that exists but cannot be used is reported and skipped.
    pub fn load() -> Self {
        for path in Self::search_paths() {
            if !path.is_file() {
                continue;
            }
            match Self::load_from_path(&path) {
                Ok(config) => {
                    debug!("Loaded config from {}", path.display());
                    return config;
                }
                Err(e) => warn!("Ignoring config file {}: {}", path.display(), e),
            }
        }
        Self::default()
    }

    /// Load and validate a specific config file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Candidate config file locations, in priority order
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join(APP_CONFIG_DIR).join(USER_CONFIG_FILE));
        }
        paths
    }

    fn validate(&self) -> Result<()> {
        if self.threshold > u8::MAX as u16 {
            return Err(ConfigError::InvalidValue(format!(
                "threshold must be between 0 and 255, got {}",
                self.threshold
            )));
        }
        if self.output_dir_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "output_dir_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Merge with command-line values (command line wins)
    pub fn merge_with_cli(&self, overrides: &CliOverrides) -> CropOptions {
        let threshold = overrides
            .threshold
            .unwrap_or_else(|| self.threshold.min(u8::MAX as u16) as u8);
        let black = overrides.black.unwrap_or(self.black);
        let suffix = overrides
            .suffix
            .clone()
            .unwrap_or_else(|| self.suffix.clone());

        CropOptions::builder()
            .threshold(threshold)
            .mode(BorderMode::from_black_flag(black))
            .suffix(suffix)
            .build()
    }
}

/// Values explicitly given on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub threshold: Option<u8>,
    pub black: Option<bool>,
    pub suffix: Option<String>,
}

impl CliOverrides {
    /// Create empty overrides
    pub fn new() -> Self {
        Self::default()
    }
}
