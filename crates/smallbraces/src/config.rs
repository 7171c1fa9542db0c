// ABOUTME: Configuration loading from smallbraces.toml in the user's config directory
// ABOUTME: Missing files fall back to defaults; invalid values are logged and sanitized

use anyhow::{Context, Result};
use smallbraces_types::SmallBracesConfig;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "smallbraces.toml";

/// Directory holding smallbraces.toml, `<config_dir>/smallbraces`
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("smallbraces")
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub fisheye: SmallBracesConfig,

    /// File the configuration was read from, None when defaults are in use
    pub source: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the standard location
    pub fn load() -> Result<Self> {
        Self::load_from_dir(&config_dir())
    }

    /// Load configuration from a specific directory
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);

        smallbraces_logging::info!(
            config_dir = %dir.display(),
            config_path = %path.display(),
            config_exists = path.exists(),
            "Loading configuration"
        );

        if !path.exists() {
            smallbraces_logging::info!("No configuration file found, using defaults");
            return Ok(Self::default());
        }

        Self::load_from_file(&path)
    }

    /// Load configuration from an explicit file, which must exist
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let fisheye: SmallBracesConfig = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Ok(Self {
            fisheye: validated(fisheye, path),
            source: Some(path.to_path_buf()),
        })
    }
}

fn validated(config: SmallBracesConfig, path: &Path) -> SmallBracesConfig {
    match config.validate() {
        Ok(()) => {
            smallbraces_logging::info!(
                render_mode = ?config.render_mode,
                max_classifiable_length = config.classifier.max_classifiable_length,
                cruft_entries = config.classifier.cruft.len(),
                punctuation = %config.classifier.punctuation,
                "Configuration validation passed"
            );
            config
        }
        Err(validation_error) => {
            smallbraces_logging::warn!(
                config_path = %path.display(),
                error = %validation_error,
                "Invalid configuration - using sanitized values"
            );
            config.sanitized()
        }
    }
}
