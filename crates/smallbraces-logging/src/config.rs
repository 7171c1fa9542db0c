// ABOUTME: Configuration structures and environment variable parsing for logging
// ABOUTME: Hosts get file-only output by default, command line tools log to stderr

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use tracing::Level;

/// `tracing::Level` that (de)serializes as a lowercase level name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLevel(pub Level);

impl Serialize for LogLevel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.as_str().to_ascii_lowercase())
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        parse_log_level(&name)
            .map(LogLevel)
            .map_err(serde::de::Error::custom)
    }
}

impl From<Level> for LogLevel {
    fn from(level: Level) -> Self {
        LogLevel(level)
    }
}

impl From<LogLevel> for Level {
    fn from(log_level: LogLevel) -> Self {
        log_level.0
    }
}

/// Main configuration structure for the logging system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Global log level (trace, debug, info, warn, error)
    pub level: LogLevel,

    /// Per-module log level overrides
    #[serde(default)]
    pub module_levels: HashMap<String, LogLevel>,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// File logging configuration
    #[serde(default)]
    pub file: FileConfig,
}

/// Configuration for different output targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Enable console output
    pub console: bool,

    /// Enable file output
    pub file: bool,

    /// Enable JSON structured output
    pub json: bool,

    /// Pretty-print console output (vs compact)
    pub pretty_console: bool,
}

/// Configuration for file logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    /// Path to log file (defaults to ~/.config/smallbraces/smallbraces.log)
    pub path: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel(Level::INFO),
            module_levels: HashMap::new(),
            output: OutputConfig::default(),
            file: FileConfig::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        // Hosts own stdout; the add-on writes to its log file unless asked otherwise
        Self {
            console: false,
            file: true,
            json: false,
            pretty_console: false,
        }
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            path: default_log_file_path(),
        }
    }
}

impl LoggingConfig {
    /// Create a new configuration with environment variable overrides.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Configuration for command line tools: console only, compact.
    pub fn console_only(level: Level) -> Self {
        Self {
            level: LogLevel(level),
            output: OutputConfig {
                console: true,
                file: false,
                json: false,
                pretty_console: false,
            },
            ..Default::default()
        }
    }

    /// Apply environment variable overrides to this configuration.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        // SMALLBRACES_LOG wins over RUST_LOG
        if let Ok(name) = env::var("SMALLBRACES_LOG") {
            self.level = parse_log_level(&name)
                .context("Invalid SMALLBRACES_LOG level")?
                .into();
        } else if let Ok(directives) = env::var("RUST_LOG") {
            self.parse_rust_log(&directives)?;
        }

        if env::var("SMALLBRACES_LOG_JSON").is_ok() {
            self.output.json = true;
        }

        if env::var("SMALLBRACES_LOG_NO_CONSOLE").is_ok() {
            self.output.console = false;
        }

        if env::var("SMALLBRACES_LOG_NO_FILE").is_ok() {
            self.output.file = false;
        }

        Ok(())
    }

    /// Apply `RUST_LOG` style directives: a bare level sets the global level,
    /// `crate=level` adds a per-crate override.
    fn parse_rust_log(&mut self, directives: &str) -> Result<()> {
        let directives = directives.split(',').map(str::trim).filter(|d| !d.is_empty());

        for directive in directives {
            match directive.split_once('=') {
                Some((target, name)) => {
                    let level = parse_log_level(name)
                        .with_context(|| format!("Invalid level for '{target}'"))?;
                    self.module_levels.insert(target.to_string(), level.into());
                }
                None => {
                    self.level = parse_log_level(directive)
                        .context("Invalid global log level")?
                        .into();
                }
            }
        }
        Ok(())
    }
}

/// `<config_dir>/smallbraces/smallbraces.log`, next to smallbraces.toml
fn default_log_file_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("smallbraces"))
        .unwrap_or_default()
        .join("smallbraces.log")
}

/// Parse a level name, case-insensitive; `warning` is accepted for `warn`
pub(crate) fn parse_log_level(name: &str) -> Result<Level> {
    let name = name.trim();
    if name.eq_ignore_ascii_case("warning") {
        return Ok(Level::WARN);
    }
    if name.is_empty() || name.chars().any(|c| c.is_ascii_digit()) {
        anyhow::bail!("Invalid log level: '{name}'");
    }
    name.parse::<Level>().map_err(|_| {
        anyhow::anyhow!("Invalid log level: '{name}'. Must be one of: trace, debug, info, warn, error")
    })
}
