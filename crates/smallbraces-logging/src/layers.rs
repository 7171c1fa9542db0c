// ABOUTME: Layer constructors for the console, rolling file and JSON outputs
// ABOUTME: Each returns None when its output is disabled in the configuration

use anyhow::{Context, Result};
use std::fs;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

use crate::config::{FileConfig, LoggingConfig, OutputConfig};

pub type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Create a console output layer on stderr.
pub fn create_console_layer(config: &OutputConfig) -> Option<BoxedLayer> {
    if !config.console {
        return None;
    }

    let layer = if config.pretty_console {
        fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr)
            .pretty()
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr)
            .compact()
            .boxed()
    };

    Some(layer)
}

/// Create a file output layer with daily rotation.
pub fn create_file_layer(config: &FileConfig) -> Result<BoxedLayer> {
    let directory = config
        .path
        .parent()
        .context("Log file path has no parent directory")?;

    fs::create_dir_all(directory).context(format!(
        "Failed to create log directory: {}",
        directory.display()
    ))?;

    let file_name = config
        .path
        .file_name()
        .and_then(|n| n.to_str())
        .context("Invalid log file path")?;

    let file_appender = rolling::daily(directory, file_name);
    let (non_blocking_writer, guard) = non_blocking(file_appender);

    // The writer must outlive every view; hosts never tear the add-on down cleanly.
    std::mem::forget(guard);

    let layer = fmt::layer()
        .with_writer(non_blocking_writer)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .boxed();

    Ok(layer)
}

/// Create a JSON output layer for structured logging.
pub fn create_json_layer(config: &OutputConfig) -> Option<BoxedLayer> {
    if !config.json {
        return None;
    }

    let layer = fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .boxed();

    Some(layer)
}

/// Create an environment filter from the logging configuration.
pub fn create_env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    let mut filter = EnvFilter::new(format!("{}", config.level.0));

    for (module, level) in &config.module_levels {
        filter = filter.add_directive(format!("{}={}", module, level.0).parse()?);
    }

    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;
    use tempfile::tempdir;
    use tracing::Level;

    #[test]
    fn test_create_console_layer() {
        let config = OutputConfig {
            console: true,
            ..Default::default()
        };
        assert!(create_console_layer(&config).is_some());

        let config = OutputConfig {
            console: false,
            ..Default::default()
        };
        assert!(create_console_layer(&config).is_none());
    }

    #[test]
    fn test_create_json_layer() {
        let config = OutputConfig {
            json: true,
            ..Default::default()
        };
        assert!(create_json_layer(&config).is_some());
        assert!(create_json_layer(&OutputConfig::default()).is_none());
    }

    #[test]
    fn test_create_file_layer_creates_directory() {
        let temp_dir = tempdir().unwrap();
        let log_path = temp_dir.path().join("nested").join("test.log");

        let result = create_file_layer(&FileConfig { path: log_path });
        assert!(result.is_ok());
        assert!(temp_dir.path().join("nested").is_dir());
    }

    #[test]
    fn test_create_env_filter() {
        let mut config = LoggingConfig {
            level: LogLevel(Level::DEBUG),
            ..Default::default()
        };
        config
            .module_levels
            .insert("smallbraces_core".to_string(), LogLevel(Level::TRACE));

        assert!(create_env_filter(&config).is_ok());
    }
}
