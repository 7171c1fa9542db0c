// ABOUTME: Preview binary printing how each line of a file would be compressed
// ABOUTME: Loads configuration and logging the same way a host integration does

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use smallbraces::Config;
use smallbraces::preview::{preview, render_table};
use smallbraces_logging::{Level, LoggingConfig, info};
use smallbraces_types::RenderMode;
use std::path::PathBuf;

/// Show the fisheye line heights SmallBraces would apply to a file
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// File to preview
    file: PathBuf,

    /// Place the caret on this 1-based line
    #[arg(short, long)]
    caret: Option<usize>,

    /// Read configuration from this file instead of the config directory
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Override the configured render mode
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Increase logging verbosity, up to three times
    #[arg(short, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Native,
    Overlay,
}

impl From<ModeArg> for RenderMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Native => RenderMode::Native,
            ModeArg::Overlay => RenderMode::Overlay,
        }
    }
}

fn setup_logging(verbosity: u8) -> Result<()> {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _3_or_more => Level::TRACE,
    };

    // Report goes to stdout, so logs stay on stderr
    let mut config = LoggingConfig::console_only(level);
    config
        .apply_env_overrides()
        .context("Failed to apply logging overrides from environment")?;

    smallbraces_logging::init_logging_with_config(config)
        .context("Failed to initialize smallbraces logging")?;

    info!("SmallBraces logging system initialized");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    let mut config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load()?,
    };
    if let Some(mode) = cli.mode {
        config.fisheye.render_mode = mode.into();
    }

    let text = std::fs::read_to_string(&cli.file)
        .with_context(|| format!("Failed to read {}", cli.file.display()))?;

    let reports = preview(&config.fisheye, &text, cli.caret)?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&reports).context("Failed to serialize report")?
        );
    } else {
        println!("{}", render_table(&reports));
    }

    Ok(())
}
