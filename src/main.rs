//! Binary entrypoint for sharesaver.
//!
//! Delegates all logic to the library crate; no local modules here.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

/// Simple CLI
#[derive(Debug, Parser)]
#[command(
    name = "sharesaver",
    about = "Screensaver cache synchronizer for a shared image folder"
)]
struct Cli {
    /// Path to JSON config file (may be a UNC-style path)
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,

    /// Override the remote image directory from the config
    #[arg(long, value_name = "DIR")]
    remote_dir: Option<PathBuf>,

    /// Override the local cache directory from the config
    #[arg(long, value_name = "DIR")]
    cache_dir: Option<PathBuf>,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) -> Result<()> {
    // map -v to log level
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::from_default_env().add_directive(
        format!("sharesaver={level}")
            .parse()
            .context("building log filter")?,
    );
    fmt().with_env_filter(filter).with_target(true).init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    // Use the library crate only.
    let mut cfg = sharesaver::config::SyncConfig::from_json_file(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(dir) = cli.remote_dir {
        cfg.remote_dir = dir;
    }
    if let Some(dir) = cli.cache_dir {
        cfg.cache_dir = dir;
    }
    cfg.validate().context("validating configuration")?;

    let scan = sharesaver::scan::scan(&cfg.remote_dir, &cfg.allowed_extensions);
    let outcome = sharesaver::sync::reconcile(&scan, &cfg.cache_dir, &cfg.allowed_extensions);

    for skip in &outcome.skipped {
        info!(name = %skip.name, action = ?skip.action, reason = %skip.reason, "skipped during pass");
    }
    if outcome.images.is_empty() {
        info!("no images from share or cache; session would show a blank screen");
    }
    for path in &outcome.images {
        println!("{}", path.display());
    }
    Ok(())
}
