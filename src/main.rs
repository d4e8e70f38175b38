use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use tracing::{error, info};

mod catalog;
mod config;
mod export;
mod logging;
mod pipeline;
mod scheduler;
#[cfg(test)]
mod test_utils;

use crate::catalog::UsgsCatalog;
use crate::export::CsvExporter;
use crate::scheduler::consumer::TableLogger;
use crate::scheduler::Scheduler;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config.toml",
        global = true
    )]
    config: String,

    /// Show verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Watch the catalog on a fixed interval, logging each update
    Watch {
        /// Seconds between ticks (overrides the configured interval)
        #[arg(long)]
        interval: Option<u64>,
    },
    /// Fetch once and write the result set to a CSV file
    Export {
        /// Directory for the generated file (overrides the configured one)
        #[arg(long, value_name = "DIR")]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match config::load_config(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration from {}: {e}", cli.config);
            process::exit(1);
        }
    };

    let _log_guard = logging::init_logging(config.logging.as_ref(), cli.verbose)?;

    info!("quakewatch v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration loaded from: {}", cli.config);

    match cli.command {
        Commands::Watch { interval } => run_watch(config, interval).await,
        Commands::Export { output } => run_export(config, output).await,
    }
}

/// Live mode: tick until interrupted, reporting each update to the log.
async fn run_watch(config: config::Config, interval_override: Option<u64>) -> Result<()> {
    let interval_seconds = interval_override.unwrap_or(config.scheduler.interval_seconds);

    let catalog =
        UsgsCatalog::new(&config.catalog).context("Failed to initialize catalog client")?;

    let scheduler = Scheduler::new(
        catalog,
        TableLogger,
        config.query,
        config.region,
        Duration::from_secs(interval_seconds),
    );

    scheduler.start().await;
    info!("Fetching started. Updates every {interval_seconds} seconds. Press Ctrl-C to stop.");

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;

    info!("Shutting down");
    scheduler.stop().await;

    Ok(())
}

/// Batch mode: run exactly one tick and write its result set to a CSV file.
async fn run_export(config: config::Config, output_override: Option<PathBuf>) -> Result<()> {
    let output_dir = output_override.unwrap_or(config.export.output_dir);

    let catalog =
        UsgsCatalog::new(&config.catalog).context("Failed to initialize catalog client")?;

    let scheduler = Scheduler::new(
        catalog,
        CsvExporter::new(output_dir),
        config.query,
        config.region,
        Duration::from_secs(config.scheduler.interval_seconds),
    );

    let report = scheduler.run_once().await?;
    if let Some(e) = report.error {
        error!("Export failed: {e}");
        process::exit(1);
    }

    Ok(())
}
