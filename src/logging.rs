use std::path::Path;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_rolling_file::{RollingConditionBase, RollingFileAppender};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer};

use crate::config::LoggingConfig;

/// Guard wrapper that ensures file logs are flushed on drop.
/// Must be kept alive for the duration of the program.
pub struct LogGuard(Option<WorkerGuard>);

impl Drop for LogGuard {
    fn drop(&mut self) {
        if let Some(guard) = self.0.take() {
            drop(guard);
            // Let the appender worker drain before the process exits.
            std::thread::sleep(std::time::Duration::from_millis(200));
        }
    }
}

/// Initialize console logging, plus a rolling log file when configured.
/// `verbose` forces DEBUG regardless of the configured level.
pub fn init_logging(
    config: Option<&LoggingConfig>,
    verbose: bool,
) -> Result<LogGuard, anyhow::Error> {
    let level = if verbose {
        Level::DEBUG
    } else {
        config
            .map(|c| c.level.parse::<Level>().unwrap_or(Level::INFO))
            .unwrap_or(Level::INFO)
    };

    let console = fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .with_filter(tracing_subscriber::filter::LevelFilter::from_level(level));

    let Some(config) = config else {
        tracing_subscriber::registry().with(console).init();
        return Ok(LogGuard(None));
    };

    if let Some(parent) = Path::new(&config.path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file_appender = RollingFileAppender::new(
        &config.path,
        RollingConditionBase::new().max_size(config.size * 1024 * 1024),
        config.max_files,
    )
    .map_err(|e| anyhow::anyhow!("Failed to create rolling file appender: {e}"))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(console)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(tracing_subscriber::filter::LevelFilter::from_level(level)),
        )
        .init();

    Ok(LogGuard(Some(guard)))
}
