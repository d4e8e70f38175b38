use crate::scheduler::tick::TickReport;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

/// Consumer trait defining the delivery interface invoked once per completed
/// tick
#[async_trait]
pub trait Consumer: Send + Sync + 'static {
    /// Receive one tick's result set. Runs synchronously within the tick, so
    /// it must not block indefinitely or it will delay subsequent ticks.
    async fn deliver(&self, report: &TickReport) -> Result<()>;
}

/// Implementation of Consumer for Arc<T> where T implements Consumer
#[async_trait]
impl<T: Consumer + ?Sized> Consumer for Arc<T> {
    async fn deliver(&self, report: &TickReport) -> Result<()> {
        (**self).deliver(report).await
    }
}

/// Status surface for live runs: logs a one-line summary of each tick where
/// the GUI variants showed a status label.
pub struct TableLogger;

#[async_trait]
impl Consumer for TableLogger {
    async fn deliver(&self, report: &TickReport) -> Result<()> {
        if let Some(error) = &report.error {
            warn!("No update this tick: {error}");
            return Ok(());
        }

        info!(
            "Last updated: {} ({} events in region)",
            report.generated_at.format("%Y-%m-%d %H:%M:%S"),
            report.records.len()
        );
        Ok(())
    }
}
