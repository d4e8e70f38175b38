use crate::pipeline::record::EventRecord;
use crate::scheduler::consumer::Consumer;
use crate::scheduler::tick::TickReport;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::time::Instant;

/// Summary of one delivered report, kept by [`CapturingConsumer`].
#[derive(Debug, Clone)]
pub struct CapturedReport {
    pub delivered_at: Instant,
    pub records: Vec<EventRecord>,
    pub error: Option<String>,
}

/// `CapturingConsumer` is an in-memory implementation of the `Consumer`
/// trait for testing purposes. It records every delivered report and can
/// simulate delivery failures.
#[derive(Clone, Default)]
pub struct CapturingConsumer {
    reports: Arc<Mutex<Vec<CapturedReport>>>,
    fail_delivery: Arc<Mutex<bool>>,
}

impl CapturingConsumer {
    /// Create a new empty CapturingConsumer instance
    pub fn new() -> Self {
        CapturingConsumer::default()
    }

    /// Reports delivered so far, in delivery order
    pub fn reports(&self) -> Vec<CapturedReport> {
        self.reports.lock().unwrap().clone()
    }

    /// Number of deliveries so far
    pub fn delivery_count(&self) -> usize {
        self.reports.lock().unwrap().len()
    }

    /// Make every subsequent delivery fail after recording its report
    pub fn fake_delivery_failure(&self) {
        *self.fail_delivery.lock().unwrap() = true;
    }
}

#[async_trait]
impl Consumer for CapturingConsumer {
    async fn deliver(&self, report: &TickReport) -> Result<()> {
        let captured = CapturedReport {
            delivered_at: Instant::now(),
            records: report.records.clone(),
            error: report.error.as_ref().map(|e| e.to_string()),
        };
        self.reports.lock().unwrap().push(captured);

        if *self.fail_delivery.lock().unwrap() {
            anyhow::bail!("Simulated delivery failure");
        }
        Ok(())
    }
}
