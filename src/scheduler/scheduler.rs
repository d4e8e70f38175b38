use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{error, info, warn};

use crate::catalog::source::EventSource;
use crate::config::QueryConfig;
use crate::pipeline::region::BoundingBox;
use crate::scheduler::consumer::Consumer;
use crate::scheduler::tick::{run_tick, TickReport};

enum State {
    Idle,
    Running {
        shutdown: watch::Sender<bool>,
        ticker: JoinHandle<()>,
    },
}

/// Drives the fetch -> normalize -> deliver pipeline on a fixed interval.
///
/// Ticks run to completion on a single background task, so two ticks of the
/// same scheduler never overlap: a tick that outlasts the interval defers the
/// next one instead of racing it. The first tick fires after one full
/// interval, not immediately.
pub struct Scheduler<S: EventSource, C: Consumer> {
    source: Arc<S>,
    consumer: Arc<C>,
    query: QueryConfig,
    region: BoundingBox,
    interval: Duration,
    state: Mutex<State>,
}

impl<S: EventSource, C: Consumer> Scheduler<S, C> {
    pub fn new(
        source: S,
        consumer: C,
        query: QueryConfig,
        region: BoundingBox,
        interval: Duration,
    ) -> Self {
        Scheduler {
            source: Arc::new(source),
            consumer: Arc::new(consumer),
            query,
            region,
            interval,
            state: Mutex::new(State::Idle),
        }
    }

    /// Begin ticking. Does nothing if the scheduler is already running.
    pub async fn start(&self) {
        let mut state = self.state.lock().await;
        if let State::Running { .. } = *state {
            warn!("Scheduler already running, ignoring start");
            return;
        }

        let (shutdown, mut shutdown_rx) = watch::channel(false);
        let source = Arc::clone(&self.source);
        let consumer = Arc::clone(&self.consumer);
        let query = self.query.clone();
        let region = self.region;
        let interval = self.interval;

        let ticker = tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let report = run_tick(source.as_ref(), &query, &region).await;
                        if let Err(e) = consumer.deliver(&report).await {
                            error!("Consumer rejected tick report: {e:#}");
                        }
                    }
                    _ = shutdown_rx.changed() => break,
                }
            }
        });

        info!("Scheduler started with {}s interval", interval.as_secs());
        *state = State::Running { shutdown, ticker };
    }

    /// Cancel future ticks and return to idle. A tick already in progress
    /// completes and still delivers its report; the in-flight request itself
    /// is not interrupted.
    pub async fn stop(&self) {
        let mut state = self.state.lock().await;
        match std::mem::replace(&mut *state, State::Idle) {
            State::Idle => {
                warn!("Scheduler not running, ignoring stop");
            }
            State::Running { shutdown, ticker } => {
                // The ticker task only observes the signal between ticks.
                let _ = shutdown.send(true);
                if let Err(e) = ticker.await {
                    error!("Ticker task failed: {e}");
                }
                info!("Scheduler stopped");
            }
        }
    }

    pub async fn is_running(&self) -> bool {
        matches!(*self.state.lock().await, State::Running { .. })
    }

    /// Run exactly one tick and return its report, without touching the
    /// interval machinery. Unlike the ticker loop, a consumer failure here is
    /// surfaced to the caller: a batch run has nowhere else to report it.
    pub async fn run_once(&self) -> Result<TickReport> {
        let report = run_tick(self.source.as_ref(), &self.query, &self.region).await;
        self.consumer
            .deliver(&report)
            .await
            .context("Failed to deliver tick report")?;
        Ok(report)
    }
}
