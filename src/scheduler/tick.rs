use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;
use tracing::{debug, warn};

use crate::catalog::error::FetchError;
use crate::catalog::models::QueryWindow;
use crate::catalog::source::EventSource;
use crate::config::QueryConfig;
use crate::pipeline::error::NormalizeError;
use crate::pipeline::normalize;
use crate::pipeline::record::EventRecord;
use crate::pipeline::region::BoundingBox;

/// Why a tick produced no usable data
#[derive(Debug, Error)]
pub enum TickError {
    #[error("Catalog fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Response normalization failed: {0}")]
    Normalize(#[from] NormalizeError),
}

/// Outcome of one tick, delivered to the registered consumer.
///
/// `records` is empty whenever `error` is set; a consumer that accumulates
/// state decides for itself how to merge or replace previous result sets.
#[derive(Debug)]
pub struct TickReport {
    pub generated_at: DateTime<Utc>,
    pub records: Vec<EventRecord>,
    pub error: Option<TickError>,
}

/// Build the query window for one tick: the range runs from the configured
/// base start date up to `today`, so it grows monotonically over a run.
pub fn build_window(query: &QueryConfig, today: NaiveDate) -> QueryWindow {
    QueryWindow {
        start: query.start_date,
        end: today,
        min_magnitude: query.min_magnitude,
        max_magnitude: query.max_magnitude,
        limit: query.limit,
    }
}

/// Run one fetch -> normalize pass. Failures never propagate: they are folded
/// into the report so the scheduler keeps ticking.
pub async fn run_tick<S: EventSource>(
    source: &S,
    query: &QueryConfig,
    region: &BoundingBox,
) -> TickReport {
    let window = build_window(query, Utc::now().date_naive());
    debug!("Tick started, querying {} to {}", window.start, window.end);

    let outcome = match source.fetch_events(&window).await {
        Ok(collection) => normalize(&collection.features, region).map_err(TickError::from),
        Err(e) => Err(TickError::from(e)),
    };

    match outcome {
        Ok(records) => {
            debug!("Tick complete: {} records in region", records.len());
            TickReport {
                generated_at: Utc::now(),
                records,
                error: None,
            }
        }
        Err(e) => {
            warn!("Tick failed: {e}");
            TickReport {
                generated_at: Utc::now(),
                records: Vec::new(),
                error: Some(e),
            }
        }
    }
}
