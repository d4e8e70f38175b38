use chrono::{DateTime, Utc};

/// Canonical tabular row produced for all consumers.
///
/// Every record in an output set satisfies the bounding-box constraint of the
/// region it was normalized against.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    /// Event time truncated to whole seconds, UTC. Absent when the catalog
    /// reported none.
    pub time: Option<DateTime<Utc>>,
    pub place: Option<String>,
    pub magnitude: Option<f64>,
    pub depth_km: f64,
    pub longitude: f64,
    pub latitude: f64,
}

impl EventRecord {
    /// Render the event time at second precision, e.g. "2023-11-14 22:13:20".
    pub fn time_string(&self) -> Option<String> {
        self.time.map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
    }
}
