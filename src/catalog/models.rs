use chrono::NaiveDate;
use serde::Deserialize;

/// One bounded catalog query: a closed date range plus magnitude and size
/// limits. Built fresh on every tick, so the range grows as time passes.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub min_magnitude: f64,
    /// Absent omits the maxmagnitude parameter; `Some(0.0)` still sends it.
    pub max_magnitude: Option<f64>,
    pub limit: u32,
}

/// Decoded GeoJSON response body from the catalog service.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: Option<EventProperties>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Geometry {
    /// Positional [longitude, latitude, depth_km].
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EventProperties {
    /// Event time in milliseconds since the Unix epoch.
    #[serde(default)]
    pub time: Option<i64>,
    #[serde(default)]
    pub mag: Option<f64>,
    #[serde(default)]
    pub place: Option<String>,
}
