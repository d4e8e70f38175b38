use chrono::NaiveDate;

use crate::catalog::models::{EventProperties, Feature, FeatureCollection, Geometry};
use crate::config::QueryConfig;

/// Build a feature with a full coordinate triple and a properties bag.
pub fn feature(
    lon: f64,
    lat: f64,
    depth_km: f64,
    time_ms: Option<i64>,
    mag: Option<f64>,
    place: Option<&str>,
) -> Feature {
    Feature {
        geometry: Some(Geometry {
            coordinates: vec![lon, lat, depth_km],
        }),
        properties: Some(EventProperties {
            time: time_ms,
            mag,
            place: place.map(str::to_string),
        }),
    }
}

/// Build a feature with an empty properties bag and no geometry at all.
pub fn feature_without_geometry() -> Feature {
    Feature {
        geometry: None,
        properties: Some(EventProperties::default()),
    }
}

pub fn collection(features: Vec<Feature>) -> FeatureCollection {
    FeatureCollection { features }
}

/// Default query settings with a small result cap.
pub fn test_query() -> QueryConfig {
    QueryConfig {
        start_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        min_magnitude: 5.0,
        max_magnitude: None,
        limit: 100,
    }
}
