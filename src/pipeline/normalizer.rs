use chrono::DateTime;
use tracing::debug;

use crate::catalog::models::Feature;
use crate::pipeline::error::NormalizeError;
use crate::pipeline::record::EventRecord;
use crate::pipeline::region::BoundingBox;

/// Convert raw catalog features into normalized records, keeping only events
/// whose coordinates fall inside `region`.
///
/// Output order equals the surviving subsequence of input order. Duplicate
/// source events (overlapping windows across ticks) are not deduplicated
/// here; that is a consumer-side concern. The function is pure: calling it
/// twice on the same input yields identical output.
pub fn normalize(
    features: &[Feature],
    region: &BoundingBox,
) -> Result<Vec<EventRecord>, NormalizeError> {
    let mut records = Vec::with_capacity(features.len());

    for (index, feature) in features.iter().enumerate() {
        let Some(properties) = &feature.properties else {
            return Err(NormalizeError::MissingProperties(index));
        };

        let Some(geometry) = &feature.geometry else {
            debug!("Dropping feature {index}: no geometry");
            continue;
        };

        let &[longitude, latitude, depth_km, ..] = geometry.coordinates.as_slice() else {
            debug!("Dropping feature {index}: no coordinate triple");
            continue;
        };

        if !region.contains(latitude, longitude) {
            debug!("Dropping feature {index}: outside region");
            continue;
        }

        // Epoch milliseconds to whole UTC seconds; an absent time stays
        // absent rather than becoming zero or "now".
        let time = properties
            .time
            .and_then(|ms| DateTime::from_timestamp(ms.div_euclid(1000), 0));

        records.push(EventRecord {
            time,
            place: properties.place.clone(),
            magnitude: properties.mag,
            depth_km,
            longitude,
            latitude,
        });
    }

    Ok(records)
}
