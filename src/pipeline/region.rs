use serde::Deserialize;

/// Geographic admission filter: a closed latitude/longitude rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// Approximate bounds for Indonesia.
pub const INDONESIA: BoundingBox = BoundingBox {
    min_lat: -11.0,
    max_lat: 6.0,
    min_lon: 95.0,
    max_lon: 141.0,
};

impl BoundingBox {
    /// Both bounds are inclusive.
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        latitude >= self.min_lat
            && latitude <= self.max_lat
            && longitude >= self.min_lon
            && longitude <= self.max_lon
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        INDONESIA
    }
}
