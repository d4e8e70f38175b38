use crate::catalog::error::FetchError;
use crate::catalog::models::{FeatureCollection, QueryWindow};
use crate::catalog::source::EventSource;
use crate::config::CatalogConfig;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};

/// Real catalog client backed by the USGS fdsnws event service
pub struct UsgsCatalog {
    endpoint: String,
    http: reqwest::Client,
}

impl UsgsCatalog {
    /// Create a new client from configuration. The request timeout bounds the
    /// duration of a tick; the upstream service itself imposes none.
    pub fn new(config: &CatalogConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| FetchError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        info!("Catalog client ready for endpoint {}", config.endpoint);
        Ok(UsgsCatalog {
            endpoint: config.endpoint.clone(),
            http,
        })
    }

    fn query_params(window: &QueryWindow) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("format", "geojson".to_string()),
            ("starttime", window.start.to_string()),
            ("endtime", window.end.to_string()),
            ("minmagnitude", window.min_magnitude.to_string()),
            ("limit", window.limit.to_string()),
        ];

        // An absent upper bound omits the parameter entirely; Some(0.0) is
        // still sent.
        if let Some(max) = window.max_magnitude {
            params.push(("maxmagnitude", max.to_string()));
        }

        params
    }
}

#[async_trait]
impl EventSource for UsgsCatalog {
    async fn fetch_events(&self, window: &QueryWindow) -> Result<FeatureCollection, FetchError> {
        debug!(
            "Querying catalog from {} to {}, magnitude >= {}",
            window.start, window.end, window.min_magnitude
        );

        let response = self
            .http
            .get(&self.endpoint)
            .query(&Self::query_params(window))
            .send()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let collection: FeatureCollection = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        debug!("Catalog returned {} features", collection.features.len());
        Ok(collection)
    }
}
