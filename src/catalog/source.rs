use crate::catalog::error::FetchError;
use crate::catalog::models::{FeatureCollection, QueryWindow};
use async_trait::async_trait;
use std::sync::Arc;

/// EventSource trait defining the interface for fetching raw catalog events
#[async_trait]
pub trait EventSource: Send + Sync + 'static {
    /// Issue one bounded query and return the decoded feature collection.
    ///
    /// A failed fetch is terminal for the caller's current tick: there is no
    /// retry at this layer.
    async fn fetch_events(&self, window: &QueryWindow) -> Result<FeatureCollection, FetchError>;
}

/// Implementation of EventSource for Arc<T> where T implements EventSource
///
/// This allows sharing one source between the scheduler task and other
/// components without duplicating connections.
#[async_trait]
impl<T: EventSource + ?Sized> EventSource for Arc<T> {
    async fn fetch_events(&self, window: &QueryWindow) -> Result<FeatureCollection, FetchError> {
        (**self).fetch_events(window).await
    }
}
