use crate::catalog::error::FetchError;
use crate::catalog::models::{FeatureCollection, QueryWindow};
use crate::catalog::source::EventSource;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// `FakeEventSource` is an in-memory implementation of the `EventSource`
/// trait for testing purposes. Responses are served from a queue; once a
/// single collection remains it is repeated for every subsequent fetch, and
/// an empty queue yields empty collections.
#[derive(Clone, Default)]
pub struct FakeEventSource {
    responses: Arc<Mutex<VecDeque<FeatureCollection>>>,
    fail_message: Arc<Mutex<Option<String>>>,
    delay: Arc<Mutex<Option<Duration>>>,
    windows: Arc<Mutex<Vec<QueryWindow>>>,
    active: Arc<Mutex<usize>>,
    max_active: Arc<Mutex<usize>>,
}

impl FakeEventSource {
    /// Create a new empty FakeEventSource instance
    pub fn new() -> Self {
        FakeEventSource::default()
    }

    /// Queue a collection to serve on a subsequent fetch
    pub fn push_collection(&self, collection: FeatureCollection) {
        self.responses.lock().unwrap().push_back(collection);
    }

    /// Simulate a catalog outage: every subsequent fetch fails with `message`
    pub fn fake_failure(&self, message: &str) {
        *self.fail_message.lock().unwrap() = Some(message.to_string());
    }

    /// Clear an injected failure
    pub fn clear_failure(&self) {
        *self.fail_message.lock().unwrap() = None;
    }

    /// Simulate a slow catalog: every fetch takes at least `delay`
    pub fn set_fetch_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    /// Number of fetches issued so far
    pub fn fetch_count(&self) -> usize {
        self.windows.lock().unwrap().len()
    }

    /// Query windows observed so far, in call order
    pub fn windows(&self) -> Vec<QueryWindow> {
        self.windows.lock().unwrap().clone()
    }

    /// Largest number of fetches that were ever in flight at the same time
    pub fn max_concurrent_fetches(&self) -> usize {
        *self.max_active.lock().unwrap()
    }
}

#[async_trait]
impl EventSource for FakeEventSource {
    async fn fetch_events(&self, window: &QueryWindow) -> Result<FeatureCollection, FetchError> {
        self.windows.lock().unwrap().push(window.clone());

        {
            let mut active = self.active.lock().unwrap();
            *active += 1;
            let mut max_active = self.max_active.lock().unwrap();
            if *active > *max_active {
                *max_active = *active;
            }
        }

        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        *self.active.lock().unwrap() -= 1;

        let failure = self.fail_message.lock().unwrap().clone();
        if let Some(message) = failure {
            return Err(FetchError::Request(message));
        }

        let mut responses = self.responses.lock().unwrap();
        let collection = if responses.len() > 1 {
            responses.pop_front().unwrap()
        } else {
            responses.front().cloned().unwrap_or_default()
        };
        Ok(collection)
    }
}
