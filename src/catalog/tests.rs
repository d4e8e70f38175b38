use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::catalog::error::FetchError;
use crate::catalog::fake::FakeEventSource;
use crate::catalog::models::QueryWindow;
use crate::catalog::source::EventSource;
use crate::catalog::UsgsCatalog;
use crate::config::CatalogConfig;
use crate::test_utils::{collection, feature};

fn test_window() -> QueryWindow {
    QueryWindow {
        start: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        end: NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
        min_magnitude: 5.0,
        max_magnitude: None,
        limit: 20_000,
    }
}

fn client_for(server: &MockServer) -> UsgsCatalog {
    UsgsCatalog::new(&CatalogConfig {
        endpoint: format!("{}/fdsnws/event/1/query", server.uri()),
        request_timeout_seconds: 5,
    })
    .unwrap()
}

fn empty_body() -> serde_json::Value {
    json!({"type": "FeatureCollection", "features": []})
}

#[tokio::test]
async fn fetch_decodes_a_feature_collection() {
    let server = MockServer::start().await;
    let body = json!({
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {
                    "mag": 5.6,
                    "place": "Java, Indonesia",
                    "time": 1_700_000_000_000_i64,
                    "status": "reviewed"
                },
                "geometry": {"type": "Point", "coordinates": [106.8, -6.2, 48.3]}
            },
            {
                "type": "Feature",
                "properties": {"mag": null, "place": null, "time": null},
                "geometry": null
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/fdsnws/event/1/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let fetched = client_for(&server)
        .fetch_events(&test_window())
        .await
        .unwrap();

    assert_eq!(fetched.features.len(), 2);
    let first = fetched.features[0].properties.as_ref().unwrap();
    assert_eq!(first.mag, Some(5.6));
    assert_eq!(first.place.as_deref(), Some("Java, Indonesia"));
    assert_eq!(first.time, Some(1_700_000_000_000));
    assert_eq!(
        fetched.features[0].geometry.as_ref().unwrap().coordinates,
        vec![106.8, -6.2, 48.3]
    );
    assert!(fetched.features[1].geometry.is_none());
}

#[tokio::test]
async fn fetch_sends_the_expected_query_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fdsnws/event/1/query"))
        .and(query_param("format", "geojson"))
        .and(query_param("starttime", "2020-01-01"))
        .and(query_param("endtime", "2024-12-01"))
        .and(query_param("minmagnitude", "5"))
        .and(query_param("limit", "20000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_body()))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .fetch_events(&test_window())
        .await
        .unwrap();
}

#[tokio::test]
async fn absent_max_magnitude_omits_the_parameter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_body()))
        .mount(&server)
        .await;

    client_for(&server)
        .fetch_events(&test_window())
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap_or_default().to_string();
    assert!(
        !query.contains("maxmagnitude"),
        "maxmagnitude must be omitted when unset, got: {query}"
    );
}

#[tokio::test]
async fn set_max_magnitude_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("maxmagnitude", "7.5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_body()))
        .expect(1)
        .mount(&server)
        .await;

    let mut window = test_window();
    window.max_magnitude = Some(7.5);
    client_for(&server).fetch_events(&window).await.unwrap();
}

#[tokio::test]
async fn zero_max_magnitude_is_still_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("maxmagnitude", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_body()))
        .expect(1)
        .mount(&server)
        .await;

    let mut window = test_window();
    window.max_magnitude = Some(0.0);
    client_for(&server).fetch_events(&window).await.unwrap();
}

#[tokio::test]
async fn non_success_status_is_a_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Bad Request"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_events(&test_window())
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Status(400)), "got {err:?}");
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not geojson"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_events(&test_window())
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn unreachable_catalog_is_a_request_error() {
    let server = MockServer::start().await;
    let endpoint = format!("{}/fdsnws/event/1/query", server.uri());
    drop(server);

    let catalog = UsgsCatalog::new(&CatalogConfig {
        endpoint,
        request_timeout_seconds: 5,
    })
    .unwrap();

    let err = catalog.fetch_events(&test_window()).await.unwrap_err();

    assert!(matches!(err, FetchError::Request(_)), "got {err:?}");
}

#[tokio::test]
async fn fake_serves_queued_collections_in_order() {
    let fake = FakeEventSource::new();
    fake.push_collection(collection(vec![feature(
        100.0,
        -5.0,
        10.0,
        None,
        None,
        Some("one"),
    )]));
    fake.push_collection(collection(vec![]));

    let first = fake.fetch_events(&test_window()).await.unwrap();
    assert_eq!(first.features.len(), 1);

    let second = fake.fetch_events(&test_window()).await.unwrap();
    assert!(second.features.is_empty());

    assert_eq!(fake.fetch_count(), 2);
    assert_eq!(fake.windows()[0], test_window());
}

#[tokio::test]
async fn fake_failure_injection() {
    let fake = FakeEventSource::new();
    fake.fake_failure("connection reset");

    let err = fake.fetch_events(&test_window()).await.unwrap_err();
    assert!(matches!(err, FetchError::Request(_)));

    fake.clear_failure();
    assert!(fake.fetch_events(&test_window()).await.is_ok());
}
