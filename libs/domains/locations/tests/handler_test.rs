//! Handler tests for the Locations domain
//!
//! These drive the domain router with `oneshot` against the in-memory store:
//! - query string parsing and validation (422)
//! - response shape of vendors and client locations
//! - 404 and mapping failures rendered as error responses

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_locations::{InMemoryLocationRepository, LocationService, handlers};
use http_body_util::BodyExt;
use mongodb::bson::doc;
use serde_json::{Value, json};
use test_utils::{client_record, vendor_record};
use tower::ServiceExt; // For oneshot()

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app(records: Vec<mongodb::bson::Document>) -> Router {
    let repo = InMemoryLocationRepository::with_records(records);
    handlers::router(LocationService::new(repo))
}

/// v1 and v2 are plumbers about 1.4 km apart in San Francisco.
fn san_francisco() -> Router {
    app(vec![
        vendor_record("v2", "plumber", -122.43, 37.78),
        vendor_record("v1", "plumber", -122.42, 37.77),
        client_record("c7", -122.41, 37.76),
    ])
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    (status, json_body(response.into_body()).await)
}

fn ids(body: &Value) -> Vec<&str> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|v| v["id"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_nearest_vendors_sorted_by_distance() {
    let (status, body) = get(
        san_francisco(),
        "/vendors/nearest?lat=37.77&lng=-122.42&category=plumber&maxDistance=2000",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec!["v1", "v2"]);
}

#[tokio::test]
async fn test_nearest_vendors_response_shape() {
    let (_, body) = get(
        san_francisco(),
        "/vendors/nearest?lat=37.77&lng=-122.42&category=plumber&maxDistance=10",
    )
    .await;

    assert_eq!(
        body,
        json!([{
            "id": "v1",
            "firstName": "First-v1",
            "lastName": "Last-v1",
            "category": "plumber",
            "location": { "type": "Point", "coordinates": [-122.42, 37.77] },
            "role": "vendor"
        }])
    );
}

#[tokio::test]
async fn test_unknown_category_returns_empty_list() {
    let (status, body) = get(
        san_francisco(),
        "/vendors/nearest?lat=37.77&lng=-122.42&category=electrician&maxDistance=2000",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_category_match_is_exact() {
    let (status, body) = get(
        san_francisco(),
        "/vendors/nearest?lat=37.77&lng=-122.42&category=%20plumber%20",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_max_distance_defaults_to_5000_meters() {
    // ~4.5 km and ~5.6 km north of the origin
    let records = vec![
        vendor_record("inside", "plumber", 0.0, 0.04),
        vendor_record("outside", "plumber", 0.0, 0.05),
    ];

    let (_, implicit) = get(app(records.clone()), "/vendors/nearest?lat=0&lng=0&category=plumber").await;
    let (_, explicit) = get(
        app(records),
        "/vendors/nearest?lat=0&lng=0&category=plumber&maxDistance=5000",
    )
    .await;

    assert_eq!(ids(&implicit), vec!["inside"]);
    assert_eq!(implicit, explicit);
}

#[tokio::test]
async fn test_zero_max_distance_only_matches_exact_point() {
    let (status, body) = get(
        san_francisco(),
        "/vendors/nearest?lat=37.77&lng=-122.42&category=plumber&maxDistance=0",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec!["v1"]);
}

#[tokio::test]
async fn test_repeated_queries_are_identical() {
    let app = san_francisco();
    let uri = "/vendors/nearest?lat=37.775&lng=-122.425&category=plumber";

    let (_, first) = get(app.clone(), uri).await;
    let (_, second) = get(app, uri).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_non_numeric_lat_is_422() {
    let (status, body) = get(
        san_francisco(),
        "/vendors/nearest?lat=abc&lng=-122.42&category=plumber",
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(body["details"]["fields"], json!(["lat"]));
    assert_eq!(body["details"]["errors"]["lat"][0]["params"]["value"], "abc");
}

#[tokio::test]
async fn test_missing_params_are_listed() {
    let (status, body) = get(san_francisco(), "/vendors/nearest?lng=200").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"]["fields"], json!(["category", "lat", "lng"]));
}

#[tokio::test]
async fn test_parse_and_range_errors_listed_together() {
    let (status, body) = get(
        san_francisco(),
        "/vendors/nearest?lat=abc&lng=200&category=plumber",
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"]["fields"], json!(["lat", "lng"]));
}

#[tokio::test]
async fn test_out_of_range_longitude_is_422() {
    let (status, body) = get(
        san_francisco(),
        "/vendors/nearest?lat=37.77&lng=-200&category=plumber",
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"]["fields"], json!(["lng"]));
}

#[tokio::test]
async fn test_malformed_vendor_record_fails_request() {
    let mut broken = vendor_record("v9", "plumber", -122.42, 37.77);
    broken.remove("firstName");

    let (status, body) = get(
        app(vec![vendor_record("v1", "plumber", -122.42, 37.77), broken]),
        "/vendors/nearest?lat=37.77&lng=-122.42&category=plumber",
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "MAPPING_ERROR");
    assert!(body["message"].as_str().unwrap().contains("v9"));
}

#[tokio::test]
async fn test_client_location_found() {
    let (status, body) = get(san_francisco(), "/clients/c7/location").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "location": { "type": "Point", "coordinates": [-122.41, 37.76] } })
    );
}

#[tokio::test]
async fn test_client_location_not_found() {
    let (status, body) = get(san_francisco(), "/clients/c1/location").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
    assert_eq!(body["message"], "Client not found");
}

#[tokio::test]
async fn test_client_lookup_ignores_role() {
    let (status, body) = get(san_francisco(), "/clients/v1/location").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["location"]["coordinates"], json!([-122.42, 37.77]));
}

#[tokio::test]
async fn test_client_with_malformed_location_is_mapping_error() {
    let record = doc! {
        "id": "c5",
        "role": "client",
        "location": { "type": "Point", "coordinates": ["west", "north"] },
    };

    let (status, body) = get(app(vec![record]), "/clients/c5/location").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "MAPPING_ERROR");
}
