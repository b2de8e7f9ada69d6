use std::sync::Arc;

use axum::body::{to_bytes, Body, Bytes};
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::response::IntoResponse;
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::config::Config;
use crate::engine::CorridorEngine;
use crate::server::envelope::parse_sample;
use crate::server::routes::{compute, compute_multiple, get_all_points, push_data};
use crate::server::wire::WireLabel;
use crate::server::{router, AppState, ServerError};
use crate::store::SensorPoint;

fn state() -> Arc<AppState> {
    Arc::new(AppState::new(CorridorEngine::new(), 30.0))
}

fn body(value: serde_json::Value) -> Bytes {
    Bytes::from(value.to_string())
}

fn seeded() -> Arc<AppState> {
    let state = state();
    state.engine.bulk_load([
        SensorPoint::new(48.8568, 2.3526, 10.0),
        SensorPoint::new(48.8569, 2.3528, 30.0),
        SensorPoint::new(48.8600, 2.3600, 90.0),
    ]);
    state
}

fn expect_malformed(result: Result<impl std::fmt::Debug, ServerError>, expected: &str) {
    match result {
        Err(ServerError::MalformedInput { error, .. }) => assert_eq!(error, expected),
        other => panic!("expected a malformed input error, got {other:?}"),
    }
}

#[test]
fn envelope_accepts_flat_fields() {
    let point = parse_sample(br#"{"latitude": 48.8568, "longitude": 2.3526, "speed": 4.5}"#)
        .expect("flat body must parse");
    assert_eq!(point, SensorPoint::new(48.8568, 2.3526, 4.5));
}

#[test]
fn envelope_accepts_encoded_data_string() {
    let payload = json!({
        "data": json!({ "latitude": "48.8568", "longitude": 2.3526, "speed": "7" }).to_string()
    });

    let point = parse_sample(payload.to_string().as_bytes()).expect("nested body must parse");
    assert_eq!(point, SensorPoint::new(48.8568, 2.3526, 7.0));
}

#[test]
fn envelope_accepts_data_object() {
    let payload = json!({ "data": { "latitude": 1.5, "longitude": -2.5, "speed": 3 } });

    let point = parse_sample(payload.to_string().as_bytes()).expect("nested body must parse");
    assert_eq!(point, SensorPoint::new(1.5, -2.5, 3.0));
}

#[test]
fn envelope_defaults_missing_fields_to_zero() {
    let point = parse_sample(br#"{"latitude": 48.8568}"#).expect("partial body must parse");
    assert_eq!(point, SensorPoint::new(48.8568, 0.0, 0.0));
}

#[test]
fn envelope_rejects_malformed_bodies() {
    expect_malformed(parse_sample(b""), "No JSON body");
    expect_malformed(parse_sample(b"{}"), "No JSON body");
    expect_malformed(parse_sample(b"[1, 2, 3]"), "No JSON body");
    expect_malformed(parse_sample(b"{\"latitude\": "), "No JSON body");

    expect_malformed(
        parse_sample(br#"{"latitude": "north", "longitude": 2.0, "speed": 1.0}"#),
        "Invalid numeric values",
    );
    expect_malformed(
        parse_sample(br#"{"latitude": "NaN", "longitude": 2.0, "speed": 1.0}"#),
        "Invalid numeric values",
    );
    expect_malformed(
        parse_sample(br#"{"latitude": true}"#),
        "Invalid numeric values",
    );

    expect_malformed(parse_sample(br#"{"data": "not json"}"#), "Invalid data JSON");
    expect_malformed(parse_sample(br#"{"data": "[1]"}"#), "Invalid data JSON");
    expect_malformed(parse_sample(br#"{"data": null}"#), "Invalid data JSON");
    expect_malformed(
        parse_sample(br#"{"data": "{\"speed\": \"fast\"}"}"#),
        "Invalid data JSON",
    );
}

#[tokio::test]
async fn push_data_appends_and_counts() {
    let state = state();

    let first = push_data(
        State(state.clone()),
        body(json!({ "latitude": 48.8568, "longitude": 2.3526, "speed": 4.0 })),
    )
    .await
    .expect("push must succeed");
    assert_eq!(first.0.status, "Point added");
    assert_eq!(first.0.count, 1);

    let second = push_data(
        State(state.clone()),
        body(json!({ "data": "{\"latitude\": 1, \"longitude\": 2, \"speed\": 3}" })),
    )
    .await
    .expect("push must succeed");
    assert_eq!(second.0.count, 2);

    let rejected = push_data(State(state.clone()), body(json!({ "latitude": "x" }))).await;
    assert!(rejected.is_err());
    assert_eq!(state.engine.count(), 2);
}

#[tokio::test]
async fn get_all_points_lists_triples() {
    let state = seeded();
    let points = get_all_points(State(state)).await;

    assert_eq!(
        serde_json::to_value(&points.0).expect("points must serialize"),
        json!({ "points": [
            [48.8568, 2.3526, 10.0],
            [48.8569, 2.3528, 30.0],
            [48.86, 2.36, 90.0],
        ] })
    );
}

#[tokio::test]
async fn compute_classifies_against_segment() {
    let request = json!({ "latA": 48.8566, "lonA": 2.3522, "latB": "48.8570", "lonB": 2.3530 });
    let response = compute(State(seeded()), body(request))
        .await
        .expect("compute must succeed")
        .0;

    assert_eq!(response.on_street, vec![[48.8568, 2.3526], [48.8569, 2.3528]]);
    assert_eq!(response.off_street, vec![[48.86, 2.36]]);
    assert_eq!(response.avg_speed, 20.0);

    let value = serde_json::to_value(&response).expect("response must serialize");
    assert_eq!(value["avgSpeed"], json!(20.0));
    assert!(value.get("onStreet").is_some() && value.get("offStreet").is_some());
}

#[tokio::test]
async fn compute_honours_corridor_width() {
    let request = json!({
        "latA": 48.8566, "lonA": 2.3522, "latB": 48.8570, "lonB": 2.3530,
        "corridor": 5000.0
    });
    let response = compute(State(seeded()), body(request))
        .await
        .expect("compute must succeed")
        .0;

    assert_eq!(response.on_street.len(), 3);
    assert!(response.off_street.is_empty());
    assert_eq!(response.avg_speed, 130.0 / 3.0);
}

#[tokio::test]
async fn compute_rejects_bad_requests() {
    let missing = json!({ "latA": 48.8566, "lonA": 2.3522, "latB": 48.8570 });
    expect_malformed(
        compute(State(seeded()), body(missing)).await,
        "Invalid request body",
    );

    let negative = json!({
        "latA": 48.8566, "lonA": 2.3522, "latB": 48.8570, "lonB": 2.3530,
        "corridor": -1
    });
    expect_malformed(
        compute(State(seeded()), body(negative)).await,
        "Invalid corridor width",
    );
}

#[tokio::test]
async fn compute_multiple_reports_chain_and_summary() {
    let request = json!({
        "segments": [
            [[48.8566, 2.3522], [48.8570, 2.3530]],
            [[48.8570, 2.3530], [48.8578, 2.3530]],
        ]
    });

    let response = compute_multiple(State(seeded()), body(request))
        .await
        .expect("compute_multiple must succeed")
        .0;

    let labels = response
        .results
        .iter()
        .map(|result| result.segment_index.clone())
        .collect::<Vec<_>>();
    assert_eq!(
        labels,
        vec![
            WireLabel::Index(0),
            WireLabel::Index(1),
            WireLabel::Span("A->Z".to_string())
        ]
    );
    assert_eq!((response.results[0].on_count, response.results[0].off_count), (2, 1));
    assert!(response
        .results
        .iter()
        .all(|result| result.on_count + result.off_count == 3));

    let value = serde_json::to_value(&response).expect("response must serialize");
    assert_eq!(value["results"][2]["segmentIndex"], json!("A->Z"));
    assert_eq!(value["results"][0]["segmentIndex"], json!(0));
    assert_eq!(value["results"][0]["onCount"], json!(2));
}

#[tokio::test]
async fn compute_multiple_single_segment_has_no_summary() {
    let request = json!({ "segments": [[[48.8566, 2.3522], [48.8570, 2.3530]]] });
    let response = compute_multiple(State(seeded()), body(request))
        .await
        .expect("compute_multiple must succeed")
        .0;

    assert_eq!(response.results.len(), 1);
}

#[tokio::test]
async fn compute_multiple_rejects_short_segments() {
    let request = json!({ "segments": [[[48.8566, 2.3522]]] });
    expect_malformed(
        compute_multiple(State(seeded()), body(request)).await,
        "Invalid request body",
    );
}

#[test]
fn errors_map_to_status_codes() {
    let malformed = ServerError::malformed("No JSON body", "empty").into_response();
    assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);

    let internal = ServerError::Internal("join failed".to_string()).into_response();
    assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

const ORIGIN: &str = "http://a.test";

fn request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::ORIGIN, ORIGIN);

    match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request must build")
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, Bytes) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible");

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body must be readable");

    (status, headers, bytes)
}

fn json_of(bytes: &Bytes) -> Value {
    serde_json::from_slice(bytes).expect("body must be json")
}

#[tokio::test]
async fn router_serves_every_route() {
    let app = router(state(), &Config::default());

    let push = json!({ "latitude": 48.8568, "longitude": 2.3526, "speed": 12 });
    let (status, _, bytes) = send(&app, request(Method::POST, "/api/push_data", Some(push))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&bytes), json!({ "status": "Point added", "count": 1 }));

    let (status, _, bytes) = send(&app, request(Method::GET, "/get_all_points", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&bytes), json!({ "points": [[48.8568, 2.3526, 12.0]] }));

    let compute = json!({ "latA": 48.8566, "lonA": 2.3522, "latB": 48.8570, "lonB": 2.3530 });
    let (status, _, bytes) = send(&app, request(Method::POST, "/compute", Some(compute))).await;
    assert_eq!(status, StatusCode::OK);
    let value = json_of(&bytes);
    assert_eq!(value["onStreet"], json!([[48.8568, 2.3526]]));
    assert_eq!(value["offStreet"], json!([]));
    assert_eq!(value["avgSpeed"], json!(12.0));

    let chain = json!({
        "segments": [
            [[48.8566, 2.3522], [48.8570, 2.3530]],
            [[48.8570, 2.3530], [48.8578, 2.3530]]
        ]
    });
    let (status, _, bytes) =
        send(&app, request(Method::POST, "/compute_multiple", Some(chain))).await;
    assert_eq!(status, StatusCode::OK);
    let results = json_of(&bytes)["results"].clone();
    assert_eq!(results.as_array().map(Vec::len), Some(3));
    assert_eq!(results[0], json!({ "segmentIndex": 0, "onCount": 1, "offCount": 0 }));
    assert_eq!(results[2]["segmentIndex"], json!("A->Z"));
}

#[tokio::test]
async fn router_reports_malformed_bodies_as_json() {
    let app = router(state(), &Config::default());

    let (status, _, bytes) =
        send(&app, request(Method::POST, "/compute", Some(json!({ "latA": 1 })))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_of(&bytes)["error"], json!("Invalid request body"));

    let (status, _, bytes) =
        send(&app, request(Method::POST, "/api/push_data", Some(json!({})))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_of(&bytes)["error"], json!("No JSON body"));

    let (status, ..) = send(&app, request(Method::GET, "/missing", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn router_serves_index_from_static_dir() {
    let dir = std::env::temp_dir().join(format!("corridor-static-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir must be writable");
    std::fs::write(dir.join("index.html"), "<h1>corridor</h1>").expect("index must be written");

    let config = Config {
        static_dir: dir.clone(),
        ..Config::default()
    };
    let app = router(state(), &config);

    let (status, _, bytes) = send(&app, request(Method::GET, "/", None)).await;
    let _ = std::fs::remove_dir_all(&dir);

    assert_eq!(status, StatusCode::OK);
    assert_eq!(&bytes[..], b"<h1>corridor</h1>");
}

#[tokio::test]
async fn cors_allows_any_origin_by_default() {
    let app = router(state(), &Config::default());

    let (_, headers, _) = send(&app, request(Method::GET, "/get_all_points", None)).await;
    assert_eq!(
        headers
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn cors_echoes_only_listed_origins() {
    let config = Config {
        allowed_origins: vec![ORIGIN.to_string()],
        ..Config::default()
    };
    let app = router(state(), &config);

    let (_, headers, _) = send(&app, request(Method::GET, "/get_all_points", None)).await;
    assert_eq!(
        headers
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok()),
        Some(ORIGIN)
    );

    let stranger = Request::builder()
        .uri("/get_all_points")
        .header(header::ORIGIN, "http://b.test")
        .body(Body::empty())
        .expect("request must build");
    let (status, headers, _) = send(&app, stranger).await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}
