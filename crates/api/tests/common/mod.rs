use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use clipmark_api::config::ServerConfig;
use clipmark_api::router::build_app_router;
use clipmark_api::state::AppState;
use clipmark_core::labels::LabelConfig;

/// Build a test `ServerConfig` with safe defaults.
///
/// The fallback CSV path points at a file that does not exist, so tests
/// that want the fallback source point the config at a fixture instead.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        fallback_csv_path: PathBuf::from("no-such-fallback.csv"),
        labels_path: PathBuf::from("labels.json"),
    }
}

/// The label vocabularies used across the test suite.
pub fn test_labels() -> LabelConfig {
    LabelConfig {
        zones: vec!["FC".into(), "SZ".into(), "MZ".into()],
        actors: vec!["V".into(), "E".into()],
        events: vec!["START".into(), "STOP".into()],
    }
}

/// Build the application router with the production middleware stack and
/// the default test config.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_config(pool, test_config())
}

/// Build the application router against a specific config (used by
/// fallback-CSV tests to point at a fixture file).
pub fn build_test_app_with_config(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        labels: Arc::new(test_labels()),
    };
    build_app_router(state, &config)
}

/// Send a GET request to the app.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a POST request with a JSON body to the app.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body as text.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Save a document through the API, asserting it commits.
pub async fn save_ok(app: Router, filename: &str, annotations: serde_json::Value) {
    let response = post_json(
        app,
        "/api/save",
        serde_json::json!({ "filename": filename, "annotations": annotations }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// A one-token annotations array as the wire format sends it.
pub fn sample_annotations() -> serde_json::Value {
    serde_json::json!([
        {
            "z1": "FC", "z2": "FC", "a1": "V", "a2": "E", "e": "STOP",
            "token": "<FC→FC : V→E : STOP>"
        }
    ])
}
