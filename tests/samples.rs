mod common;

use axum::{body::to_bytes, http::Request};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

async fn list(app: axum::Router) -> Value {
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/samples")
                .method("GET")
                .body(axum::body::Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&body).expect("json")
}

#[tokio::test]
async fn lists_only_gpx_files_sorted() {
    let output = TempDir::new().expect("tempdir");
    let samples = TempDir::new().expect("tempdir");
    for name in ["zurich.gpx", "alps.gpx", "notes.txt"] {
        std::fs::write(samples.path().join(name), common::sample_gpx()).expect("write sample");
    }
    std::fs::create_dir(samples.path().join("nested.gpx")).expect("mkdir");

    let json = list(common::app(output.path(), samples.path(), None)).await;
    assert_eq!(json["samples"], serde_json::json!(["alps.gpx", "zurich.gpx"]));
}

#[tokio::test]
async fn missing_sample_directory_lists_nothing() {
    let output = TempDir::new().expect("tempdir");
    let missing = output.path().join("does-not-exist");

    let json = list(common::app(output.path(), &missing, None)).await;
    assert_eq!(json["samples"], serde_json::json!([]));
}
