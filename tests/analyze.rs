mod common;

use axum::{body::to_bytes, http::Request, Router};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

const BOUNDARY: &str = "X-BOUNDARY-TEST";

async fn post(app: Router, body: String) -> (axum::http::StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/analyze")
                .method("POST")
                .header(
                    "content-type",
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(axum::body::Body::from(body))
                .expect("request"),
        )
        .await
        .expect("response");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    (status, serde_json::from_slice(&body).expect("json"))
}

#[tokio::test]
async fn upload_returns_summary_and_artifacts() {
    let output = TempDir::new().expect("tempdir");
    let app = common::app(output.path(), output.path(), Some("pk.test"));
    let body = common::multipart_file("gpxfile", "ride.gpx", common::sample_gpx(), BOUNDARY);

    let (status, json) = post(app, body).await;
    assert_eq!(status, axum::http::StatusCode::OK);
    assert_eq!(json["points"], 3);
    assert_eq!(json["time_aware"], true);
    assert_eq!(json["total_elevation_gain_m"], 5.0);
    assert!(json["total_distance_km"].as_f64().expect("distance") > 0.0);
    assert!(json["average_speed_kmh"].as_f64().expect("speed") > 0.0);

    for key in ["map_file_path", "plot_file_path", "speed_plot_file_path"] {
        let path = json[key].as_str().expect("artifact path");
        assert!(std::path::Path::new(path).exists(), "{} missing", key);
    }
}

#[tokio::test]
async fn time_less_track_is_a_partial_success() {
    let output = TempDir::new().expect("tempdir");
    let app = common::app(output.path(), output.path(), Some("pk.test"));
    let body = common::multipart_file("gpxfile", "walk.gpx", common::untimed_gpx(), BOUNDARY);

    let (status, json) = post(app, body).await;
    assert_eq!(status, axum::http::StatusCode::OK);
    assert_eq!(json["time_aware"], false);
    assert_eq!(json["average_speed_kmh"], Value::Null);
    assert_eq!(json["speed_plot_file_path"], Value::Null);
    assert!(json["map_file_path"].is_string());
    assert!(json["plot_file_path"].is_string());
    assert_eq!(json["total_distance_km"], 0.22);
}

#[tokio::test]
async fn sample_file_is_analyzed() {
    let output = TempDir::new().expect("tempdir");
    let samples = TempDir::new().expect("tempdir");
    std::fs::write(samples.path().join("berlin.gpx"), common::sample_gpx()).expect("write sample");
    let app = common::app(output.path(), samples.path(), None);

    let (status, json) = post(app, common::multipart_text("sample_file", "berlin.gpx", BOUNDARY)).await;
    assert_eq!(status, axum::http::StatusCode::OK);
    assert_eq!(json["source"], "berlin.gpx");
    // no tile token configured
    assert_eq!(json["map_file_path"], Value::Null);
}

#[tokio::test]
async fn unknown_sample_is_not_found() {
    let output = TempDir::new().expect("tempdir");
    let app = common::app(output.path(), output.path(), None);

    let (status, _) = post(app, common::multipart_text("sample_file", "nowhere.gpx", BOUNDARY)).await;
    assert_eq!(status, axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn sample_path_traversal_is_rejected() {
    let output = TempDir::new().expect("tempdir");
    let app = common::app(output.path(), output.path(), None);

    let (status, _) = post(app, common::multipart_text("sample_file", "../secret.gpx", BOUNDARY)).await;
    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_gpx_is_a_bad_request() {
    let output = TempDir::new().expect("tempdir");
    let app = common::app(output.path(), output.path(), None);
    let body = common::multipart_file("gpxfile", "broken.gpx", "<gpx><trk>", BOUNDARY);

    let (status, json) = post(app, body).await;
    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn missing_file_is_a_bad_request() {
    let output = TempDir::new().expect("tempdir");
    let app = common::app(output.path(), output.path(), None);

    let (status, _) = post(app, common::multipart_text("other", "x", BOUNDARY)).await;
    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn timestamps_without_offset_still_give_speeds() {
    let output = TempDir::new().expect("tempdir");
    let app = common::app(output.path(), output.path(), None);
    let gpx = r#"<gpx version="1.1"><trk><trkseg>
    <trkpt lat="52.5200" lon="13.4050"><time>2026-01-01T12:00:00</time></trkpt>
    <trkpt lat="52.5205" lon="13.4060"><time>2026-01-01T12:00:10</time></trkpt>
  </trkseg></trk></gpx>"#;
    let body = common::multipart_file("gpxfile", "local.gpx", gpx, BOUNDARY);

    let (status, json) = post(app, body).await;
    assert_eq!(status, axum::http::StatusCode::OK);
    assert_eq!(json["time_aware"], true);
    assert!(json["average_speed_kmh"].as_f64().expect("speed") > 0.0);
    assert!(json["speed_plot_file_path"].is_string());
}

#[tokio::test]
async fn implausible_elevation_is_a_bad_request() {
    let output = TempDir::new().expect("tempdir");
    let app = common::app(output.path(), output.path(), None);
    let gpx = r#"<gpx><trk><trkseg>
    <trkpt lat="0" lon="0"><ele>-1e308</ele></trkpt>
    <trkpt lat="0" lon="0.001"><ele>1e308</ele></trkpt>
  </trkseg></trk></gpx>"#;
    let body = common::multipart_file("gpxfile", "corrupt.gpx", gpx, BOUNDARY);

    let (status, json) = post(app, body).await;
    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().expect("error").contains("elevation"));
}
