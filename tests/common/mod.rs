use std::path::Path;

use axum::Router;
use gpx_trip_stats::{config::Config, routes, state::AppState};

pub fn app(output_dir: &Path, sample_dir: &Path, token: Option<&str>) -> Router {
    let config = Config {
        port: 0,
        max_file_size: 25 * 1024 * 1024,
        output_dir: output_dir.to_path_buf(),
        sample_dir: sample_dir.to_path_buf(),
        mapbox_token: token.map(str::to_string),
    };
    let state = AppState::new(config);
    Router::new()
        .merge(routes::health::router())
        .merge(routes::samples::router())
        .merge(routes::analyze::router())
        .with_state(state)
}

pub fn sample_gpx() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test">
  <trk><name>Test Ride</name><trkseg>
    <trkpt lat="52.5200" lon="13.4050"><ele>34.0</ele><time>2026-01-01T12:00:00Z</time></trkpt>
    <trkpt lat="52.5205" lon="13.4060"><ele>39.0</ele><time>2026-01-01T12:00:10Z</time></trkpt>
    <trkpt lat="52.5210" lon="13.4070"><ele>37.0</ele><time>2026-01-01T12:00:20Z</time></trkpt>
  </trkseg></trk>
</gpx>"#
}

pub fn untimed_gpx() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test">
  <trk><trkseg>
    <trkpt lat="0.0" lon="0.0"/>
    <trkpt lat="0.0" lon="0.001"/>
    <trkpt lat="0.0" lon="0.002"/>
  </trkseg></trk>
</gpx>"#
}

pub fn multipart_file(field: &str, file_name: &str, file_body: &str, boundary: &str) -> String {
    format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n{file_body}\r\n--{boundary}--\r\n"
    )
}

pub fn multipart_text(field: &str, value: &str, boundary: &str) -> String {
    format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"\r\n\r\n{value}\r\n--{boundary}--\r\n"
    )
}
