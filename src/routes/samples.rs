use std::path::Path;

use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/samples", get(list_samples))
}

#[derive(Serialize, Deserialize)]
struct SamplesResponse {
    samples: Vec<String>,
}

async fn list_samples(State(state): State<AppState>) -> Json<SamplesResponse> {
    Json(SamplesResponse {
        samples: sample_files(&state.config().sample_dir),
    })
}

/// Sorted names of the `.gpx` files in `dir`; empty when the directory is missing.
pub fn sample_files(dir: &Path) -> Vec<String> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::warn!(dir = %dir.display(), "Cannot list samples: {}", err);
            return Vec::new();
        }
    };

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| is_gpx_name(name))
        .collect();
    names.sort();
    names
}

pub(crate) fn is_gpx_name(name: &str) -> bool {
    name.rsplit('.')
        .next()
        .map(|ext| ext.eq_ignore_ascii_case("gpx"))
        .unwrap_or(false)
        && name.len() > 4
}
