use axum::extract::Multipart;
use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::pipeline::{self, parse};
use crate::routes::samples::is_gpx_name;
use crate::state::AppState;
use crate::types::track::DerivationWarning;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/analyze", post(analyze))
}

#[derive(Serialize, Deserialize)]
struct AnalyzeResponse {
    track_id: String,
    source: String,
    points: usize,
    time_aware: bool,
    total_distance_km: f64,
    average_speed_kmh: Option<f64>,
    total_elevation_gain_m: f64,
    map_file_path: Option<String>,
    plot_file_path: Option<String>,
    speed_plot_file_path: Option<String>,
    warnings: Vec<DerivationWarning>,
}

enum Source {
    Upload { filename: String, bytes: Vec<u8> },
    Sample(String),
}

async fn analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let mut upload: Option<Source> = None;
    let mut sample: Option<Source> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "gpxfile" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read file bytes: {}", e))
                })?;
                if !filename.is_empty() {
                    upload = Some(Source::Upload {
                        filename,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            "sample_file" => {
                let value = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read sample name: {}", e))
                })?;
                sample = Some(Source::Sample(value.trim().to_string()));
            }
            _ => {}
        }
    }

    let source = upload
        .or(sample)
        .ok_or_else(|| AppError::BadRequest("No GPX file or sample provided".to_string()))?;

    let (label, bytes) = match source {
        Source::Upload { filename, bytes } => (filename, bytes),
        Source::Sample(name) => {
            let bytes = read_sample(&state, &name).await?;
            (name, bytes)
        }
    };

    tracing::info!("Analyzing GPX file: {}", label);

    let artifacts = state.artifacts();
    let (track, report) = tokio::task::spawn_blocking(move || {
        let raw = parse::parse(&bytes)?;
        let analyzed = pipeline::analyze(&raw, &artifacts)?;
        Ok::<_, AppError>(analyzed)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Analysis task failed: {}", e)))??;

    tracing::info!(
        "Analyzed {} as track {} ({} points, {:.2} km)",
        label,
        track.id(),
        track.points().len(),
        report.summary.total_distance_km
    );

    Ok(Json(AnalyzeResponse {
        track_id: track.id().to_string(),
        source: label,
        points: track.points().len(),
        time_aware: track.is_time_aware(),
        total_distance_km: report.summary.total_distance_km,
        average_speed_kmh: report.summary.average_speed_kmh,
        total_elevation_gain_m: report.summary.total_elevation_gain_m,
        map_file_path: report.map.map(|m| m.path.display().to_string()),
        plot_file_path: report.elevation_profile.map(|a| a.path.display().to_string()),
        speed_plot_file_path: report.speed_distribution.map(|a| a.path.display().to_string()),
        warnings: track.warnings().to_vec(),
    }))
}

async fn read_sample(state: &AppState, name: &str) -> Result<Vec<u8>, AppError> {
    // bare file names only, no traversal out of the sample directory
    let is_bare = !name.is_empty()
        && !name.contains(['/', '\\'])
        && name != ".."
        && name != ".";
    if !is_bare || !is_gpx_name(name) {
        return Err(AppError::BadRequest(format!("Invalid sample name: {}", name)));
    }

    let path = state.config().sample_dir.join(name);
    match tokio::fs::read(&path).await {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(AppError::NotFound(name.to_string())),
        Err(e) => Err(AppError::Parse(e.into())),
    }
}
