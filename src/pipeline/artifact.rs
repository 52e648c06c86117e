use std::fs;
use std::path::Path;

use crate::error::{ArtifactError, RenderError};
use crate::pipeline::{map, rasterize, render};
use crate::types::artifact::{ArtifactConfig, ImageArtifact, MapArtifact, OutputConfig};
use crate::types::track::Track;

/// Writes the route map document, replacing any previous one.
pub fn render_map(track: &Track, config: &ArtifactConfig) -> Option<MapArtifact> {
    log_failure(track, "map", write_map(track, config))
}

pub fn render_elevation_profile(track: &Track, config: &ArtifactConfig) -> Option<ImageArtifact> {
    log_failure(track, "elevation_profile", write_elevation_profile(track, config))
}

/// Absent for time-less tracks: there is nothing to bin.
pub fn render_speed_distribution(track: &Track, config: &ArtifactConfig) -> Option<ImageArtifact> {
    log_failure(track, "speed_distribution", write_speed_distribution(track, config))
}

fn write_map(track: &Track, config: &ArtifactConfig) -> Result<MapArtifact, ArtifactError> {
    let token = config
        .tile_token
        .as_deref()
        .ok_or(ArtifactError::MissingTileToken)?;
    let html = map::render_map_html(track, token)?;

    let path = config.map_path();
    write_artifact(&path, html.as_bytes())?;
    tracing::info!(track_id = %track.id(), path = %path.display(), "Map saved");

    Ok(MapArtifact { path })
}

fn write_elevation_profile(track: &Track, config: &ArtifactConfig) -> Result<ImageArtifact, ArtifactError> {
    let distances = track.cumulative_distances_km();
    let elevations: Vec<f64> = track.points().iter().map(|p| p.elevation).collect();

    let output = OutputConfig::default();
    let svg = render::render_elevation_svg(&distances, &elevations, plot_size(&output))?;
    let png = rasterize::rasterize(&svg, &output)?;

    let path = config.elevation_plot_path();
    write_artifact(&path, &png)?;
    tracing::info!(track_id = %track.id(), path = %path.display(), "Elevation plot saved");

    Ok(ImageArtifact {
        path,
        width: output.width,
        height: output.height,
    })
}

fn write_speed_distribution(track: &Track, config: &ArtifactConfig) -> Result<ImageArtifact, ArtifactError> {
    if !track.is_time_aware() {
        return Err(RenderError::MissingData("timestamp").into());
    }
    let histogram = render::histogram(&track.speeds_kmh(), render::HISTOGRAM_BINS)
        .ok_or(RenderError::MissingData("speed"))?;

    let output = OutputConfig::default();
    let svg = render::render_histogram_svg(&histogram, plot_size(&output))?;
    let png = rasterize::rasterize(&svg, &output)?;

    let path = config.speed_plot_path();
    write_artifact(&path, &png)?;
    tracing::info!(track_id = %track.id(), path = %path.display(), "Speed distribution plot saved");

    Ok(ImageArtifact {
        path,
        width: output.width,
        height: output.height,
    })
}

fn plot_size(output: &OutputConfig) -> render::PlotSize {
    render::PlotSize {
        width: output.width,
        height: output.height,
    }
}

fn write_artifact(path: &Path, bytes: &[u8]) -> Result<(), ArtifactError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, bytes)?;
    Ok(())
}

fn log_failure<T>(track: &Track, artifact: &'static str, result: Result<T, ArtifactError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(ArtifactError::Render(RenderError::MissingData(what))) => {
            tracing::warn!(
                track_id = %track.id(),
                artifact,
                reason = %format!("no {} data", what),
                "Artifact skipped"
            );
            None
        }
        Err(err) => {
            tracing::error!(track_id = %track.id(), artifact, reason = %err, "Artifact rendering failed");
            None
        }
    }
}
