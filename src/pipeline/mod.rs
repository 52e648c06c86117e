pub mod artifact;
pub mod build;
pub mod map;
pub mod parse;
pub mod rasterize;
pub mod render;
pub mod summarize;

use crate::error::InputError;
use crate::types::artifact::{ArtifactConfig, TripReport};
use crate::types::track::{RawPoint, Track};

pub use artifact::{render_elevation_profile, render_map, render_speed_distribution};
pub use build::build_track;
pub use summarize::summarize;

/// Builds the track, then attempts every artifact independently.
pub fn analyze(raw_points: &[RawPoint], config: &ArtifactConfig) -> Result<(Track, TripReport), InputError> {
    let track = build_track(raw_points)?;
    let summary = summarize(&track);

    let report = TripReport {
        summary,
        map: render_map(&track, config),
        elevation_profile: render_elevation_profile(&track, config),
        speed_distribution: render_speed_distribution(&track, config),
    };

    tracing::info!(
        track_id = %track.id(),
        distance_km = report.summary.total_distance_km,
        map = report.map.is_some(),
        elevation_profile = report.elevation_profile.is_some(),
        speed_distribution = report.speed_distribution.is_some(),
        "Track analyzed"
    );

    Ok((track, report))
}
