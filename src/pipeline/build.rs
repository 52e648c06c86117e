use geo::{point, GeodesicDistance};
use uuid::Uuid;

use crate::error::InputError;
use crate::types::track::{DerivationWarning, RawPoint, Track, TrackPoint, TrackSegment};

/// Beyond any surface or flight altitude; larger values are corrupt data.
const MAX_ABS_ELEVATION_M: f64 = 100_000.0;

pub fn build_track(raw_points: &[RawPoint]) -> Result<Track, InputError> {
    if raw_points.is_empty() {
        return Err(InputError::Empty);
    }

    let time_aware = raw_points.iter().all(|p| p.time.is_some());
    let points = raw_points
        .iter()
        .enumerate()
        .map(|(index, raw)| normalize_point(index, raw, time_aware))
        .collect::<Result<Vec<_>, _>>()?;

    let id = Uuid::new_v4();
    let mut warnings = Vec::new();
    let segments: Vec<TrackSegment> = points
        .windows(2)
        .enumerate()
        .map(|(index, pair)| derive_segment(index, &pair[0], &pair[1], &mut warnings))
        .collect();

    for warning in &warnings {
        tracing::warn!(track_id = %id, "{}", warning);
    }

    tracing::info!(
        track_id = %id,
        points = points.len(),
        time_aware,
        warnings = warnings.len(),
        "Built track"
    );

    Ok(Track {
        id,
        points,
        segments,
        time_aware,
        warnings,
    })
}

fn normalize_point(index: usize, raw: &RawPoint, time_aware: bool) -> Result<TrackPoint, InputError> {
    let lat = raw.lat.ok_or(InputError::MissingCoordinate {
        index,
        field: "latitude",
    })?;
    let lon = raw.lon.ok_or(InputError::MissingCoordinate {
        index,
        field: "longitude",
    })?;

    if !lat.is_finite() || !lon.is_finite() || !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(InputError::InvalidCoordinate { index, lat, lon });
    }

    let elevation = raw.elevation.filter(|e| e.is_finite()).unwrap_or(0.0);
    if elevation.abs() > MAX_ABS_ELEVATION_M {
        return Err(InputError::InvalidElevation { index, elevation });
    }

    Ok(TrackPoint {
        lat,
        lon,
        elevation,
        time: if time_aware { raw.time } else { None },
    })
}

fn derive_segment(
    index: usize,
    current: &TrackPoint,
    next: &TrackPoint,
    warnings: &mut Vec<DerivationWarning>,
) -> TrackSegment {
    let distance_m = geodesic_distance_m(current, next);

    let duration_s = match (current.time, next.time) {
        (Some(start), Some(end)) => Some((end - start).num_milliseconds() as f64 / 1000.0),
        _ => None,
    };

    let speed_mps = match duration_s {
        Some(seconds) if seconds > 0.0 => Some(distance_m / seconds),
        Some(seconds) if seconds == 0.0 => {
            warnings.push(DerivationWarning::ZeroDuration { segment: index });
            None
        }
        Some(seconds) => {
            warnings.push(DerivationWarning::NonMonotonicTime {
                segment: index,
                duration_s: seconds,
            });
            None
        }
        None => None,
    };

    TrackSegment {
        distance_m,
        duration_s,
        speed_mps,
    }
}

/// WGS84 ellipsoidal distance in meters.
fn geodesic_distance_m(a: &TrackPoint, b: &TrackPoint) -> f64 {
    if a.lat == b.lat && a.lon == b.lon {
        return 0.0;
    }
    // x is longitude, y is latitude
    let p1 = point!(x: a.lon, y: a.lat);
    let p2 = point!(x: b.lon, y: b.lat);
    p1.geodesic_distance(&p2).max(0.0)
}
