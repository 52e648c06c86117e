use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A point as read from the source file, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPoint {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub elevation: Option<f64>,
    pub time: Option<DateTime<Utc>>,
}

impl RawPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat: Some(lat),
            lon: Some(lon),
            elevation: None,
            time: None,
        }
    }

    pub fn with_elevation(mut self, elevation: f64) -> Self {
        self.elevation = Some(elevation);
        self
    }

    pub fn with_time(mut self, time: DateTime<Utc>) -> Self {
        self.time = Some(time);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    pub lat: f64,
    pub lon: f64,
    /// Meters, 0 when the source had no elevation for this point.
    pub elevation: f64,
    /// Only set when the whole track is time-aware.
    pub time: Option<DateTime<Utc>>,
}

/// Derived metrics between a point and its successor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackSegment {
    pub distance_m: f64,
    pub duration_s: Option<f64>,
    pub speed_mps: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DerivationWarning {
    ZeroDuration { segment: usize },
    NonMonotonicTime { segment: usize, duration_s: f64 },
}

impl std::fmt::Display for DerivationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DerivationWarning::ZeroDuration { segment } => {
                write!(f, "segment {} has zero duration, speed undefined", segment)
            }
            DerivationWarning::NonMonotonicTime { segment, duration_s } => write!(
                f,
                "segment {} goes back in time ({:.3}s), speed undefined",
                segment, duration_s
            ),
        }
    }
}

/// A validated, frozen track. Built only through `pipeline::build::build_track`.
#[derive(Debug, Clone)]
pub struct Track {
    pub(crate) id: Uuid,
    pub(crate) points: Vec<TrackPoint>,
    pub(crate) segments: Vec<TrackSegment>,
    pub(crate) time_aware: bool,
    pub(crate) warnings: Vec<DerivationWarning>,
}

impl Track {
    /// Identifier used to correlate log records for this track.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn points(&self) -> &[TrackPoint] {
        &self.points
    }

    pub fn segments(&self) -> &[TrackSegment] {
        &self.segments
    }

    pub fn is_time_aware(&self) -> bool {
        self.time_aware
    }

    pub fn warnings(&self) -> &[DerivationWarning] {
        &self.warnings
    }

    /// Distance from the start at every point, in km. First entry is 0.
    pub fn cumulative_distances_km(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.points.len());
        let mut running_m = 0.0;
        out.push(0.0);
        for segment in &self.segments {
            running_m += segment.distance_m;
            out.push(running_m / 1000.0);
        }
        out
    }

    /// Defined segment speeds converted to km/h.
    pub fn speeds_kmh(&self) -> Vec<f64> {
        self.segments
            .iter()
            .filter_map(|s| s.speed_mps)
            .map(|mps| mps * 3.6)
            .collect()
    }

    /// Arithmetic mean of all latitudes and longitudes.
    pub fn center(&self) -> (f64, f64) {
        let n = self.points.len().max(1) as f64;
        let lat = self.points.iter().map(|p| p.lat).sum::<f64>() / n;
        let lon = self.points.iter().map(|p| p.lon).sum::<f64>() / n;
        (lat, lon)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripSummary {
    pub total_distance_km: f64,
    pub average_speed_kmh: Option<f64>,
    pub total_elevation_gain_m: f64,
}
