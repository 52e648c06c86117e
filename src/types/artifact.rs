use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::types::track::TripSummary;

pub const MAP_FILE: &str = "maps/map.html";
pub const ELEVATION_PLOT_FILE: &str = "images/elevation_plot.png";
pub const SPEED_PLOT_FILE: &str = "images/speed_distribution_plot.png";

/// Everything a renderer needs besides the track itself.
#[derive(Debug, Clone)]
pub struct ArtifactConfig {
    pub output_dir: PathBuf,
    pub tile_token: Option<String>,
}

impl ArtifactConfig {
    pub fn new(output_dir: impl Into<PathBuf>, tile_token: Option<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            tile_token,
        }
    }

    pub fn map_path(&self) -> PathBuf {
        self.output_dir.join(MAP_FILE)
    }

    pub fn elevation_plot_path(&self) -> PathBuf {
        self.output_dir.join(ELEVATION_PLOT_FILE)
    }

    pub fn speed_plot_path(&self) -> PathBuf {
        self.output_dir.join(SPEED_PLOT_FILE)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapArtifact {
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageArtifact {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Raster output settings for a plot.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub width: u32,
    pub height: u32,
    pub background: Option<(u8, u8, u8, u8)>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
            background: Some((255, 255, 255, 255)),
        }
    }
}

/// Summary plus whichever artifacts could be produced.
#[derive(Debug, Clone, Serialize)]
pub struct TripReport {
    pub summary: TripSummary,
    pub map: Option<MapArtifact>,
    pub elevation_profile: Option<ImageArtifact>,
    pub speed_distribution: Option<ImageArtifact>,
}
