use std::path::PathBuf;

use crate::types::artifact::ArtifactConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub max_file_size: usize,
    pub output_dir: PathBuf,
    pub sample_dir: PathBuf,
    pub mapbox_token: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let max_file_size_mb = std::env::var("MAX_FILE_SIZE_MB")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(25);

        let output_dir = std::env::var("OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("static"));

        let sample_dir = std::env::var("SAMPLE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("static").join("sample_gpx_files"));

        let mapbox_token = std::env::var("MAPBOX_ACCESS_TOKEN")
            .ok()
            .filter(|s| !s.trim().is_empty());

        Self {
            port,
            max_file_size: max_file_size_mb * 1024 * 1024,
            output_dir,
            sample_dir,
            mapbox_token,
        }
    }

    pub fn artifact_config(&self) -> ArtifactConfig {
        ArtifactConfig::new(self.output_dir.clone(), self.mapbox_token.clone())
    }
}
