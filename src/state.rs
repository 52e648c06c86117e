use std::sync::Arc;

use crate::config::Config;
use crate::types::artifact::ArtifactConfig;

/// Read-only process configuration shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    artifacts: Arc<ArtifactConfig>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let artifacts = config.artifact_config();
        Self {
            config: Arc::new(config),
            artifacts: Arc::new(artifacts),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn artifacts(&self) -> Arc<ArtifactConfig> {
        Arc::clone(&self.artifacts)
    }
}
