use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid GPX: {0}")]
    InvalidGpx(String),
    #[error("No track points found in file")]
    EmptyFile,
    #[error("Failed to read GPX file: {0}")]
    Read(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Track has no points")]
    Empty,
    #[error("Point {index} is missing {field}")]
    MissingCoordinate { index: usize, field: &'static str },
    #[error("Point {index} has invalid coordinates ({lat}, {lon})")]
    InvalidCoordinate { index: usize, lat: f64, lon: f64 },
    #[error("Point {index} has implausible elevation {elevation} m")]
    InvalidElevation { index: usize, elevation: f64 },
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("SVG generation failed: {0}")]
    SvgError(String),
    #[error("No {0} data available in this track")]
    MissingData(&'static str),
}

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("PNG rendering failed: {0}")]
    RenderFailed(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Raster(#[from] RasterError),
    #[error("No map tile access token configured")]
    MissingTileToken,
    #[error("Failed to write artifact: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode map data: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("Sample not found: {0}")]
    NotFound(String),
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Parse(ParseError::Read(_)) | AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            AppError::Parse(_) | AppError::Input(_) | AppError::BadRequest(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
