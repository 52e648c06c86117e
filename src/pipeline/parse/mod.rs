mod gpx;

use std::path::Path;

use crate::error::ParseError;
use crate::types::track::RawPoint;

/// Parses GPX bytes into raw points, all tracks and segments flattened.
pub fn parse(bytes: &[u8]) -> Result<Vec<RawPoint>, ParseError> {
    gpx::parse_gpx(bytes)
}

pub fn parse_file(path: &Path) -> Result<Vec<RawPoint>, ParseError> {
    let bytes = std::fs::read(path)?;
    parse(&bytes)
}
