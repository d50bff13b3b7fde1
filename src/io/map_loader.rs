//! Environment map loader.
//!
//! Maps are YAML files holding one `[x0, y0, x1, y1]` entry per wall
//! segment, already in meters. The loaded map is immutable for the rest of
//! the session.

use serde::Deserialize;
use std::path::Path;

use crate::core::types::{GeometricMap, LineSegment};
use crate::error::{Error, Result};

#[derive(Debug, Deserialize)]
struct MapFile {
    /// Wall segments as [x0, y0, x1, y1] in meters
    segments: Vec<[f32; 4]>,
}

/// Load a geometric map from a YAML file.
pub fn load_map(path: impl AsRef<Path>) -> Result<GeometricMap> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read map {}: {}", path.display(), e)))?;

    let file: MapFile = serde_yaml::from_str(&contents)
        .map_err(|e| Error::Config(format!("failed to parse map {}: {}", path.display(), e)))?;

    let segments = file
        .segments
        .iter()
        .map(|s| LineSegment::new(s[0], s[1], s[2], s[3]))
        .collect();

    Ok(GeometricMap::from_segments(segments))
}
