//! Static environment map made of line segments.

use super::pose::Point2D;
use serde::{Deserialize, Serialize};

/// One wall segment of the environment map, endpoints in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    /// First endpoint
    pub p0: Point2D,
    /// Second endpoint
    pub p1: Point2D,
}

impl LineSegment {
    /// Create a segment from endpoint coordinates.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            p0: Point2D::new(x0, y0),
            p1: Point2D::new(x1, y1),
        }
    }
}

/// Static polyline map of the recording environment.
///
/// Loaded once, in meters, and read-only for the lifetime of a replay
/// session. An empty map is valid and renders nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeometricMap {
    /// Wall segments in world coordinates
    pub segments: Vec<LineSegment>,
}

impl GeometricMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a map from segments.
    pub fn from_segments(segments: Vec<LineSegment>) -> Self {
        Self { segments }
    }

    /// Number of segments.
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if the map has no segments.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_map() {
        let map = GeometricMap::new();
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
    }

    #[test]
    fn test_segment_endpoints() {
        let seg = LineSegment::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(seg.p0, Point2D::new(1.0, 2.0));
        assert_eq!(seg.p1, Point2D::new(3.0, 4.0));
    }
}
