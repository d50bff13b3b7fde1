//! Static environment map overlay.

use crate::core::types::{GeometricMap, Pose2D};
use crate::error::Result;
use crate::render::project::{Projector, ProjectorConfig};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;

/// Stroke color for map walls.
const MAP_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

/// Draws the static map around the current robot pose.
///
/// Each wall segment is carried into the egocentric frame and projected
/// with the shared pixel convention, so the map scrolls and rotates under
/// the robot as the pose stream advances.
pub struct MapOverlay {
    projector: Projector,
}

impl MapOverlay {
    /// Create an overlay from projection config.
    pub fn new(config: ProjectorConfig) -> Self {
        Self {
            projector: Projector::new(config),
        }
    }

    /// Draw the map as seen from `pose`. An empty map draws nothing and
    /// still succeeds.
    pub fn render(&self, map: &GeometricMap, pose: &Pose2D, canvas: &mut RgbImage) -> Result<()> {
        let (width, height) = canvas.dimensions();
        for segment in &map.segments {
            let (x0, y0) = self.projector.project_world(pose, &segment.p0, width, height);
            let (x1, y1) = self.projector.project_world(pose, &segment.p1, width, height);
            draw_line_segment_mut(
                canvas,
                (x0 as f32, y0 as f32),
                (x1 as f32, y1 as f32),
                MAP_COLOR,
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::LineSegment;

    fn white_canvas(width: u32, height: u32) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb([255, 255, 255]))
    }

    fn black_pixels(canvas: &RgbImage) -> Vec<(u32, u32)> {
        canvas
            .enumerate_pixels()
            .filter(|(_, _, p)| p.0 == [0, 0, 0])
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    #[test]
    fn test_empty_map_modifies_nothing() {
        let overlay = MapOverlay::new(ProjectorConfig::default());
        let mut canvas = white_canvas(64, 64);
        overlay
            .render(&GeometricMap::new(), &Pose2D::identity(), &mut canvas)
            .unwrap();
        assert!(black_pixels(&canvas).is_empty());
    }

    #[test]
    fn test_wall_ahead_is_drawn_above_origin() {
        let overlay = MapOverlay::new(ProjectorConfig::default());
        // A wall crossing the robot's forward axis, 4m ahead.
        let map = GeometricMap::from_segments(vec![LineSegment::new(4.0, -1.0, 4.0, 1.0)]);
        let mut canvas = white_canvas(640, 480);
        overlay
            .render(&map, &Pose2D::identity(), &mut canvas)
            .unwrap();

        let painted = black_pixels(&canvas);
        assert!(!painted.is_empty());
        for (_, y) in &painted {
            assert!((*y as i32) < 320);
        }
        // Horizontal wall: a single painted row.
        let rows: std::collections::HashSet<u32> = painted.iter().map(|p| p.1).collect();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_pose_translation_moves_wall() {
        let overlay = MapOverlay::new(ProjectorConfig::default());
        let map = GeometricMap::from_segments(vec![LineSegment::new(4.0, -1.0, 4.0, 1.0)]);

        let mut far = white_canvas(640, 480);
        overlay
            .render(&map, &Pose2D::identity(), &mut far)
            .unwrap();
        let mut near = white_canvas(640, 480);
        overlay
            .render(&map, &Pose2D::new(2.0, 0.0, 0.0), &mut near)
            .unwrap();

        let far_row = black_pixels(&far)[0].1;
        let near_row = black_pixels(&near)[0].1;
        // Driving toward the wall brings it closer to the origin row.
        assert!(near_row > far_row);
    }
}
