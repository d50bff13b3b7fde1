//! Laser range-finder overlay.

use crate::core::types::LaserScan;
use crate::error::Result;
use crate::render::project::{Projector, ProjectorConfig};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};
use serde::Deserialize;

/// How laser returns are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawingMode {
    /// Consecutive returns joined by segments, closed back to the robot
    /// origin at both ends.
    #[default]
    PointToLine,
    /// One unconnected dot per return.
    PointCloud,
}

/// Laser overlay settings.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct LaserOverlayConfig {
    /// Drawing mode for the returns
    pub mode: DrawingMode,
    /// Also draw the camera field-of-view rays
    pub draw_fov: bool,
    /// Projection scale
    pub projector: ProjectorConfig,
}

/// Stroke color for laser returns.
const SCAN_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
/// Stroke color for the field-of-view rays.
const FOV_COLOR: Rgb<u8> = Rgb([0, 255, 0]);

/// Horizontal field of view of the depth/infrared camera, degrees.
const DEPTH_FOV_DEG: f32 = 70.6;
/// Range at which the depth field-of-view rays end, in world units.
const DEPTH_VIEW_RANGE: f32 = 4.5;
/// Horizontal field of view of the color camera, degrees.
const COLOR_FOV_DEG: f32 = 87.5;

/// Draws a laser sweep around the robot origin.
///
/// Returns are projected as-is; out-of-range or sentinel maximum values are
/// not clamped, which can fan artifacts outside the visible square.
pub struct LaserOverlay {
    mode: DrawingMode,
    draw_fov: bool,
    projector: Projector,
}

impl LaserOverlay {
    /// Create an overlay from config.
    pub fn new(config: LaserOverlayConfig) -> Self {
        Self {
            mode: config.mode,
            draw_fov: config.draw_fov,
            projector: Projector::new(config.projector),
        }
    }

    /// Draw one scan into the canvas.
    pub fn render(&self, scan: &LaserScan, canvas: &mut RgbImage) -> Result<()> {
        let (width, height) = canvas.dimensions();
        let origin = self.projector.origin(width, height);

        if self.draw_fov {
            self.render_fov(origin, canvas);
        }

        match self.mode {
            DrawingMode::PointToLine => {
                let mut previous = origin;
                for (angle, range) in scan.iter() {
                    let current = self.projector.project_polar(angle, range, width, height);
                    line(canvas, previous, current, SCAN_COLOR);
                    previous = current;
                }
                line(canvas, previous, origin, SCAN_COLOR);
            }
            DrawingMode::PointCloud => {
                for (angle, range) in scan.iter() {
                    let (x, y) = self.projector.project_polar(angle, range, width, height);
                    draw_filled_circle_mut(canvas, (x, y), 2, SCAN_COLOR);
                }
            }
        }

        Ok(())
    }

    fn render_fov(&self, origin: (i32, i32), canvas: &mut RgbImage) {
        let (width, height) = canvas.dimensions();
        for side in [-0.5f32, 0.5f32] {
            let depth_end = self.projector.project_polar(
                side * DEPTH_FOV_DEG.to_radians(),
                DEPTH_VIEW_RANGE,
                width,
                height,
            );
            line(canvas, origin, depth_end, FOV_COLOR);

            let color_end = self.projector.project_polar(
                side * COLOR_FOV_DEG.to_radians(),
                self.projector.half_distance(),
                width,
                height,
            );
            line(canvas, origin, color_end, FOV_COLOR);
        }
    }
}

fn line(canvas: &mut RgbImage, from: (i32, i32), to: (i32, i32), color: Rgb<u8>) {
    draw_line_segment_mut(
        canvas,
        (from.0 as f32, from.1 as f32),
        (to.0 as f32, to.1 as f32),
        color,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red_pixels(canvas: &RgbImage) -> Vec<(u32, u32)> {
        canvas
            .enumerate_pixels()
            .filter(|(_, _, p)| p.0 == [255, 0, 0])
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    #[test]
    fn test_single_return_closed_path() {
        let overlay = LaserOverlay::new(LaserOverlayConfig::default());
        let scan = LaserScan::new(0.0, 0.0, 0.1, vec![5.0]);
        let mut canvas = RgbImage::new(640, 480);
        overlay.render(&scan, &mut canvas).unwrap();

        let painted = red_pixels(&canvas);
        // Origin and the projected return are both on the path.
        assert!(painted.contains(&(320, 320)));
        assert!(painted.contains(&(320, 200)));
        // A straight vertical run: every row between them is painted.
        for y in 200..=320 {
            assert!(painted.contains(&(320, y)));
        }
    }

    #[test]
    fn test_single_return_point_cloud_single_dot() {
        let config = LaserOverlayConfig {
            mode: DrawingMode::PointCloud,
            ..LaserOverlayConfig::default()
        };
        let overlay = LaserOverlay::new(config);
        let scan = LaserScan::new(0.0, 0.0, 0.1, vec![5.0]);
        let mut canvas = RgbImage::new(640, 480);
        overlay.render(&scan, &mut canvas).unwrap();

        let painted = red_pixels(&canvas);
        assert!(!painted.is_empty());
        // One dot of radius 2: everything sits within 2px of the return.
        for (x, y) in &painted {
            assert!((*x as i32 - 320).abs() <= 2);
            assert!((*y as i32 - 200).abs() <= 2);
        }
        // The origin is untouched in point-cloud mode.
        assert!(!painted.contains(&(320, 320)));
    }

    #[test]
    fn test_symmetric_fan_stays_in_bounds() {
        let overlay = LaserOverlay::new(LaserOverlayConfig::default());
        let scan = LaserScan::new(-1.0, 1.0, 0.1, vec![5.0; 21]);
        let mut canvas = RgbImage::new(640, 480);
        overlay.render(&scan, &mut canvas).unwrap();

        let painted = red_pixels(&canvas);
        assert!(!painted.is_empty());
        assert!(painted.contains(&(320, 320)));

        let min_x = painted.iter().map(|p| p.0).min().unwrap();
        let max_x = painted.iter().map(|p| p.0).max().unwrap();
        let min_y = painted.iter().map(|p| p.1).min().unwrap();
        let max_y = painted.iter().map(|p| p.1).max().unwrap();

        // The fan is well inside the canvas.
        assert!(min_x > 0 && max_x < 639);
        assert!(min_y > 0 && max_y < 479);
        // Symmetric sweep: horizontal extent is centered on the origin column.
        assert!(((min_x as i32 - 320) + (max_x as i32 - 320)).abs() <= 1);
        // The fan opens upward from the origin row.
        assert_eq!(max_y, 320);
        assert!(min_y < 250);
    }

    #[test]
    fn test_fov_rays_drawn_when_enabled() {
        let config = LaserOverlayConfig {
            draw_fov: true,
            ..LaserOverlayConfig::default()
        };
        let overlay = LaserOverlay::new(config);
        let scan = LaserScan::new(0.0, 0.0, 0.1, Vec::new());
        let mut canvas = RgbImage::new(640, 480);
        overlay.render(&scan, &mut canvas).unwrap();
        assert!(canvas.pixels().any(|p| p.0 == [0, 255, 0]));
    }
}
