//! World and robot-frame coordinates to canvas pixel coordinates.
//!
//! One sign/scale convention is shared by every overlay: the robot sits at
//! the horizontal center of the canvas, pushed below the vertical center by
//! a sixth of the canvas height so the forward field of view gets most of
//! the frame. `half_distance` world units span half the canvas extent.

use crate::core::types::{Point2D, Pose2D};
use serde::Deserialize;

/// Projection scale settings.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ProjectorConfig {
    /// World units covered by half the canvas extent
    pub half_distance: f32,
    /// Forward correction for the range-finder mounting position, in meters
    pub forward_offset: f32,
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self {
            half_distance: 10.0,
            forward_offset: 0.2,
        }
    }
}

/// Maps overlay geometry into canvas pixels.
#[derive(Debug, Clone, Copy)]
pub struct Projector {
    half_distance: f32,
    forward_offset: f32,
}

impl Projector {
    /// Create a projector from config.
    pub fn new(config: ProjectorConfig) -> Self {
        Self {
            half_distance: config.half_distance,
            forward_offset: config.forward_offset,
        }
    }

    /// Projection scale in world units per half canvas.
    #[inline]
    pub fn half_distance(&self) -> f32 {
        self.half_distance
    }

    #[inline]
    fn to_pixel(&self, coordinate: f32, extent: u32) -> i32 {
        (coordinate * extent as f32 / (2.0 * self.half_distance)).round() as i32
    }

    /// Horizontal canvas coordinate for a lateral offset, centered.
    #[inline]
    pub fn pixel_x(&self, coordinate: f32, width: u32) -> i32 {
        self.to_pixel(coordinate, width) + width as i32 / 2
    }

    /// Vertical canvas coordinate for a longitudinal offset, centered with
    /// the downward bias.
    #[inline]
    pub fn pixel_y(&self, coordinate: f32, height: u32) -> i32 {
        self.to_pixel(coordinate, height) + height as i32 / 2 + height as i32 / 6
    }

    /// Canvas position of the robot itself.
    #[inline]
    pub fn origin(&self, width: u32, height: u32) -> (i32, i32) {
        (width as i32 / 2, height as i32 / 2 + height as i32 / 6)
    }

    /// Project a robot-egocentric polar reading (laser return).
    ///
    /// Angle zero points forward, which maps to up-canvas.
    pub fn project_polar(&self, angle: f32, range: f32, width: u32, height: u32) -> (i32, i32) {
        (
            self.pixel_x(range * angle.sin(), width),
            self.pixel_y(-range * angle.cos(), height),
        )
    }

    /// Project a world-frame point given the current robot pose.
    ///
    /// The point is carried into the egocentric frame by the pose's rigid
    /// transform, shifted by the range-finder mounting offset, then mapped
    /// with the same convention as the polar projection.
    pub fn project_world(
        &self,
        pose: &Pose2D,
        point: &Point2D,
        width: u32,
        height: u32,
    ) -> (i32, i32) {
        let local = pose.inverse_transform_point(point);
        (
            self.pixel_x(-local.y, width),
            self.pixel_y(-(local.x - self.forward_offset), height),
        )
    }
}

impl Default for Projector {
    fn default() -> Self {
        Self::new(ProjectorConfig::default())
    }
}
