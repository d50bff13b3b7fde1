//! Vector and scalar overlays drawn on top of the camera layers.

mod laser;
mod map;
mod pose;

pub use laser::{DrawingMode, LaserOverlay, LaserOverlayConfig};
pub use map::MapOverlay;
pub use pose::{format_pose_label, PoseOverlay, PoseOverlayConfig};
