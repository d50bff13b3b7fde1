//! Foundation data types.

mod map;
mod pose;
mod scan;
mod timestamped;

pub use map::{GeometricMap, LineSegment};
pub use pose::{Point2D, Pose2D};
pub use scan::LaserScan;
pub use timestamped::Timestamped;
