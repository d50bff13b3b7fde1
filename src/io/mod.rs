//! I/O infrastructure: frame stores, record parsing, map loading.

pub mod map_loader;
pub mod records;
pub mod store;

pub use map_loader::load_map;
pub use records::{parse_laser_record, parse_pose_record};
pub use store::{FrameRef, FrameStore, StoreHeader, StoreWriter};
