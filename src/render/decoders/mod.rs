//! Modality-specific raw-sample decoders.
//!
//! Each decoder turns one modality's raw byte buffer into RGB pixels at the
//! sensor's native resolution, then fits the result into the caller's
//! canvas. A decoder is selected at construction time from the declared
//! stream type; it owns a native-resolution scratch buffer that is sized
//! once and never reallocated.

mod body_index;
mod color;
mod depth;
mod infrared;

pub use body_index::BodyIndexDecoder;
pub use color::{BgraColorDecoder, YuyvColorDecoder};
pub use depth::{DepthToneConfig, GammaDepthDecoder, LinearDepthDecoder};
pub use infrared::{InfraredConfig, InfraredDecoder, InfraredStyle};

use crate::error::Result;
use image::RgbImage;

/// Native depth/infrared/body-index resolution of the current sensor
/// generation.
pub const DEPTH_WIDTH: u32 = 512;
/// See [`DEPTH_WIDTH`].
pub const DEPTH_HEIGHT: u32 = 424;

/// Native color camera resolution of the current sensor generation.
pub const COLOR_WIDTH: u32 = 1920;
/// See [`COLOR_WIDTH`].
pub const COLOR_HEIGHT: u32 = 1080;

/// Native resolution shared by the legacy sensor generation's depth and
/// color cameras.
pub const LEGACY_WIDTH: u32 = 640;
/// See [`LEGACY_WIDTH`].
pub const LEGACY_HEIGHT: u32 = 480;

/// Per-frame pixel conversion for one modality.
pub trait StreamDecoder {
    /// Native sensor width in pixels.
    fn native_width(&self) -> u32;

    /// Native sensor height in pixels.
    fn native_height(&self) -> u32;

    /// Decode one raw sample and write the result into the canvas.
    ///
    /// The raw buffer is borrowed for this call only. On error the canvas
    /// holds whatever was written before the failure; the render boundary
    /// decides whether to surface or suppress it.
    fn decode(&mut self, raw: &[u8], canvas: &mut RgbImage) -> Result<()>;
}
