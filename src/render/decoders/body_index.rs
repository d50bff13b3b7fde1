//! Body-index stream colorization.

use super::StreamDecoder;
use crate::error::Result;
use crate::render::bytes::i8_samples;
use crate::render::composite::blit_fitted;
use crate::render::palette::body_color;
use image::{Rgb, RgbImage};

/// Colorizes the body-index stream: one signed byte per pixel, palette
/// color for tracked body slots, black everywhere else.
pub struct BodyIndexDecoder {
    scratch: RgbImage,
}

impl BodyIndexDecoder {
    /// Create a decoder for the given native resolution.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            scratch: RgbImage::new(width, height),
        }
    }
}

impl StreamDecoder for BodyIndexDecoder {
    fn native_width(&self) -> u32 {
        self.scratch.width()
    }

    fn native_height(&self) -> u32 {
        self.scratch.height()
    }

    fn decode(&mut self, raw: &[u8], canvas: &mut RgbImage) -> Result<()> {
        let count = (self.scratch.width() * self.scratch.height()) as usize;
        let samples = i8_samples(raw, count)?;

        for (pixel, index) in self.scratch.pixels_mut().zip(samples) {
            *pixel = match body_color(index) {
                Some(color) => Rgb(color),
                None => Rgb([0, 0, 0]),
            };
        }

        blit_fitted(&self.scratch, canvas);
        Ok(())
    }
}
