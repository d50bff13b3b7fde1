//! Infrared stream rendering.

use super::StreamDecoder;
use crate::error::Result;
use crate::render::bytes::u16_samples;
use crate::render::composite::blit_fitted;
use image::{Rgb, RgbImage};
use serde::Deserialize;

/// Infrared normalization range. The sensor's useful signal sits well below
/// the full 16-bit range, so values are normalized against 8192.
const INFRARED_NORMALIZER: f32 = 8192.0;

/// Rendering style for the infrared stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InfraredStyle {
    /// Green intensity ramp over a blue base; the raw-0 sentinel renders
    /// plain blue so invalid/near returns stay distinguishable from dark
    /// signal.
    #[default]
    Ramp,
    /// Perceptual false-color palette over the gamma-mapped intensity.
    FalseColor,
}

/// Infrared tone and style settings.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct InfraredConfig {
    /// Linear gain applied before clamping
    pub amplification: f32,
    /// Power-law exponent applied to the normalized value
    pub gamma: f32,
    /// Output colorization style
    pub style: InfraredStyle,
}

impl Default for InfraredConfig {
    fn default() -> Self {
        Self {
            amplification: 1.0,
            gamma: 0.32,
            style: InfraredStyle::Ramp,
        }
    }
}

/// Decodes the 16-bit infrared stream with a selectable colorization style.
pub struct InfraredDecoder {
    config: InfraredConfig,
    scratch: RgbImage,
}

impl InfraredDecoder {
    /// Create a decoder for the given native resolution.
    pub fn new(width: u32, height: u32, config: InfraredConfig) -> Self {
        Self {
            config,
            scratch: RgbImage::new(width, height),
        }
    }

    #[inline]
    fn tone(&self, value: u16) -> u8 {
        let normalized = value as f32 / INFRARED_NORMALIZER;
        let mapped = self.config.amplification * normalized.powf(self.config.gamma);
        (mapped.min(1.0) * 255.0) as u8
    }
}

impl StreamDecoder for InfraredDecoder {
    fn native_width(&self) -> u32 {
        self.scratch.width()
    }

    fn native_height(&self) -> u32 {
        self.scratch.height()
    }

    fn decode(&mut self, raw: &[u8], canvas: &mut RgbImage) -> Result<()> {
        let count = (self.scratch.width() * self.scratch.height()) as usize;
        let style = self.config.style;
        let colors: Vec<Rgb<u8>> = {
            let samples = u16_samples(raw, count)?;
            samples
                .map(|value| match style {
                    InfraredStyle::Ramp => {
                        if value == 0 {
                            Rgb([0, 0, 255])
                        } else {
                            Rgb([0, self.tone(value), 255])
                        }
                    }
                    InfraredStyle::FalseColor => jet(self.tone(value)),
                })
                .collect()
        };

        for (pixel, color) in self.scratch.pixels_mut().zip(colors) {
            *pixel = color;
        }

        blit_fitted(&self.scratch, canvas);
        Ok(())
    }
}

/// Classic jet false-color ramp: dark blue through cyan, yellow and red.
fn jet(intensity: u8) -> Rgb<u8> {
    let t = intensity as f32 / 255.0;
    let channel = |center: f32| ((1.5 - (4.0 * t - center).abs()).clamp(0.0, 1.0) * 255.0) as u8;
    Rgb([channel(3.0), channel(2.0), channel(1.0)])
}
