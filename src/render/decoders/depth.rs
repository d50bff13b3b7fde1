//! Depth stream grayscale mapping, one variant per sensor generation.

use super::StreamDecoder;
use crate::error::Result;
use crate::render::bytes::u16_samples;
use crate::render::composite::blit_fitted;
use image::{Rgb, RgbImage};
use serde::Deserialize;

/// Tone mapping constants for the gamma depth variant.
///
/// The defaults are calibrated for the sensor's 16-bit range and must stay
/// bit-compatible with previously rendered recordings.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct DepthToneConfig {
    /// Linear gain applied before clamping
    pub amplification: f32,
    /// Power-law exponent applied to the normalized value
    pub gamma: f32,
}

impl Default for DepthToneConfig {
    fn default() -> Self {
        Self {
            amplification: 1.0,
            gamma: 0.32,
        }
    }
}

/// Full 16-bit range of the depth sensor, used for normalization.
const DEPTH_NORMALIZER: f32 = 65536.0;

/// Gamma-mapped grayscale depth rendering.
///
/// A raw value of 0 is an invalid return and renders black; everything else
/// is normalized, gamma-mapped and replicated across the three channels.
pub struct GammaDepthDecoder {
    config: DepthToneConfig,
    scratch: RgbImage,
}

impl GammaDepthDecoder {
    /// Create a decoder for the given native resolution.
    pub fn new(width: u32, height: u32, config: DepthToneConfig) -> Self {
        Self {
            config,
            scratch: RgbImage::new(width, height),
        }
    }

    #[inline]
    fn tone(&self, value: u16) -> u8 {
        let normalized = value as f32 / DEPTH_NORMALIZER;
        let mapped = self.config.amplification * normalized.powf(self.config.gamma);
        (mapped.min(1.0) * 255.0) as u8
    }
}

impl StreamDecoder for GammaDepthDecoder {
    fn native_width(&self) -> u32 {
        self.scratch.width()
    }

    fn native_height(&self) -> u32 {
        self.scratch.height()
    }

    fn decode(&mut self, raw: &[u8], canvas: &mut RgbImage) -> Result<()> {
        let count = (self.scratch.width() * self.scratch.height()) as usize;
        let tones: Vec<u8> = {
            let samples = u16_samples(raw, count)?;
            samples
                .map(|value| if value == 0 { 0 } else { self.tone(value) })
                .collect()
        };

        for (pixel, intensity) in self.scratch.pixels_mut().zip(tones) {
            *pixel = Rgb([intensity, intensity, intensity]);
        }

        blit_fitted(&self.scratch, canvas);
        Ok(())
    }
}

/// Legacy linear depth rendering: raw value divided by 16 and clamped to
/// the 8-bit range, replicated to gray. Used by the previous sensor
/// generation; not interchangeable with the gamma variant.
pub struct LinearDepthDecoder {
    scratch: RgbImage,
}

impl LinearDepthDecoder {
    /// Create a decoder for the given native resolution.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            scratch: RgbImage::new(width, height),
        }
    }
}

impl StreamDecoder for LinearDepthDecoder {
    fn native_width(&self) -> u32 {
        self.scratch.width()
    }

    fn native_height(&self) -> u32 {
        self.scratch.height()
    }

    fn decode(&mut self, raw: &[u8], canvas: &mut RgbImage) -> Result<()> {
        let count = (self.scratch.width() * self.scratch.height()) as usize;
        let tones: Vec<u8> = u16_samples(raw, count)?
            .map(|value| (value / 16).min(255) as u8)
            .collect();

        for (pixel, intensity) in self.scratch.pixels_mut().zip(tones) {
            *pixel = Rgb([intensity, intensity, intensity]);
        }

        blit_fitted(&self.scratch, canvas);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_from(values: &[u16]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    #[test]
    fn test_gamma_invalid_return_is_black() {
        let mut decoder = GammaDepthDecoder::new(2, 1, DepthToneConfig::default());
        let raw = raw_from(&[0, 30000]);
        let mut canvas = RgbImage::new(2, 1);
        decoder.decode(&raw, &mut canvas).unwrap();
        assert_eq!(canvas.get_pixel(0, 0).0, [0, 0, 0]);
        assert_ne!(canvas.get_pixel(1, 0).0, [0, 0, 0]);
    }

    #[test]
    fn test_gamma_is_monotone_and_gray() {
        let values: Vec<u16> = vec![1, 16, 256, 4096, 20000, 65535];
        let mut decoder = GammaDepthDecoder::new(values.len() as u32, 1, DepthToneConfig::default());
        let raw = raw_from(&values);
        let mut canvas = RgbImage::new(values.len() as u32, 1);
        decoder.decode(&raw, &mut canvas).unwrap();

        let mut previous = 0u8;
        for x in 0..values.len() as u32 {
            let [r, g, b] = canvas.get_pixel(x, 0).0;
            assert_eq!(r, g);
            assert_eq!(g, b);
            assert!(r >= previous, "gamma map must be non-decreasing");
            previous = r;
        }
    }

    #[test]
    fn test_gamma_amplification_clamps() {
        let config = DepthToneConfig {
            amplification: 100.0,
            gamma: 0.32,
        };
        let mut decoder = GammaDepthDecoder::new(1, 1, config);
        let raw = raw_from(&[60000]);
        let mut canvas = RgbImage::new(1, 1);
        decoder.decode(&raw, &mut canvas).unwrap();
        assert_eq!(canvas.get_pixel(0, 0).0, [255, 255, 255]);
    }

    #[test]
    fn test_linear_division_and_clamp() {
        let mut decoder = LinearDepthDecoder::new(3, 1);
        let raw = raw_from(&[0, 1600, 65535]);
        let mut canvas = RgbImage::new(3, 1);
        decoder.decode(&raw, &mut canvas).unwrap();
        assert_eq!(canvas.get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(canvas.get_pixel(1, 0).0, [100, 100, 100]);
        assert_eq!(canvas.get_pixel(2, 0).0, [255, 255, 255]);
    }
}
