//! Fixed-size entity record iteration for multi-entity frames.
//!
//! Skeleton and face frames carry `N` detected entities as consecutive
//! fixed-size records in one raw buffer. The iterator guarantees correct
//! slicing; drawing one entity is delegated through [`EntityRenderer`].

use crate::error::Result;
use crate::render::bytes::read_i32_le;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_circle_mut;

/// Iterator over the `N` fixed-size entity records of a raw buffer.
///
/// Yields at most `count` slices of `record_size` bytes each; a buffer
/// shorter than `count * record_size` simply ends the iteration early
/// rather than slicing out of bounds.
pub struct SubFrames<'a> {
    buffer: &'a [u8],
    record_size: usize,
    count: usize,
    index: usize,
}

impl<'a> SubFrames<'a> {
    /// Create an iterator over `count` records of `record_size` bytes.
    pub fn new(buffer: &'a [u8], record_size: usize, count: usize) -> Self {
        Self {
            buffer,
            record_size,
            count,
            index: 0,
        }
    }
}

impl<'a> Iterator for SubFrames<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.count || self.record_size == 0 {
            return None;
        }
        let start = self.index * self.record_size;
        let end = start + self.record_size;
        if end > self.buffer.len() {
            return None;
        }
        self.index += 1;
        Some(&self.buffer[start..end])
    }
}

/// Draws one entity from its fixed-size record.
pub trait EntityRenderer {
    /// Size of one entity record in bytes.
    fn record_size(&self) -> usize;

    /// Draw a single entity record into the canvas.
    fn draw(&self, record: &[u8], canvas: &mut RgbImage) -> Result<()>;
}

/// Render every entity of a multi-entity frame.
///
/// An entity count of zero is a successful empty render.
pub fn render_entities<R: EntityRenderer>(
    renderer: &R,
    buffer: &[u8],
    count: usize,
    canvas: &mut RgbImage,
) -> Result<()> {
    for record in SubFrames::new(buffer, renderer.record_size(), count) {
        renderer.draw(record, canvas)?;
    }
    Ok(())
}

/// Minimal entity renderer: a hollow circle marker per detected entity.
///
/// Records are 12 bytes, three little-endian i32 fields `(x, y, size)` in
/// native sensor pixels; the marker lands at half scale, as the recordings
/// store coordinates for the double-resolution camera frame.
pub struct MarkerRenderer;

impl MarkerRenderer {
    const RECORD_SIZE: usize = 12;
    const COLOR: Rgb<u8> = Rgb([0, 255, 0]);
}

impl EntityRenderer for MarkerRenderer {
    fn record_size(&self) -> usize {
        Self::RECORD_SIZE
    }

    fn draw(&self, record: &[u8], canvas: &mut RgbImage) -> Result<()> {
        let x = read_i32_le(record, 0)?;
        let y = read_i32_le(record, 4)?;
        let size = read_i32_le(record, 8)?;
        draw_hollow_circle_mut(canvas, (x / 2, y / 2), size / 2, Self::COLOR);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slicing_is_contiguous() {
        let buffer: Vec<u8> = (0u8..12).collect();
        let records: Vec<_> = SubFrames::new(&buffer, 4, 3).collect();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0], &[0, 1, 2, 3]);
        assert_eq!(records[1], &[4, 5, 6, 7]);
        assert_eq!(records[2], &[8, 9, 10, 11]);
    }

    #[test]
    fn test_zero_count_yields_nothing() {
        let buffer = [1u8, 2, 3, 4];
        assert_eq!(SubFrames::new(&buffer, 4, 0).count(), 0);
    }

    #[test]
    fn test_short_buffer_stops_early() {
        let buffer = [0u8; 10];
        assert_eq!(SubFrames::new(&buffer, 4, 3).count(), 2);
    }

    #[test]
    fn test_render_zero_entities_touches_no_pixel() {
        let mut canvas = RgbImage::new(16, 16);
        render_entities(&MarkerRenderer, &[], 0, &mut canvas).unwrap();
        assert!(canvas.pixels().all(|p| p.0 == [0, 0, 0]));
    }

    #[test]
    fn test_marker_renderer_draws_circle() {
        let mut canvas = RgbImage::new(32, 32);
        let mut record = Vec::new();
        record.extend_from_slice(&20i32.to_le_bytes());
        record.extend_from_slice(&20i32.to_le_bytes());
        record.extend_from_slice(&8i32.to_le_bytes());
        render_entities(&MarkerRenderer, &record, 1, &mut canvas).unwrap();
        // Circle centered at (10, 10) with radius 4.
        assert_eq!(canvas.get_pixel(14, 10).0, [0, 255, 0]);
        assert_eq!(canvas.get_pixel(10, 10).0, [0, 0, 0]);
    }
}
