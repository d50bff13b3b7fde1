//! Localization overlay: pose label plus the canvas mirror step.

use crate::core::types::Pose2D;
use crate::error::{Error, Result};
use ab_glyph::{FontArc, PxScale};
use image::imageops;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};
use serde::Deserialize;
use std::path::PathBuf;

/// Pose overlay settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PoseOverlayConfig {
    /// TrueType font file for the label; the label is skipped without one
    pub font_path: Option<PathBuf>,
    /// Label pixel height (0 selects the default)
    pub text_scale: f32,
}

/// Label color.
const TEXT_COLOR: Rgb<u8> = Rgb([0, 0, 0]);
/// Default label pixel height.
const DEFAULT_TEXT_SCALE: f32 = 16.0;
/// Top margin of the label in pixels.
const TEXT_TOP: i32 = 5;

/// Renders the numeric pose as a label near the top of the canvas, then
/// mirrors the whole canvas horizontally.
///
/// The mirror runs exactly once per render call: the display pipeline flips
/// every composed frame before showing it, and the two flips cancel so the
/// label reads correctly while the sensor geometry keeps the orientation of
/// the other overlays.
pub struct PoseOverlay {
    font: Option<FontArc>,
    scale: PxScale,
}

impl PoseOverlay {
    /// Create an overlay, loading the label font when one is configured.
    pub fn new(config: &PoseOverlayConfig) -> Result<Self> {
        let font = match &config.font_path {
            Some(path) => {
                let bytes = std::fs::read(path).map_err(|e| {
                    Error::Config(format!("failed to read font {}: {}", path.display(), e))
                })?;
                let font = FontArc::try_from_vec(bytes).map_err(|e| {
                    Error::Config(format!("failed to parse font {}: {}", path.display(), e))
                })?;
                Some(font)
            }
            None => None,
        };
        let scale = if config.text_scale > 0.0 {
            config.text_scale
        } else {
            DEFAULT_TEXT_SCALE
        };
        Ok(Self {
            font,
            scale: PxScale::from(scale),
        })
    }

    /// An overlay without a label font; only the mirror step runs.
    pub fn without_font() -> Self {
        Self {
            font: None,
            scale: PxScale::from(DEFAULT_TEXT_SCALE),
        }
    }

    /// Draw the pose label and mirror the canvas.
    pub fn render(&self, pose: &Pose2D, canvas: &mut RgbImage) -> Result<()> {
        if let Some(font) = &self.font {
            let label = format_pose_label(pose);
            let (text_width, _) = text_size(self.scale, font, &label);
            let x = canvas.width() as i32 / 2 - text_width as i32 / 2;
            draw_text_mut(canvas, TEXT_COLOR, x, TEXT_TOP, self.scale, font, &label);
        } else {
            log::debug!("pose label skipped: no font configured");
        }

        imageops::flip_horizontal_in_place(canvas);
        Ok(())
    }
}

/// Format a pose the way the recording tools print it.
pub fn format_pose_label(pose: &Pose2D) -> String {
    format!("X={:.3} Y={:.3} O={:.3}", pose.x, pose.y, pose.theta)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_format() {
        let pose = Pose2D::new(1.5, -2.25, 0.5);
        assert_eq!(format_pose_label(&pose), "X=1.500 Y=-2.250 O=0.500");
    }

    #[test]
    fn test_render_mirrors_canvas() {
        let overlay = PoseOverlay::without_font();
        let mut canvas = RgbImage::new(8, 4);
        canvas.put_pixel(0, 0, Rgb([255, 0, 0]));
        overlay.render(&Pose2D::identity(), &mut canvas).unwrap();
        assert_eq!(canvas.get_pixel(7, 0).0, [255, 0, 0]);
        assert_eq!(canvas.get_pixel(0, 0).0, [0, 0, 0]);
    }

    #[test]
    fn test_double_render_cancels_mirror() {
        let overlay = PoseOverlay::without_font();
        let mut canvas = RgbImage::new(8, 4);
        canvas.put_pixel(2, 1, Rgb([0, 0, 255]));
        let reference = canvas.clone();
        overlay.render(&Pose2D::identity(), &mut canvas).unwrap();
        overlay.render(&Pose2D::identity(), &mut canvas).unwrap();
        assert_eq!(canvas.as_raw(), reference.as_raw());
    }

    #[test]
    fn test_missing_font_file_is_config_error() {
        let config = PoseOverlayConfig {
            font_path: Some(PathBuf::from("/nonexistent/font.ttf")),
            text_scale: 0.0,
        };
        assert!(PoseOverlay::new(&config).is_err());
    }
}
