//! Shared resize-and-copy step between native sensor buffers and the
//! destination canvas.

use image::imageops::{self, FilterType};
use image::RgbImage;

/// Copy `src` into `dst`, resizing first when the dimensions differ.
///
/// Every stream decoder ends with this step: the scratch buffer holds the
/// frame at the sensor's native resolution, and the caller's canvas may be
/// any size. Resizing policy is delegated to the image library (bilinear).
pub fn blit_fitted(src: &RgbImage, dst: &mut RgbImage) {
    if src.dimensions() == dst.dimensions() {
        imageops::replace(dst, src, 0, 0);
    } else {
        let resized = imageops::resize(src, dst.width(), dst.height(), FilterType::Triangle);
        imageops::replace(dst, &resized, 0, 0);
    }
}
