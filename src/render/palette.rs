//! Fixed colorization palette for the body-index stream.

/// Shared color index for body colorization. The first detected body always
/// gets the same color, and so on; index values outside the palette mean
/// "no body" and render black.
pub const BODY_PALETTE: [[u8; 3]; 6] = [
    [255, 0, 0],
    [0, 255, 0],
    [0, 0, 255],
    [255, 255, 0],
    [255, 0, 255],
    [0, 255, 255],
];

/// Palette lookup for a raw body-index value.
///
/// Returns `None` for values outside `[0, 5]`.
#[inline]
pub fn body_color(index: i8) -> Option<[u8; 3]> {
    if (0..=5).contains(&index) {
        Some(BODY_PALETTE[index as usize])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_indices_map_to_palette() {
        for i in 0..6i8 {
            assert_eq!(body_color(i), Some(BODY_PALETTE[i as usize]));
        }
    }

    #[test]
    fn test_out_of_range_indices_are_none() {
        assert_eq!(body_color(-1), None);
        assert_eq!(body_color(-128), None);
        assert_eq!(body_color(6), None);
        assert_eq!(body_color(127), None);
    }
}
