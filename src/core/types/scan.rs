//! Laser range-finder scan type.

use serde::{Deserialize, Serialize};

/// A single laser range-finder sweep in polar form.
///
/// Ranges are ordered from `first_angle` to `last_angle`, one reading every
/// `angular_step` radians. Recorded data occasionally disagrees by one
/// reading with the angular bounds; consumers iterate the ranges that are
/// actually present rather than the count the bounds imply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaserScan {
    /// Angle of the first return in radians
    pub first_angle: f32,
    /// Angle of the last return in radians
    pub last_angle: f32,
    /// Angular distance between consecutive returns in radians
    pub angular_step: f32,
    /// Range readings in meters, ordered by angle
    pub ranges: Vec<f32>,
}

impl LaserScan {
    /// Create a new scan.
    pub fn new(first_angle: f32, last_angle: f32, angular_step: f32, ranges: Vec<f32>) -> Self {
        Self {
            first_angle,
            last_angle,
            angular_step,
            ranges,
        }
    }

    /// Number of range readings.
    #[inline]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Check if the scan holds no readings.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Reading count implied by the angular bounds.
    pub fn expected_len(&self) -> usize {
        if self.angular_step == 0.0 {
            return self.ranges.len();
        }
        (((self.last_angle - self.first_angle) / self.angular_step).round() as isize + 1).max(0)
            as usize
    }

    /// Whether the stored readings agree with the angular bounds,
    /// tolerating the off-by-one seen in recorded data.
    pub fn is_consistent(&self) -> bool {
        let expected = self.expected_len() as isize;
        let actual = self.ranges.len() as isize;
        (expected - actual).abs() <= 1
    }

    /// Iterate over (angle, range) pairs from `first_angle` onwards.
    pub fn iter(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.ranges
            .iter()
            .enumerate()
            .map(move |(i, &range)| (self.first_angle + i as f32 * self.angular_step, range))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_scan_iter_angles() {
        let scan = LaserScan::new(-1.0, 1.0, 0.5, vec![2.0; 5]);
        let pairs: Vec<_> = scan.iter().collect();
        assert_eq!(pairs.len(), 5);
        assert_relative_eq!(pairs[0].0, -1.0);
        assert_relative_eq!(pairs[4].0, 1.0, epsilon = 1e-6);
        assert_relative_eq!(pairs[2].1, 2.0);
    }

    #[test]
    fn test_scan_consistency_tolerates_off_by_one() {
        let exact = LaserScan::new(-1.0, 1.0, 0.1, vec![5.0; 21]);
        assert!(exact.is_consistent());
        let short = LaserScan::new(-1.0, 1.0, 0.1, vec![5.0; 20]);
        assert!(short.is_consistent());
        let broken = LaserScan::new(-1.0, 1.0, 0.1, vec![5.0; 10]);
        assert!(!broken.is_consistent());
    }

    #[test]
    fn test_scan_empty() {
        let scan = LaserScan::new(0.0, 0.0, 0.0, Vec::new());
        assert!(scan.is_empty());
        assert_eq!(scan.iter().count(), 0);
        assert!(scan.is_consistent());
    }
}
