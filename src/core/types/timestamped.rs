//! Generic timestamp wrapper.

use serde::{Deserialize, Serialize};

/// A value paired with its recording timestamp.
///
/// Timestamps are microseconds since epoch, matching the frame store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timestamped<T> {
    /// The wrapped data
    pub data: T,
    /// Timestamp in microseconds since epoch
    pub timestamp_us: u64,
}

impl<T> Timestamped<T> {
    /// Wrap a value with a timestamp.
    #[inline]
    pub fn new(data: T, timestamp_us: u64) -> Self {
        Self { data, timestamp_us }
    }

    /// Map the inner data while keeping the timestamp.
    #[inline]
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Timestamped<U> {
        Timestamped {
            data: f(self.data),
            timestamp_us: self.timestamp_us,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_keeps_timestamp() {
        let ts = Timestamped::new(21u32, 500);
        let doubled = ts.map(|v| v * 2);
        assert_eq!(doubled.data, 42);
        assert_eq!(doubled.timestamp_us, 500);
    }
}
