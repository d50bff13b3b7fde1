//! Parsers for text-encoded sample records.
//!
//! Localization and laser samples are recorded as small JSON documents;
//! they are parsed into engine types before any rendering logic runs. A
//! malformed record makes the render call report failure for that frame and
//! leaves the canvas untouched.

use serde::Deserialize;

use crate::core::types::{LaserScan, Pose2D};
use crate::error::{Error, Result};

#[derive(Debug, Deserialize)]
struct PoseRecord {
    x: f32,
    y: f32,
    o: f32,
}

/// Parse a localization record: `{"x":..,"y":..,"o":..}`.
pub fn parse_pose_record(text: &str) -> Result<Pose2D> {
    let record: PoseRecord = serde_json::from_str(text)
        .map_err(|e| Error::MalformedRecord(format!("pose record: {}", e)))?;
    Ok(Pose2D::new(record.x, record.y, record.o))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct LaserRecord {
    first_angle: f32,
    last_angle: f32,
    step: f32,
    nb_echos: i64,
    laser_map: Vec<f32>,
}

/// Parse a laser sweep record.
///
/// The recorded echo count occasionally disagrees with the range list by
/// one entry; the ranges that are actually present win.
pub fn parse_laser_record(text: &str) -> Result<LaserScan> {
    let record: LaserRecord = serde_json::from_str(text)
        .map_err(|e| Error::MalformedRecord(format!("laser record: {}", e)))?;

    let declared = record.nb_echos;
    let actual = record.laser_map.len() as i64;
    if (declared - actual).abs() > 1 {
        log::debug!(
            "laser record declares {} echos but carries {} ranges",
            declared,
            actual
        );
    }

    Ok(LaserScan::new(
        record.first_angle,
        record.last_angle,
        record.step,
        record.laser_map,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_pose_record() {
        let pose = parse_pose_record(r#"{"x":1.5,"y":-2.0,"o":0.7}"#).unwrap();
        assert_relative_eq!(pose.x, 1.5);
        assert_relative_eq!(pose.y, -2.0);
        assert_relative_eq!(pose.theta, 0.7);
    }

    #[test]
    fn test_malformed_pose_record() {
        assert!(parse_pose_record("{\"x\":1.5}").is_err());
        assert!(parse_pose_record("not json at all").is_err());
    }

    #[test]
    fn test_parse_laser_record() {
        let text = r#"{"FirstAngle":-1.0,"LastAngle":1.0,"Step":0.5,"NbEchos":5,"LaserMap":[1.0,2.0,3.0,4.0,5.0]}"#;
        let scan = parse_laser_record(text).unwrap();
        assert_relative_eq!(scan.first_angle, -1.0);
        assert_relative_eq!(scan.angular_step, 0.5);
        assert_eq!(scan.ranges.len(), 5);
    }

    #[test]
    fn test_laser_record_tolerates_off_by_one() {
        let text = r#"{"FirstAngle":0.0,"LastAngle":1.0,"Step":0.5,"NbEchos":4,"LaserMap":[1.0,2.0,3.0]}"#;
        let scan = parse_laser_record(text).unwrap();
        assert_eq!(scan.ranges.len(), 3);
    }

    #[test]
    fn test_malformed_laser_record() {
        assert!(parse_laser_record(r#"{"FirstAngle":0.0}"#).is_err());
    }
}
