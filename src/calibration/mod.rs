//! Extrinsic calibration lookup (sensor frame → body frame).
//!
//! The front-end asks for the extrinsic at each trigger timestamp. A lookup
//! may legitimately fail (calibration chain not yet available), in which
//! case the triggering frame is dropped.

pub mod table;

pub use table::CalibrationTable;

use crate::geometry::SE3;

/// Time-indexed provider of the sensor-to-body transform (`T_body_sensor`).
pub trait CalibrationLookup {
    /// Transform valid at `timestamp_ns`, or `None` if it cannot be resolved.
    fn resolve(&self, timestamp_ns: u64) -> Option<SE3>;
}

impl<F> CalibrationLookup for F
where
    F: Fn(u64) -> Option<SE3>,
{
    fn resolve(&self, timestamp_ns: u64) -> Option<SE3> {
        self(timestamp_ns)
    }
}

/// Fixed extrinsic, optionally only available from `valid_from_ns` onwards.
#[derive(Debug, Clone)]
pub struct StaticCalibration {
    t_body_sensor: SE3,
    valid_from_ns: Option<u64>,
}

impl StaticCalibration {
    pub fn new(t_body_sensor: SE3) -> Self {
        Self {
            t_body_sensor,
            valid_from_ns: None,
        }
    }

    /// Lookups before `timestamp_ns` fail.
    pub fn valid_from(mut self, timestamp_ns: u64) -> Self {
        self.valid_from_ns = Some(timestamp_ns);
        self
    }
}

impl CalibrationLookup for StaticCalibration {
    fn resolve(&self, timestamp_ns: u64) -> Option<SE3> {
        match self.valid_from_ns {
            Some(start) if timestamp_ns < start => None,
            _ => Some(self.t_body_sensor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn test_static_calibration_always_resolves() {
        let t = SE3::from_translation(Vector3::new(0.1, 0.0, 0.2));
        let calib = StaticCalibration::new(t);

        assert_eq!(calib.resolve(0), Some(t));
        assert_eq!(calib.resolve(u64::MAX), Some(t));
    }

    #[test]
    fn test_static_calibration_valid_from() {
        let calib = StaticCalibration::new(SE3::identity()).valid_from(100);

        assert_eq!(calib.resolve(99), None);
        assert!(calib.resolve(100).is_some());
    }

    #[test]
    fn test_closure_lookup() {
        let lookup = |ts: u64| (ts % 2 == 0).then(SE3::identity);

        assert!(lookup.resolve(4).is_some());
        assert!(lookup.resolve(5).is_none());
    }
}
