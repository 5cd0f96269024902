use crate::geometry::SE3;

use super::CalibrationLookup;

/// Time-indexed extrinsic samples.
///
/// A query resolves to the latest sample at or before the query time, as
/// long as that sample is not older than `max_age_ns`.
#[derive(Debug, Clone)]
pub struct CalibrationTable {
    samples: Vec<(u64, SE3)>,
    max_age_ns: u64,
}

impl CalibrationTable {
    pub fn new(max_age_ns: u64) -> Self {
        Self {
            samples: Vec::new(),
            max_age_ns,
        }
    }

    /// Append a sample. Samples must arrive in non-decreasing time order;
    /// out-of-order samples are ignored.
    pub fn push(&mut self, timestamp_ns: u64, t_body_sensor: SE3) -> bool {
        if let Some(&(last, _)) = self.samples.last() {
            if timestamp_ns < last {
                return false;
            }
        }
        self.samples.push((timestamp_ns, t_body_sensor));
        true
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl CalibrationLookup for CalibrationTable {
    fn resolve(&self, timestamp_ns: u64) -> Option<SE3> {
        let idx = self
            .samples
            .partition_point(|(ts, _)| *ts <= timestamp_ns);
        let (ts, t_body_sensor) = self.samples.get(idx.checked_sub(1)?)?;
        (timestamp_ns - ts <= self.max_age_ns).then_some(*t_body_sensor)
    }
}
