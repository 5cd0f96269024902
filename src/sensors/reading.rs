//! Sensor readings attachable to a graph node.

use super::sample::{DepthFrame, FeatureSet};

/// Evidence stored on a graph node together with its extrinsic transform.
#[derive(Debug, Clone, PartialEq)]
pub enum SensorReading {
    Depth(DepthFrame),
    Features(FeatureSet),
}

/// Discriminant of [`SensorReading`], handy for assertions and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadingKind {
    Depth,
    Features,
}

impl SensorReading {
    pub fn kind(&self) -> ReadingKind {
        match self {
            Self::Depth(_) => ReadingKind::Depth,
            Self::Features(_) => ReadingKind::Features,
        }
    }

    pub fn timestamp_ns(&self) -> u64 {
        match self {
            Self::Depth(frame) => frame.timestamp_ns,
            Self::Features(features) => features.timestamp_ns,
        }
    }
}

impl std::fmt::Display for ReadingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Depth => write!(f, "depth"),
            Self::Features => write!(f, "features"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_kind_and_timestamp() {
        let depth = SensorReading::Depth(DepthFrame::empty(5));
        let features = SensorReading::Features(FeatureSet::new(7, vec![]));

        assert_eq!(depth.kind(), ReadingKind::Depth);
        assert_eq!(features.kind(), ReadingKind::Features);
        assert_eq!(depth.timestamp_ns(), 5);
        assert_eq!(features.timestamp_ns(), 7);
        assert_eq!(format!("{}", ReadingKind::Features), "features");
    }
}
