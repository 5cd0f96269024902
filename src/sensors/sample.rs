use nalgebra::Vector3;

use crate::geometry::UncertainTransform;

/// Relative motion of the body since the previous motion sample.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionDelta {
    pub timestamp_ns: u64,
    pub delta: UncertainTransform,
}

impl MotionDelta {
    pub fn new(timestamp_ns: u64, delta: UncertainTransform) -> Self {
        Self {
            timestamp_ns,
            delta,
        }
    }
}

/// Single depth/range image, row-major, ranges in meters.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthFrame {
    pub timestamp_ns: u64,
    pub width: usize,
    pub height: usize,
    pub ranges: Vec<f32>,
}

impl DepthFrame {
    pub fn new(timestamp_ns: u64, width: usize, height: usize, ranges: Vec<f32>) -> Self {
        Self {
            timestamp_ns,
            width,
            height,
            ranges,
        }
    }

    /// Frame without range data, used when only the trigger instant matters.
    pub fn empty(timestamp_ns: u64) -> Self {
        Self::new(timestamp_ns, 0, 0, Vec::new())
    }

    /// Range at pixel (u, v), if inside the image.
    pub fn range_at(&self, u: usize, v: usize) -> Option<f32> {
        if u >= self.width || v >= self.height {
            return None;
        }
        self.ranges.get(v * self.width + u).copied()
    }
}

/// A triangulated stereo feature in the sensor frame.
#[derive(Debug, Clone, PartialEq)]
pub struct StereoFeature {
    pub id: u64,
    pub point: Vector3<f64>,
    pub descriptor: Vec<u8>,
}

/// All stereo features extracted from one image pair.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureSet {
    pub timestamp_ns: u64,
    pub features: Vec<StereoFeature>,
}

impl FeatureSet {
    pub fn new(timestamp_ns: u64, features: Vec<StereoFeature>) -> Self {
        Self {
            timestamp_ns,
            features,
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
