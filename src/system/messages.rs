//! Events delivered to the front-end worker.
//!
//! All three sensor streams share one channel, so the worker sees a single
//! serialized sequence of events.

use crate::sensors::{DepthFrame, FeatureSet, MotionDelta};

pub enum FrontendEvent {
    /// Relative motion since the previous motion sample.
    MotionDelta(MotionDelta),

    /// Visual features to attach to the next node.
    Features(FeatureSet),

    /// Depth frame; triggers node creation.
    DepthFrame(DepthFrame),
}

impl FrontendEvent {
    pub fn timestamp_ns(&self) -> u64 {
        match self {
            Self::MotionDelta(delta) => delta.timestamp_ns,
            Self::Features(features) => features.timestamp_ns,
            Self::DepthFrame(frame) => frame.timestamp_ns,
        }
    }
}
