//! Sensor stream samples consumed by the front-end.
//!
//! Three independently time-stamped streams feed the front-end:
//! - relative motion estimates ([`MotionDelta`])
//! - visual feature sets ([`FeatureSet`]), buffered as auxiliary evidence
//! - depth/range frames ([`DepthFrame`]), whose arrival creates a graph node

pub mod reading;
pub mod sample;

pub use reading::{ReadingKind, SensorReading};
pub use sample::{DepthFrame, FeatureSet, MotionDelta, StereoFeature};
