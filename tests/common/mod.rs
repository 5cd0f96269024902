#![allow(dead_code)]

use nalgebra::{UnitQuaternion, Vector3, Vector6};

use rust_graph_slam::geometry::{SE3, UncertainTransform};
use rust_graph_slam::graph::{GraphError, InMemoryPoseGraph, NodeId, PoseGraph};
use rust_graph_slam::sensors::{FeatureSet, MotionDelta, ReadingKind, SensorReading, StereoFeature};

/// One call made by the front-end on its graph collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphCall {
    Begin,
    Attach(ReadingKind),
    Commit,
    Abort,
}

/// Stores nodes like [`InMemoryPoseGraph`] and records the call sequence.
///
/// `reject_once` makes the next matching call fail with
/// [`GraphError::NoNodeInProgress`] without reaching the inner graph.
#[derive(Default)]
pub struct RecordingGraph {
    pub calls: Vec<GraphCall>,
    pub inner: InMemoryPoseGraph,
    pub reject_once: Option<GraphCall>,
}

impl RecordingGraph {
    fn record(&mut self, call: GraphCall) -> Result<(), GraphError> {
        self.calls.push(call);
        if self.reject_once == Some(call) {
            self.reject_once = None;
            return Err(GraphError::NoNodeInProgress);
        }
        Ok(())
    }
}

impl PoseGraph for RecordingGraph {
    fn begin_node(&mut self, relative: UncertainTransform) -> Result<(), GraphError> {
        self.record(GraphCall::Begin)?;
        self.inner.begin_node(relative)
    }

    fn attach_reading(&mut self, reading: SensorReading, extrinsic: SE3) -> Result<(), GraphError> {
        self.record(GraphCall::Attach(reading.kind()))?;
        self.inner.attach_reading(reading, extrinsic)
    }

    fn commit_node(&mut self) -> Result<NodeId, GraphError> {
        self.record(GraphCall::Commit)?;
        self.inner.commit_node()
    }

    fn abort_node(&mut self) {
        self.calls.push(GraphCall::Abort);
        self.inner.abort_node();
    }
}

pub fn translation(x: f64, y: f64, z: f64) -> SE3 {
    SE3::from_translation(Vector3::new(x, y, z))
}

pub fn pose(yaw: f64, x: f64, y: f64) -> SE3 {
    SE3 {
        rotation: UnitQuaternion::from_euler_angles(0.0, 0.0, yaw),
        translation: Vector3::new(x, y, 0.0),
    }
}

pub fn motion(ts: u64, mean: SE3, variance: f64) -> MotionDelta {
    MotionDelta::new(
        ts,
        UncertainTransform::from_variances(mean, Vector6::from_element(variance)),
    )
}

pub fn features(ts: u64, ids: &[u64]) -> FeatureSet {
    FeatureSet::new(
        ts,
        ids.iter()
            .map(|&id| StereoFeature {
                id,
                point: Vector3::new(id as f64, 0.0, 1.0),
                descriptor: vec![id as u8; 4],
            })
            .collect(),
    )
}
