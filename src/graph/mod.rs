//! Pose graph collaborator.
//!
//! The front-end only ever writes to the graph, one node at a time:
//!
//! ```text
//! begin_node(relative) → attach_reading(reading, extrinsic)* → commit_node()
//! ```
//!
//! When a step fails the front-end calls `abort_node()` so the next node can
//! begin.
//!
//! Each node's transform is relative to its immediate predecessor, so the
//! committed nodes form a chain. Storage, linking and any optimization are
//! the collaborator's business.

pub mod memory;
pub mod node;

pub use memory::InMemoryPoseGraph;
pub use node::{Attachment, GraphNode, NodeId};

use thiserror::Error;

use crate::geometry::{SE3, UncertainTransform};
use crate::sensors::SensorReading;

/// Errors reported by a [`PoseGraph`] when the write protocol is violated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("node {0} is still being built")]
    NodeAlreadyInProgress(NodeId),

    #[error("no node is being built")]
    NoNodeInProgress,
}

/// Append-only sink for graph nodes.
pub trait PoseGraph {
    /// Start a node whose pose is `relative` to the previous node.
    fn begin_node(&mut self, relative: UncertainTransform) -> Result<(), GraphError>;

    /// Attach a reading to the node currently being built.
    fn attach_reading(&mut self, reading: SensorReading, extrinsic: SE3) -> Result<(), GraphError>;

    /// Finalize and store the node being built.
    fn commit_node(&mut self) -> Result<NodeId, GraphError>;

    /// Discard the node being built, if any. Committed nodes are unaffected.
    fn abort_node(&mut self);
}
