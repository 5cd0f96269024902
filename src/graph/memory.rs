//! In-memory pose graph used by the replay binary and tests.

use tracing::debug;

use crate::geometry::{SE3, UncertainTransform};
use crate::sensors::SensorReading;

use super::node::{Attachment, GraphNode, NodeId};
use super::{GraphError, PoseGraph};

/// Node under construction between `begin_node` and `commit_node`.
#[derive(Debug)]
struct PendingNode {
    relative: UncertainTransform,
    attachments: Vec<Attachment>,
}

/// Append-only vector of committed nodes.
#[derive(Debug, Default)]
pub struct InMemoryPoseGraph {
    nodes: Vec<GraphNode>,
    pending: Option<PendingNode>,
}

impl InMemoryPoseGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.get(usize::try_from(id.0).ok()?)
    }

    pub fn last(&self) -> Option<&GraphNode> {
        self.nodes.last()
    }

    /// Whether a node has been started but not committed.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn next_id(&self) -> NodeId {
        NodeId::new(self.nodes.len() as u64)
    }

    /// Pose of node `id` in the frame of the first node.
    ///
    /// Chains the relative transforms: `T_0_k = T_0_(k-1) ∘ T_(k-1)_k`.
    pub fn absolute_pose(&self, id: NodeId) -> Option<SE3> {
        let end = usize::try_from(id.0).ok()?;
        if end >= self.nodes.len() {
            return None;
        }
        Some(
            self.nodes[1..=end]
                .iter()
                .fold(SE3::identity(), |pose, node| pose.compose(&node.relative.mean)),
        )
    }
}

impl PoseGraph for InMemoryPoseGraph {
    fn begin_node(&mut self, relative: UncertainTransform) -> Result<(), GraphError> {
        if self.pending.is_some() {
            return Err(GraphError::NodeAlreadyInProgress(self.next_id()));
        }
        self.pending = Some(PendingNode {
            relative,
            attachments: Vec::new(),
        });
        Ok(())
    }

    fn attach_reading(&mut self, reading: SensorReading, extrinsic: SE3) -> Result<(), GraphError> {
        let pending = self.pending.as_mut().ok_or(GraphError::NoNodeInProgress)?;
        pending.attachments.push(Attachment { reading, extrinsic });
        Ok(())
    }

    fn commit_node(&mut self) -> Result<NodeId, GraphError> {
        let pending = self.pending.take().ok_or(GraphError::NoNodeInProgress)?;
        let id = self.next_id();
        let prev = self.nodes.last().map(|node| node.id);

        debug!(
            %id,
            attachments = pending.attachments.len(),
            "stored graph node"
        );

        self.nodes.push(GraphNode {
            id,
            prev,
            relative: pending.relative,
            attachments: pending.attachments,
        });
        Ok(id)
    }

    fn abort_node(&mut self) {
        if let Some(pending) = self.pending.take() {
            debug!(
                attachments = pending.attachments.len(),
                "discarded pending graph node"
            );
        }
    }
}
