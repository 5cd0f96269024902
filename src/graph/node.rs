//! Committed graph nodes.

use crate::geometry::{SE3, UncertainTransform};
use crate::sensors::{DepthFrame, FeatureSet, ReadingKind, SensorReading};

/// Unique identifier of a node, assigned sequentially on commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl NodeId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "N{}", self.0)
    }
}

/// A sensor reading together with its sensor-to-body extrinsic.
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub reading: SensorReading,
    pub extrinsic: SE3,
}

/// A node of the pose graph. Never mutated after commit.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    pub id: NodeId,

    /// Predecessor in the chain. None for the first node.
    pub prev: Option<NodeId>,

    /// Uncertain transform from this node's body frame to the previous node's.
    pub relative: UncertainTransform,

    /// Readings in attachment order.
    pub attachments: Vec<Attachment>,
}

impl GraphNode {
    /// Timestamp of the depth reading that created the node.
    pub fn timestamp_ns(&self) -> Option<u64> {
        self.depth().map(|frame| frame.timestamp_ns)
    }

    pub fn depth(&self) -> Option<&DepthFrame> {
        self.attachments.iter().find_map(|a| match &a.reading {
            SensorReading::Depth(frame) => Some(frame),
            _ => None,
        })
    }

    pub fn features(&self) -> Option<&FeatureSet> {
        self.attachments.iter().find_map(|a| match &a.reading {
            SensorReading::Features(features) => Some(features),
            _ => None,
        })
    }

    pub fn count_of(&self, kind: ReadingKind) -> usize {
        self.attachments
            .iter()
            .filter(|a| a.reading.kind() == kind)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_display_and_order() {
        assert_eq!(format!("{}", NodeId::new(7)), "N7");
        assert!(NodeId::new(1) < NodeId::new(2));
    }

    #[test]
    fn test_node_reading_accessors() {
        let node = GraphNode {
            id: NodeId::new(0),
            prev: None,
            relative: UncertainTransform::identity(),
            attachments: vec![
                Attachment {
                    reading: SensorReading::Depth(DepthFrame::empty(30)),
                    extrinsic: SE3::identity(),
                },
                Attachment {
                    reading: SensorReading::Features(FeatureSet::new(25, vec![])),
                    extrinsic: SE3::identity(),
                },
            ],
        };

        assert_eq!(node.timestamp_ns(), Some(30));
        assert_eq!(node.features().map(|f| f.timestamp_ns), Some(25));
        assert_eq!(node.count_of(ReadingKind::Depth), 1);
        assert_eq!(node.count_of(ReadingKind::Features), 1);
    }
}
