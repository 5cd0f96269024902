//! Result of handling one triggering depth frame.

use crate::geometry::UncertainTransform;
use crate::graph::NodeId;

use super::validation::CovarianceReport;

/// Why a triggering frame produced no node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// The extrinsic calibration could not be resolved at the frame time.
    CalibrationUnavailable,
}

/// What a committed node looked like, for callers and statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitSummary {
    pub node_id: NodeId,
    pub timestamp_ns: u64,

    /// Regularized transform submitted as the node's relative pose.
    pub relative: UncertainTransform,

    /// Whether a buffered feature set was attached.
    pub attached_features: bool,

    /// Motion deltas folded into `relative`.
    pub deltas_integrated: usize,

    pub covariance: CovarianceReport,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TriggerOutcome {
    NodeCommitted(CommitSummary),
    FrameDropped { timestamp_ns: u64, reason: DropReason },
}

impl TriggerOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::NodeCommitted(_))
    }

    pub fn is_dropped(&self) -> bool {
        matches!(self, Self::FrameDropped { .. })
    }

    pub fn node_id(&self) -> Option<NodeId> {
        match self {
            Self::NodeCommitted(summary) => Some(summary.node_id),
            Self::FrameDropped { .. } => None,
        }
    }

    pub fn summary(&self) -> Option<&CommitSummary> {
        match self {
            Self::NodeCommitted(summary) => Some(summary),
            Self::FrameDropped { .. } => None,
        }
    }
}
