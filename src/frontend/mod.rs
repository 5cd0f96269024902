//! Keyframing front-end: turns motion, feature and depth streams into
//! pose graph nodes.
//!
//! - [`KeyframeAccumulator`] folds motion deltas into one uncertain transform
//! - [`EvidenceBuffer`] keeps the latest unconsumed feature set
//! - [`NodeBuilder`] commits a node on every depth frame
//! - [`validation`] checks each node's covariance before it is submitted

pub mod accumulator;
pub mod evidence;
pub mod node_builder;
pub mod outcome;
pub mod validation;

pub use accumulator::KeyframeAccumulator;
pub use evidence::EvidenceBuffer;
pub use node_builder::NodeBuilder;
pub use outcome::{CommitSummary, DropReason, TriggerOutcome};
pub use validation::{
    CovarianceDiagnostics, CovarianceReport, CovarianceValidator, CovarianceViolation,
    TracingDiagnostics,
};
