//! Error types for the front-end.

use thiserror::Error;

use crate::frontend::validation::CovarianceViolation;
use crate::graph::GraphError;

#[derive(Debug, Error)]
pub enum FrontendError {
    /// The accumulated covariance broke its invariants. The node was not
    /// submitted; the uncertainty model itself is defective.
    #[error("covariance check failed for frame at {timestamp_ns} ns: {violation}")]
    CovarianceViolation {
        timestamp_ns: u64,
        #[source]
        violation: CovarianceViolation,
    },

    #[error("pose graph rejected node: {0}")]
    Graph(#[from] GraphError),

    #[error("front-end worker is no longer running")]
    WorkerStopped,

    #[error("front-end worker panicked")]
    WorkerPanicked,
}

impl FrontendError {
    /// Whether the error stems from the covariance consistency check.
    pub fn is_covariance_violation(&self) -> bool {
        matches!(self, Self::CovarianceViolation { .. })
    }
}

pub type Result<T> = std::result::Result<T, FrontendError>;
