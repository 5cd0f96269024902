//! Running uncertain transform since the last committed node.

use crate::geometry::UncertainTransform;

/// Folds motion deltas into a single uncertain transform.
///
/// The only write paths are [`integrate`](Self::integrate) and
/// [`reset`](Self::reset).
#[derive(Debug, Clone, Default)]
pub struct KeyframeAccumulator {
    current: UncertainTransform,
    num_integrated: usize,
}

impl KeyframeAccumulator {
    /// Accumulator at identity with zero covariance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a new delta in on the left: `current' = delta ∘ current`.
    ///
    /// Deltas must be integrated in delivery order; composition does not
    /// commute.
    pub fn integrate(&mut self, delta: &UncertainTransform) {
        self.current = delta.compose(&self.current);
        self.num_integrated += 1;
    }

    pub fn current(&self) -> &UncertainTransform {
        &self.current
    }

    /// Number of deltas integrated since the last reset.
    pub fn num_integrated(&self) -> usize {
        self.num_integrated
    }

    /// Back to identity with zero covariance.
    pub fn reset(&mut self) {
        self.current = UncertainTransform::identity();
        self.num_integrated = 0;
    }
}
