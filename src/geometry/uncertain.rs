//! Rigid transforms with a 6×6 tangent-space covariance.
//!
//! The covariance describes a left perturbation `T = Exp(ξ) · T̄` with
//! `ξ ~ N(0, Σ)` and `ξ = [rotation (3), translation (3)]`.

use nalgebra::{Matrix6, Vector6};

use super::SE3;

/// A rigid transform paired with the uncertainty of its estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct UncertainTransform {
    pub mean: SE3,
    pub covariance: Matrix6<f64>,
}

impl UncertainTransform {
    /// Identity transform with zero covariance.
    pub fn identity() -> Self {
        Self {
            mean: SE3::identity(),
            covariance: Matrix6::zeros(),
        }
    }

    pub fn new(mean: SE3, covariance: Matrix6<f64>) -> Self {
        Self { mean, covariance }
    }

    /// A perfectly known transform.
    pub fn certain(mean: SE3) -> Self {
        Self::new(mean, Matrix6::zeros())
    }

    /// Transform with independent per-axis variances `[rx, ry, rz, tx, ty, tz]`.
    pub fn from_variances(mean: SE3, variances: Vector6<f64>) -> Self {
        Self::new(mean, Matrix6::from_diagonal(&variances))
    }

    /// Compose two independent uncertain transforms: self ∘ other.
    ///
    /// First-order propagation for left perturbations:
    ///
    /// ```text
    /// Exp(a)·Ā · Exp(b)·B̄ = Exp(a)·Exp(Ad(Ā) b)·ĀB̄ ≈ Exp(a + Ad(Ā) b)·ĀB̄
    /// Σ = Σ_a + Ad(Ā) Σ_b Ad(Ā)ᵀ
    /// ```
    ///
    /// Since `Ad(ĀB̄) = Ad(Ā) Ad(B̄)` this is associative, and it keeps the
    /// covariance symmetric positive semi-definite.
    pub fn compose(&self, other: &UncertainTransform) -> Self {
        let ad = self.mean.adjoint();
        let covariance = self.covariance + ad * other.covariance * ad.transpose();
        Self {
            mean: self.mean.compose(&other.mean),
            covariance: symmetrized(&covariance),
        }
    }

    /// Copy with `variance · I` added to the covariance.
    pub fn with_isotropic_noise(&self, variance: f64) -> Self {
        let mut noisy = self.clone();
        noisy.add_isotropic_noise(variance);
        noisy
    }

    pub fn add_isotropic_noise(&mut self, variance: f64) {
        self.covariance += Matrix6::identity() * variance;
    }
}

impl Default for UncertainTransform {
    fn default() -> Self {
        Self::identity()
    }
}

/// `(M + Mᵀ) / 2`, removing rounding asymmetry from products.
fn symmetrized(m: &Matrix6<f64>) -> Matrix6<f64> {
    (m + m.transpose()) * 0.5
}
