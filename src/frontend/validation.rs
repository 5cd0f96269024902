//! Covariance consistency checks run before a node is committed.
//!
//! Validation is always executed and has a fixed contract: a covariance is
//! accepted if it is finite, symmetric and positive semi-definite. Reporting
//! the spectrum is a separate, optional [`CovarianceDiagnostics`] hook.

use nalgebra::{Matrix6, SymmetricEigen, Vector6};
use thiserror::Error;
use tracing::debug;

use crate::config::FrontendConfig;

/// Reason a covariance was rejected.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CovarianceViolation {
    #[error("covariance has non-finite entries")]
    NonFinite,

    #[error("covariance is not symmetric (relative asymmetry {asymmetry:e} > {tolerance:e})")]
    Asymmetric { asymmetry: f64, tolerance: f64 },

    #[error("covariance is not positive semi-definite (smallest eigenvalue {min_eigenvalue:e})")]
    NotPositiveSemiDefinite { min_eigenvalue: f64, tolerance: f64 },
}

/// Outcome of a successful validation.
#[derive(Debug, Clone, PartialEq)]
pub struct CovarianceReport {
    /// Eigenvalues in ascending order.
    pub eigenvalues: Vector6<f64>,

    /// `‖Σ - Σᵀ‖ / ‖Σ‖` (Frobenius), zero for the zero matrix.
    pub asymmetry: f64,
}

impl CovarianceReport {
    pub fn min_eigenvalue(&self) -> f64 {
        self.eigenvalues[0]
    }

    pub fn max_eigenvalue(&self) -> f64 {
        self.eigenvalues[5]
    }

    /// Ratio of largest to smallest eigenvalue; infinite when singular.
    pub fn condition_number(&self) -> f64 {
        let min = self.min_eigenvalue();
        if min <= 0.0 {
            f64::INFINITY
        } else {
            self.max_eigenvalue() / min
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CovarianceValidator {
    symmetry_tolerance: f64,
    psd_tolerance: f64,
}

impl CovarianceValidator {
    pub fn new(symmetry_tolerance: f64, psd_tolerance: f64) -> Self {
        Self {
            symmetry_tolerance,
            psd_tolerance,
        }
    }

    pub fn from_config(config: &FrontendConfig) -> Self {
        Self::new(config.symmetry_tolerance, config.psd_tolerance)
    }

    pub fn validate(&self, covariance: &Matrix6<f64>) -> Result<CovarianceReport, CovarianceViolation> {
        if covariance.iter().any(|v| !v.is_finite()) {
            return Err(CovarianceViolation::NonFinite);
        }

        // Same criterion as an approximate comparison against the transpose.
        let scale = covariance.norm();
        let asymmetry = if scale > 0.0 {
            (covariance - covariance.transpose()).norm() / scale
        } else {
            0.0
        };
        if asymmetry > self.symmetry_tolerance {
            return Err(CovarianceViolation::Asymmetric {
                asymmetry,
                tolerance: self.symmetry_tolerance,
            });
        }

        let eigenvalues = sorted_eigenvalues(covariance);
        let min_eigenvalue = eigenvalues[0];
        if min_eigenvalue < -self.psd_tolerance {
            return Err(CovarianceViolation::NotPositiveSemiDefinite {
                min_eigenvalue,
                tolerance: self.psd_tolerance,
            });
        }

        Ok(CovarianceReport {
            eigenvalues,
            asymmetry,
        })
    }
}

impl Default for CovarianceValidator {
    fn default() -> Self {
        Self::from_config(&FrontendConfig::default())
    }
}

fn sorted_eigenvalues(covariance: &Matrix6<f64>) -> Vector6<f64> {
    let mut values: Vec<f64> = SymmetricEigen::new(*covariance)
        .eigenvalues
        .iter()
        .copied()
        .collect();
    values.sort_by(f64::total_cmp);
    Vector6::from_iterator(values)
}

/// Optional instrumentation invoked with every validated covariance.
pub trait CovarianceDiagnostics: Send {
    fn inspect(&mut self, timestamp_ns: u64, covariance: &Matrix6<f64>, report: &CovarianceReport);
}

/// Logs the covariance spectrum at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl CovarianceDiagnostics for TracingDiagnostics {
    fn inspect(&mut self, timestamp_ns: u64, covariance: &Matrix6<f64>, report: &CovarianceReport) {
        debug!(
            timestamp_ns,
            eigenvalues = ?report.eigenvalues.as_slice(),
            asymmetry = report.asymmetry,
            condition = report.condition_number(),
            trace = covariance.trace(),
            "node covariance spectrum"
        );
    }
}
