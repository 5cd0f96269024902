//! SO(3) helpers backing the SE3 exponential and log maps.

use nalgebra::{Matrix3, Vector3};

/// Below this rotation angle the series expansions are used.
const SMALL_ANGLE_THRESHOLD: f64 = 1e-6;

/// Skew-symmetric matrix with `skew(v) * u == v.cross(&u)`.
#[inline]
pub fn skew(v: &Vector3<f64>) -> Matrix3<f64> {
    Matrix3::new(
        0.0, -v.z, v.y,
        v.z, 0.0, -v.x,
        -v.y, v.x, 0.0,
    )
}

/// Right Jacobian of SO(3).
///
/// ```text
/// Jr(φ) = I - (1 - cos θ)/θ² [φ]× + (θ - sin θ)/θ³ [φ]×²,   θ = |φ|
/// ```
///
/// The left Jacobian is `Jl(φ) = Jr(-φ)`.
pub fn right_jacobian_so3(phi: &Vector3<f64>) -> Matrix3<f64> {
    let theta = phi.norm();
    let skew_phi = skew(phi);

    if theta < SMALL_ANGLE_THRESHOLD {
        return Matrix3::identity() - 0.5 * skew_phi;
    }

    let theta_sq = theta * theta;
    Matrix3::identity() - ((1.0 - theta.cos()) / theta_sq) * skew_phi
        + ((theta - theta.sin()) / (theta_sq * theta)) * skew_phi * skew_phi
}

/// Inverse of [`right_jacobian_so3`].
///
/// ```text
/// Jr⁻¹(φ) = I + 0.5 [φ]× + (1/θ² - (1 + cos θ)/(2θ sin θ)) [φ]×²
/// ```
pub fn right_jacobian_so3_inv(phi: &Vector3<f64>) -> Matrix3<f64> {
    let theta = phi.norm();
    let skew_phi = skew(phi);
    let skew_phi_sq = skew_phi * skew_phi;

    let coeff = if theta < SMALL_ANGLE_THRESHOLD {
        1.0 / 12.0
    } else {
        1.0 / (theta * theta) - (1.0 + theta.cos()) / (2.0 * theta * theta.sin())
    };

    Matrix3::identity() + 0.5 * skew_phi + coeff * skew_phi_sq
}
