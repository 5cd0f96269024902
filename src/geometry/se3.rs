//! SE3: 6-DOF rigid body transformation (rotation + translation).
//!
//! Tangent vectors are ordered `[rotation (3), translation (3)]` and
//! perturbations are applied on the left: `T = Exp(ξ) · T̄`.

use nalgebra::{Matrix3, Matrix4, Matrix6, Rotation3, UnitQuaternion, Vector3, Vector6};

use super::so3::{right_jacobian_so3, right_jacobian_so3_inv, skew};

/// Rigid transformation: p' = R * p + t.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SE3 {
    pub rotation: UnitQuaternion<f64>,
    pub translation: Vector3<f64>,
}

impl SE3 {
    /// Identity transformation (no rotation, no translation).
    pub fn identity() -> Self {
        Self {
            rotation: UnitQuaternion::identity(),
            translation: Vector3::zeros(),
        }
    }

    /// Pure translation.
    pub fn from_translation(translation: Vector3<f64>) -> Self {
        Self {
            rotation: UnitQuaternion::identity(),
            translation,
        }
    }

    /// Construct from quaternion (w, x, y, z) and translation.
    pub fn from_quaternion(qw: f64, qx: f64, qy: f64, qz: f64, translation: Vector3<f64>) -> Self {
        let rotation =
            UnitQuaternion::from_quaternion(nalgebra::Quaternion::new(qw, qx, qy, qz));
        Self {
            rotation,
            translation,
        }
    }

    /// Construct from homogeneous 4x4 matrix of form [R | t; 0 | 1].
    pub fn from_matrix(mat: Matrix4<f64>) -> Self {
        let rot_block: Matrix3<f64> = mat.fixed_view::<3, 3>(0, 0).into_owned();
        let translation = Vector3::new(mat[(0, 3)], mat[(1, 3)], mat[(2, 3)]);
        let rot3 = Rotation3::from_matrix_unchecked(rot_block);
        Self {
            rotation: UnitQuaternion::from_rotation_matrix(&rot3),
            translation,
        }
    }

    /// Convert to homogeneous 4x4 matrix.
    pub fn to_matrix(&self) -> Matrix4<f64> {
        let mut mat = Matrix4::identity();
        mat.fixed_view_mut::<3, 3>(0, 0)
            .copy_from(&self.rotation_matrix());
        mat.fixed_view_mut::<3, 1>(0, 3).copy_from(&self.translation);
        mat
    }

    pub fn rotation_matrix(&self) -> Matrix3<f64> {
        self.rotation.to_rotation_matrix().into_inner()
    }

    /// Inverse transformation: [R^T | -R^T t].
    pub fn inverse(&self) -> Self {
        let rot_inv = self.rotation.inverse();
        Self {
            rotation: rot_inv,
            translation: -(rot_inv * self.translation),
        }
    }

    /// Compose two transforms: self ∘ other.
    ///
    /// `(self ∘ other).transform_point(p) == self.transform_point(other.transform_point(p))`
    pub fn compose(&self, other: &SE3) -> Self {
        Self {
            rotation: self.rotation * other.rotation,
            translation: self.rotation * other.translation + self.translation,
        }
    }

    pub fn transform_point(&self, p: &Vector3<f64>) -> Vector3<f64> {
        self.rotation * p + self.translation
    }

    /// Adjoint matrix Ad(T), satisfying `T · Exp(ξ) · T⁻¹ = Exp(Ad(T) ξ)`.
    ///
    /// ```text
    /// Ad(T) = | R      0 |
    ///         | [t]× R R |
    /// ```
    pub fn adjoint(&self) -> Matrix6<f64> {
        let r = self.rotation_matrix();
        let tr = skew(&self.translation) * r;

        let mut ad = Matrix6::zeros();
        ad.fixed_view_mut::<3, 3>(0, 0).copy_from(&r);
        ad.fixed_view_mut::<3, 3>(3, 0).copy_from(&tr);
        ad.fixed_view_mut::<3, 3>(3, 3).copy_from(&r);
        ad
    }

    /// Exponential map from the tangent vector `[φ, ρ]`.
    ///
    /// The translation is `Jl(φ) ρ`, using `Jl(φ) = Jr(-φ)`.
    pub fn exp(tangent: &Vector6<f64>) -> Self {
        let phi = Vector3::new(tangent[0], tangent[1], tangent[2]);
        let rho = Vector3::new(tangent[3], tangent[4], tangent[5]);
        Self {
            rotation: UnitQuaternion::from_scaled_axis(phi),
            translation: right_jacobian_so3(&-phi) * rho,
        }
    }

    /// Log map: inverse of [`SE3::exp`].
    pub fn log(&self) -> Vector6<f64> {
        let phi = self.rotation.scaled_axis();
        let rho = right_jacobian_so3_inv(&-phi) * self.translation;
        Vector6::new(phi.x, phi.y, phi.z, rho.x, rho.y, rho.z)
    }
}

impl Default for SE3 {
    fn default() -> Self {
        Self::identity()
    }
}
