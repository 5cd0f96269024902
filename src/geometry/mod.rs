//! Geometry: SE3 transforms, SO(3) helpers and uncertain transforms.

pub mod se3;
pub mod so3;
pub mod uncertain;

pub use se3::SE3;
pub use uncertain::UncertainTransform;
