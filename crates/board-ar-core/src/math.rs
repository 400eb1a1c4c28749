//! Scalar and linear-algebra aliases used across the workspace.
//!
//! Image-space measurements (corner positions) stay in `f32`; everything
//! that touches camera geometry runs in `Real`.

use nalgebra::{Isometry3, Matrix3, Point2, Point3, Vector2, Vector3};

/// Scalar type for camera and pose math.
pub type Real = f64;

pub type Vec2 = Vector2<Real>;
pub type Vec3 = Vector3<Real>;
pub type Pt2 = Point2<Real>;
pub type Pt3 = Point3<Real>;
pub type Mat3 = Matrix3<Real>;

/// Rigid transform (rotation + translation), used for board-to-camera poses.
pub type Iso3 = Isometry3<Real>;
