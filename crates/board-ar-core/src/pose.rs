//! Pose of a planar target from a plane-to-image homography.
//!
//! For a board lying on `Z = 0` in its own frame, the homography to ideal
//! pixel coordinates factors as `H ~ K [r1 r2 t]`. Undoing `K` and the
//! unknown scale leaves two rotation columns and the translation; the
//! third column is completed by the cross product and the result is
//! projected onto SO(3).

use nalgebra::{Matrix3, Rotation3, Translation3, UnitQuaternion};

use crate::homography::Homography;
use crate::math::{Iso3, Mat3, Real};

/// Recover the board-to-camera pose from `h`, which must map board-plane
/// coordinates `(x, y)` to ideal (distortion-free) pixel coordinates.
///
/// Returns `None` when `K` is singular or the homography is degenerate.
pub fn pose_from_homography(k: &Mat3, h: &Homography) -> Option<Iso3> {
    let k_inv = k.try_inverse()?;

    let m = k_inv * h.h;
    let m1 = m.column(0).into_owned();
    let m2 = m.column(1).into_owned();
    let m3 = m.column(2).into_owned();

    let n1 = m1.norm();
    let n2 = m2.norm();
    if n1 < 1e-12 || n2 < 1e-12 {
        return None;
    }

    // Scale so the first two rotation columns have unit norm on average.
    let lambda = 2.0 / (n1 + n2);

    let r1 = lambda * m1;
    let r2 = lambda * m2;
    let r3 = r1.cross(&r2);

    let mut r_mat = Matrix3::<Real>::zeros();
    r_mat.set_column(0, &r1);
    r_mat.set_column(1, &r2);
    r_mat.set_column(2, &r3);

    // Nearest rotation in the Frobenius sense: polar projection via SVD.
    let svd = r_mat.svd(true, true);
    let mut u = svd.u?;
    let v_t = svd.v_t?;
    if (u * v_t).determinant() < 0.0 {
        u.column_mut(2).neg_mut();
    }
    let r_orth = u * v_t;

    let t = lambda * m3;
    let rot = UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(r_orth));

    Some(Iso3::from_parts(Translation3::from(t), rot))
}
