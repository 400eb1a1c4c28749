//! Pinhole camera with Brown-Conrady lens distortion.
//!
//! Projection runs `intrinsics ∘ distort ∘ perspective-divide`; points at
//! or behind the image plane do not project. Coefficients follow the usual
//! five-element order `k1, k2, p1, p2, k3`.

use serde::{Deserialize, Serialize};

use crate::math::{Iso3, Mat3, Pt2, Pt3, Real};

/// Fixed-point iterations for inverting the distortion model.
const UNDISTORT_ITERS: usize = 20;

/// Pinhole intrinsics in pixel units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Intrinsics {
    pub fx: Real,
    pub fy: Real,
    pub cx: Real,
    pub cy: Real,
    #[serde(default)]
    pub skew: Real,
}

impl Intrinsics {
    pub fn k_matrix(&self) -> Mat3 {
        Mat3::new(
            self.fx, self.skew, self.cx, //
            0.0, self.fy, self.cy, //
            0.0, 0.0, 1.0,
        )
    }

    #[inline]
    pub fn pixel_from_normalized(&self, p: Pt2) -> Pt2 {
        Pt2::new(
            self.fx * p.x + self.skew * p.y + self.cx,
            self.fy * p.y + self.cy,
        )
    }

    #[inline]
    pub fn normalized_from_pixel(&self, p: Pt2) -> Pt2 {
        let y = (p.y - self.cy) / self.fy;
        let x = (p.x - self.cx - self.skew * y) / self.fx;
        Pt2::new(x, y)
    }

    pub fn is_valid(&self) -> bool {
        self.fx.is_finite()
            && self.fy.is_finite()
            && self.cx.is_finite()
            && self.cy.is_finite()
            && self.skew.is_finite()
            && self.fx != 0.0
            && self.fy != 0.0
    }
}

/// Brown-Conrady radial-tangential distortion on normalized coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Distortion {
    #[serde(default)]
    pub k1: Real,
    #[serde(default)]
    pub k2: Real,
    #[serde(default)]
    pub p1: Real,
    #[serde(default)]
    pub p2: Real,
    #[serde(default)]
    pub k3: Real,
}

impl Distortion {
    #[inline]
    fn terms(&self, x: Real, y: Real) -> (Real, Real, Real) {
        let r2 = x * x + y * y;
        let radial = 1.0 + r2 * (self.k1 + r2 * (self.k2 + r2 * self.k3));
        let dx = 2.0 * self.p1 * x * y + self.p2 * (r2 + 2.0 * x * x);
        let dy = self.p1 * (r2 + 2.0 * y * y) + 2.0 * self.p2 * x * y;
        (radial, dx, dy)
    }

    pub fn distort(&self, p: Pt2) -> Pt2 {
        let (radial, dx, dy) = self.terms(p.x, p.y);
        Pt2::new(p.x * radial + dx, p.y * radial + dy)
    }

    /// Invert [`Self::distort`] by fixed-point iteration.
    pub fn undistort(&self, p: Pt2) -> Pt2 {
        let mut x = p.x;
        let mut y = p.y;
        for _ in 0..UNDISTORT_ITERS {
            let (radial, dx, dy) = self.terms(x, y);
            x = (p.x - dx) / radial;
            y = (p.y - dy) / radial;
        }
        Pt2::new(x, y)
    }

    pub fn is_zero(&self) -> bool {
        self.k1 == 0.0 && self.k2 == 0.0 && self.p1 == 0.0 && self.p2 == 0.0 && self.k3 == 0.0
    }
}

/// Calibrated camera: intrinsics plus lens distortion.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub intrinsics: Intrinsics,
    #[serde(default)]
    pub distortion: Distortion,
}

impl Camera {
    pub fn new(intrinsics: Intrinsics, distortion: Distortion) -> Self {
        Self {
            intrinsics,
            distortion,
        }
    }

    /// Project a point given in the camera frame.
    ///
    /// Returns `None` for points at or behind the image plane (`z <= 0`).
    pub fn project_camera_point(&self, pc: &Pt3) -> Option<Pt2> {
        if pc.z <= 0.0 {
            return None;
        }
        let n = Pt2::new(pc.x / pc.z, pc.y / pc.z);
        let d = self.distortion.distort(n);
        Some(self.intrinsics.pixel_from_normalized(d))
    }

    /// Project a world point through `pose` (world frame to camera frame).
    pub fn project_point(&self, pose: &Iso3, pw: &Pt3) -> Option<Pt2> {
        self.project_camera_point(&(pose * pw))
    }

    /// Map a measured pixel to the pixel an ideal (distortion-free)
    /// pinhole would have produced.
    pub fn undistort_pixel(&self, px: Pt2) -> Pt2 {
        if self.distortion.is_zero() {
            return px;
        }
        let n = self.intrinsics.normalized_from_pixel(px);
        let u = self.distortion.undistort(n);
        self.intrinsics.pixel_from_normalized(u)
    }
}
