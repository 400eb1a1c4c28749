//! Board pose from a detection and a calibrated camera.

use board_ar_chessboard::{BoardDetection, BoardSpec};
use board_ar_core::math::{Iso3, Pt2, Real};
use board_ar_core::{estimate_homography, pose_from_homography, Camera};
use nalgebra::Point2;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// A recovered board-to-camera pose and its fit quality.
#[derive(Clone, Copy, Debug)]
pub struct PoseEstimate {
    /// Transform from the board frame (`Z = 0` plane) to the camera frame.
    pub pose: Iso3,
    /// Mean distance between detected and reprojected corners, in pixels.
    pub reprojection_error: Real,
    /// Number of corner correspondences behind the estimate.
    pub corners_used: usize,
}

/// Estimate the board pose from a detection.
///
/// Detected pixels are undistorted first, so the plane-to-image
/// homography is fit in ideal pinhole coordinates; the reported
/// reprojection error is then measured against the raw pixels with the
/// full distortion model applied. Returns `None` when the detection does
/// not match `spec`, fewer than four corners are available, or the
/// homography does not decompose.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(camera, spec, detection), fields(rows = detection.rows, cols = detection.cols))
)]
pub fn estimate_board_pose(
    camera: &Camera,
    spec: &BoardSpec,
    detection: &BoardDetection,
) -> Option<PoseEstimate> {
    let pairs = detection.correspondences(spec)?;
    if pairs.len() < 4 {
        return None;
    }

    let mut board_xy = Vec::with_capacity(pairs.len());
    let mut ideal_px = Vec::with_capacity(pairs.len());
    for (world, pixel) in &pairs {
        board_xy.push(Point2::new(world.x as f32, world.y as f32));
        let ideal = camera.undistort_pixel(Pt2::new(pixel.x as Real, pixel.y as Real));
        ideal_px.push(Point2::new(ideal.x as f32, ideal.y as f32));
    }

    let h = estimate_homography(&board_xy, &ideal_px)?;
    let pose = pose_from_homography(&camera.intrinsics.k_matrix(), &h)?;

    let mut sum_dist = 0.0;
    for (world, pixel) in &pairs {
        let reprojected = camera.project_point(&pose, world)?;
        let dx = reprojected.x - pixel.x as Real;
        let dy = reprojected.y - pixel.y as Real;
        sum_dist += (dx * dx + dy * dy).sqrt();
    }

    Some(PoseEstimate {
        pose,
        reprojection_error: sum_dist / pairs.len() as Real,
        corners_used: pairs.len(),
    })
}
