//! Perspective overlay of an image onto the detected board.
//!
//! The board's four outer corners and the source image's corners give an
//! exact four-point homography; the warp then composites source pixels
//! over the board area of the frame, leaving the rest untouched.

use board_ar_chessboard::BoardDetection;
use board_ar_core::{homography_from_4pt, Homography, RgbImageView};
use board_ar_render::{warp_rgb_into, Canvas};
use nalgebra::Point2;

/// Homography mapping source-image pixels onto the board's outer-corner
/// quad. `None` when an outer corner is missing, the source is too small
/// to span a quad, or the quad is degenerate.
pub fn overlay_homography(
    detection: &BoardDetection,
    src_width: usize,
    src_height: usize,
) -> Option<Homography> {
    if src_width < 2 || src_height < 2 {
        return None;
    }
    let dst = detection.outer_corners()?;
    let w = (src_width - 1) as f32;
    let h = (src_height - 1) as f32;
    let src = [
        Point2::new(0.0, 0.0),
        Point2::new(w, 0.0),
        Point2::new(w, h),
        Point2::new(0.0, h),
    ];
    homography_from_4pt(&src, &dst)
}

/// Warp `source` onto the detected board area of `canvas`.
///
/// Returns `false` and leaves the canvas untouched when no usable quad
/// exists.
pub fn overlay_image(
    canvas: &mut Canvas,
    detection: &BoardDetection,
    source: &RgbImageView<'_>,
) -> bool {
    let Some(h) = overlay_homography(detection, source.width, source.height) else {
        return false;
    };
    warp_rgb_into(canvas, source, &h)
}
