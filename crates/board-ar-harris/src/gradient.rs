//! Sobel gradients as separable passes.

use board_ar_core::GrayImageView;

use crate::convolve::convolve_separable;
use crate::map::FloatMap;

const SOBEL_DERIV: [f32; 3] = [-1.0, 0.0, 1.0];
const SOBEL_SMOOTH: [f32; 3] = [1.0, 2.0, 1.0];

/// Horizontal gradient Ix: derivative along rows, smoothing along columns.
pub fn sobel_x(src: &FloatMap) -> FloatMap {
    convolve_separable(src, &SOBEL_DERIV, &SOBEL_SMOOTH)
}

/// Vertical gradient Iy: smoothing along rows, derivative along columns.
pub fn sobel_y(src: &FloatMap) -> FloatMap {
    convolve_separable(src, &SOBEL_SMOOTH, &SOBEL_DERIV)
}

/// Both Sobel gradients of a grayscale image.
pub fn sobel_xy(src: &GrayImageView<'_>) -> (FloatMap, FloatMap) {
    let plane = FloatMap::from_gray(src);
    (sobel_x(&plane), sobel_y(&plane))
}
