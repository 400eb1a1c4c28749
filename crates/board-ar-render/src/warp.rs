//! Perspective compositing of an RGB image onto a canvas.

use board_ar_core::{sample_bilinear_rgb_u8, Homography, RgbImageView};
use nalgebra::Point2;

use crate::canvas::{rgb, Canvas};

/// Composite `src` onto `canvas` under `h_canvas_from_src`.
///
/// Inverse mapping: every canvas pixel whose preimage lands inside the
/// source rectangle is replaced by the bilinear sample; all other pixels
/// keep their value. Returns `false` when the homography cannot be
/// inverted, leaving the canvas untouched.
pub fn warp_rgb_into(
    canvas: &mut Canvas,
    src: &RgbImageView<'_>,
    h_canvas_from_src: &Homography,
) -> bool {
    let Some(h_src_from_canvas) = h_canvas_from_src.inverse() else {
        return false;
    };
    if src.width == 0 || src.height == 0 {
        return true;
    }

    let max_x = (src.width - 1) as f32;
    let max_y = (src.height - 1) as f32;

    for y in 0..canvas.height {
        for x in 0..canvas.width {
            let p = h_src_from_canvas.apply(Point2::new(x as f32, y as f32));
            if p.x < 0.0 || p.y < 0.0 || p.x > max_x || p.y > max_y {
                continue;
            }
            let [r, g, b] = sample_bilinear_rgb_u8(src, p.x, p.y);
            canvas.data[y * canvas.width + x] = rgb(r, g, b);
        }
    }
    true
}
