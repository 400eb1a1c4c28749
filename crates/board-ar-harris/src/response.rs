//! Harris response map and corner extraction.

use board_ar_core::GrayImageView;
use serde::{Deserialize, Serialize};

use crate::convolve::{convolve_separable, gaussian_kernel_1d};
use crate::gradient::sobel_xy;
use crate::map::FloatMap;

/// Harris detector parameters.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct HarrisParams {
    /// Corner-versus-edge sensitivity, typically 0.04 to 0.06.
    pub k: f32,
    /// Full side length of the Gaussian structure-tensor window, odd.
    pub block_size: usize,
    /// Gaussian sigma of the structure-tensor window.
    pub sigma: f32,
    /// Corner acceptance threshold as a fraction of the maximum response.
    pub threshold_rel: f32,
}

impl Default for HarrisParams {
    fn default() -> Self {
        Self {
            k: 0.04,
            block_size: 5,
            sigma: 2.0,
            threshold_rel: 0.01,
        }
    }
}

/// A detected corner at integer pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HarrisCorner {
    pub x: u32,
    pub y: u32,
    pub response: f32,
}

/// Harris response `R = det(M) - k * trace(M)^2`, clamped below at zero.
///
/// M is the structure tensor of Sobel gradients, windowed by a Gaussian
/// of `block_size` taps and `sigma`.
pub fn harris_response(src: &GrayImageView<'_>, params: &HarrisParams) -> FloatMap {
    let (ix, iy) = sobel_xy(src);

    let mut ix2 = FloatMap::zeros(src.width, src.height);
    let mut iy2 = FloatMap::zeros(src.width, src.height);
    let mut ixiy = FloatMap::zeros(src.width, src.height);
    for i in 0..ix.data.len() {
        let gx = ix.data[i];
        let gy = iy.data[i];
        ix2.data[i] = gx * gx;
        iy2.data[i] = gy * gy;
        ixiy.data[i] = gx * gy;
    }

    let kernel = gaussian_kernel_1d(params.block_size, params.sigma);
    let sxx = convolve_separable(&ix2, &kernel, &kernel);
    let syy = convolve_separable(&iy2, &kernel, &kernel);
    let sxy = convolve_separable(&ixiy, &kernel, &kernel);

    let mut response = FloatMap::zeros(src.width, src.height);
    for i in 0..response.data.len() {
        let a = sxx.data[i];
        let b = syy.data[i];
        let c = sxy.data[i];
        let det = a * b - c * c;
        let trace = a + b;
        response.data[i] = (det - params.k * trace * trace).max(0.0);
    }
    response
}

/// Extract corners from a response map.
///
/// A pixel survives when it equals its 3x3 neighborhood maximum and
/// exceeds `threshold_rel` times the global maximum. Pixels inside the
/// convolution margin are skipped. Output is sorted by response,
/// descending.
pub fn corners_from_response(response: &FloatMap, params: &HarrisParams) -> Vec<HarrisCorner> {
    let (w, h) = (response.width, response.height);
    let margin = params.block_size / 2 + 1;
    if w <= 2 * margin || h <= 2 * margin {
        return Vec::new();
    }

    let threshold = params.threshold_rel * response.max_value();
    let mut corners = Vec::new();

    for y in margin..h - margin {
        for x in margin..w - margin {
            let r = response.get(x, y);
            if r <= threshold {
                continue;
            }
            let mut local_max = f32::NEG_INFINITY;
            for dy in -1i32..=1 {
                for dx in -1i32..=1 {
                    let v = response.get((x as i32 + dx) as usize, (y as i32 + dy) as usize);
                    local_max = local_max.max(v);
                }
            }
            if r == local_max {
                corners.push(HarrisCorner {
                    x: x as u32,
                    y: y as u32,
                    response: r,
                });
            }
        }
    }

    corners.sort_by(|a, b| b.response.total_cmp(&a.response));
    corners
}

/// Response computation and corner extraction in one call.
pub fn harris_corners(src: &GrayImageView<'_>, params: &HarrisParams) -> Vec<HarrisCorner> {
    corners_from_response(&harris_response(src, params), params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_ar_core::GrayImage;

    fn make_chessboard(size: usize, cell: usize, lo: u8, hi: u8) -> GrayImage {
        let mut img = GrayImage::new(size, size);
        for y in 0..size {
            for x in 0..size {
                let v = if (x / cell + y / cell) % 2 == 0 { lo } else { hi };
                img.data[y * size + x] = v;
            }
        }
        img
    }

    #[test]
    fn chessboard_junctions_are_detected() {
        let img = make_chessboard(80, 10, 20, 230);
        let corners = harris_corners(&img.view(), &HarrisParams::default());
        assert!(corners.len() >= 10, "got {} corners", corners.len());
    }

    #[test]
    fn detected_corners_sit_near_junctions() {
        let cell = 10usize;
        let img = make_chessboard(80, cell, 20, 230);
        let corners = harris_corners(&img.view(), &HarrisParams::default());

        let tolerance = cell as f32 / 2.0;
        for c in &corners {
            let nx = (c.x as f32 / cell as f32).round() * cell as f32;
            let ny = (c.y as f32 / cell as f32).round() * cell as f32;
            let dist = ((c.x as f32 - nx).powi(2) + (c.y as f32 - ny).powi(2)).sqrt();
            assert!(
                dist <= tolerance,
                "corner ({}, {}) is {:.1}px from the nearest junction",
                c.x,
                c.y,
                dist
            );
        }
    }

    #[test]
    fn flat_image_has_no_corners() {
        let mut img = GrayImage::new(40, 40);
        img.data.fill(128);
        let corners = harris_corners(&img.view(), &HarrisParams::default());
        assert!(corners.is_empty());
    }

    #[test]
    fn straight_edge_is_not_a_corner() {
        let mut img = GrayImage::new(60, 60);
        for y in 0..60 {
            for x in 30..60 {
                img.data[y * 60 + x] = 200;
            }
        }
        let corners = harris_corners(&img.view(), &HarrisParams::default());
        assert!(corners.len() < 5, "edge produced {} corners", corners.len());
    }

    #[test]
    fn response_is_clamped_at_zero() {
        let img = make_chessboard(40, 10, 20, 230);
        let response = harris_response(&img.view(), &HarrisParams::default());
        assert!(response.data.iter().all(|&v| v >= 0.0));
        assert!(response.max_value() > 0.0);
    }

    #[test]
    fn corners_are_sorted_by_response() {
        let img = make_chessboard(80, 10, 20, 230);
        let corners = harris_corners(&img.view(), &HarrisParams::default());
        for pair in corners.windows(2) {
            assert!(pair[0].response >= pair[1].response);
        }
    }

    #[test]
    fn stricter_threshold_keeps_fewer_corners() {
        let img = make_chessboard(80, 10, 20, 230);
        let loose = harris_corners(&img.view(), &HarrisParams::default());
        let strict = harris_corners(
            &img.view(),
            &HarrisParams {
                threshold_rel: 0.5,
                ..Default::default()
            },
        );
        assert!(strict.len() <= loose.len());
        assert!(!loose.is_empty());
    }

    #[test]
    fn nms_keeps_only_the_local_peak() {
        let mut response = FloatMap::zeros(11, 11);
        response.set(5, 5, 10.0);
        response.set(6, 5, 8.0);
        response.set(5, 6, 7.0);

        let corners = corners_from_response(&response, &HarrisParams::default());
        assert_eq!(1, corners.len());
        assert_eq!((5, 5), (corners[0].x, corners[0].y));
        assert_eq!(10.0, corners[0].response);
    }

    #[test]
    fn larger_k_lowers_the_peak_response() {
        let img = make_chessboard(80, 10, 20, 230);
        let soft = harris_response(&img.view(), &HarrisParams::default());
        let hard = harris_response(
            &img.view(),
            &HarrisParams {
                k: 0.06,
                ..Default::default()
            },
        );
        // The penalty term grows with k, so every pixel with a nonzero
        // trace loses response.
        assert!(soft.max_value() > 0.0);
        assert!(hard.max_value() < soft.max_value());
    }

    #[test]
    fn tiny_image_yields_no_corners() {
        let img = make_chessboard(6, 3, 20, 230);
        let corners = harris_corners(&img.view(), &HarrisParams::default());
        assert!(corners.is_empty());
    }
}
