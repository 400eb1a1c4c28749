//! Separable convolution with clamp-to-edge borders.

use crate::map::FloatMap;

/// Horizontal pass: convolve each row with a centered odd-length kernel.
pub fn convolve_rows(src: &FloatMap, kernel: &[f32]) -> FloatMap {
    assert!(kernel.len() % 2 == 1, "kernel length must be odd");
    let (w, h) = (src.width, src.height);
    let half = kernel.len() as isize / 2;
    let mut dst = FloatMap::zeros(w, h);

    for y in 0..h {
        for x in 0..w {
            let mut acc = 0.0f32;
            for (ki, &kv) in kernel.iter().enumerate() {
                let sx = (x as isize + ki as isize - half).clamp(0, w as isize - 1) as usize;
                acc += src.get(sx, y) * kv;
            }
            dst.set(x, y, acc);
        }
    }
    dst
}

/// Vertical pass: convolve each column with a centered odd-length kernel.
pub fn convolve_cols(src: &FloatMap, kernel: &[f32]) -> FloatMap {
    assert!(kernel.len() % 2 == 1, "kernel length must be odd");
    let (w, h) = (src.width, src.height);
    let half = kernel.len() as isize / 2;
    let mut dst = FloatMap::zeros(w, h);

    for y in 0..h {
        for x in 0..w {
            let mut acc = 0.0f32;
            for (ki, &kv) in kernel.iter().enumerate() {
                let sy = (y as isize + ki as isize - half).clamp(0, h as isize - 1) as usize;
                acc += src.get(x, sy) * kv;
            }
            dst.set(x, y, acc);
        }
    }
    dst
}

/// Separable 2D convolution: horizontal pass with `row_kernel`, then
/// vertical pass with `col_kernel`.
pub fn convolve_separable(src: &FloatMap, row_kernel: &[f32], col_kernel: &[f32]) -> FloatMap {
    convolve_cols(&convolve_rows(src, row_kernel), col_kernel)
}

/// Sampled Gaussian kernel of odd length `size`, normalized to sum one.
pub fn gaussian_kernel_1d(size: usize, sigma: f32) -> Vec<f32> {
    assert!(size % 2 == 1, "kernel length must be odd");
    assert!(sigma > 0.0, "sigma must be positive");

    let half = (size / 2) as isize;
    let denom = 2.0 * sigma * sigma;
    let mut kernel: Vec<f32> = (-half..=half)
        .map(|i| (-((i * i) as f32) / denom).exp())
        .collect();

    let sum: f32 = kernel.iter().sum();
    for v in kernel.iter_mut() {
        *v /= sum;
    }
    kernel
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ramp(width: usize, height: usize) -> FloatMap {
        let mut map = FloatMap::zeros(width, height);
        for y in 0..height {
            for x in 0..width {
                map.set(x, y, x as f32);
            }
        }
        map
    }

    #[test]
    fn identity_kernel_preserves_the_plane() {
        let src = ramp(6, 3);
        let dst = convolve_separable(&src, &[0.0, 1.0, 0.0], &[0.0, 1.0, 0.0]);
        for (a, b) in src.data.iter().zip(&dst.data) {
            assert_relative_eq!(a, b);
        }
    }

    #[test]
    fn box_kernel_averages_rows() {
        let src = ramp(5, 1);
        let k = [1.0 / 3.0; 3];
        let dst = convolve_rows(&src, &k);
        // Interior: mean of (x-1, x, x+1).
        assert_relative_eq!(2.0, dst.get(2, 0), epsilon = 1e-6);
        // Border clamps to the edge sample.
        assert_relative_eq!(1.0 / 3.0, dst.get(0, 0), epsilon = 1e-6);
        assert_relative_eq!(4.0 - 1.0 / 3.0, dst.get(4, 0), epsilon = 1e-6);
    }

    #[test]
    fn gaussian_kernel_is_normalized_and_symmetric() {
        let k = gaussian_kernel_1d(5, 2.0);
        assert_eq!(5, k.len());
        assert_relative_eq!(1.0, k.iter().sum::<f32>(), epsilon = 1e-6);
        assert_relative_eq!(k[0], k[4]);
        assert_relative_eq!(k[1], k[3]);
        assert!(k[2] > k[1] && k[1] > k[0]);
    }
}
