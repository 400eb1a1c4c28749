//! Owned f32 plane shared by the gradient and response stages.

use board_ar_core::{GrayImage, GrayImageView};

/// A `width x height` plane of f32 samples, row-major.
#[derive(Clone, Debug)]
pub struct FloatMap {
    pub width: usize,
    pub height: usize,
    pub data: Vec<f32>,
}

impl FloatMap {
    pub fn zeros(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width * height],
        }
    }

    pub fn from_gray(src: &GrayImageView<'_>) -> Self {
        Self {
            width: src.width,
            height: src.height,
            data: src.data.iter().map(|&v| v as f32).collect(),
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        self.data[y * self.width + x] = value;
    }

    pub fn max_value(&self) -> f32 {
        self.data.iter().fold(0.0f32, |acc, &v| acc.max(v))
    }

    /// Min-max normalization to an 8-bit gray image, for display.
    pub fn to_gray_image(&self) -> GrayImage {
        let mut lo = f32::INFINITY;
        let mut hi = f32::NEG_INFINITY;
        for &v in &self.data {
            lo = lo.min(v);
            hi = hi.max(v);
        }

        let mut out = GrayImage::new(self.width, self.height);
        let range = hi - lo;
        if range > 0.0 {
            for (dst, &v) in out.data.iter_mut().zip(&self.data) {
                *dst = (255.0 * (v - lo) / range).round() as u8;
            }
        }
        out
    }
}
