//! Packed-u32 canvas, layout-compatible with `minifb` framebuffers.

use board_ar_core::{GrayImageView, RgbImageView};

/// Pack 8-bit channels as `0x00RRGGBB`.
#[inline]
pub const fn rgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

pub mod color {
    use super::rgb;

    pub const BLACK: u32 = rgb(0, 0, 0);
    pub const WHITE: u32 = rgb(255, 255, 255);
    pub const RED: u32 = rgb(255, 0, 0);
    pub const GREEN: u32 = rgb(0, 255, 0);
    pub const BLUE: u32 = rgb(0, 0, 255);
    pub const YELLOW: u32 = rgb(255, 255, 0);
    pub const CYAN: u32 = rgb(0, 255, 255);
    pub const MAGENTA: u32 = rgb(255, 0, 255);
}

/// A `width x height` field of packed `0x00RRGGBB` pixels.
#[derive(Clone, Debug)]
pub struct Canvas {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u32>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![color::BLACK; width * height],
        }
    }

    /// Replicate a grayscale image across the three channels.
    pub fn from_gray(src: &GrayImageView<'_>) -> Self {
        let data = src.data.iter().map(|&v| rgb(v, v, v)).collect();
        Self {
            width: src.width,
            height: src.height,
            data,
        }
    }

    /// Pack an interleaved RGB image.
    pub fn from_rgb(src: &RgbImageView<'_>) -> Self {
        let data = src
            .data
            .chunks_exact(3)
            .map(|px| rgb(px[0], px[1], px[2]))
            .collect();
        Self {
            width: src.width,
            height: src.height,
            data,
        }
    }

    pub fn clear(&mut self, color: u32) {
        self.data.fill(color);
    }

    /// Write one pixel; coordinates outside the canvas are discarded.
    #[inline]
    pub fn put_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.data[y as usize * self.width + x as usize] = color;
        }
    }

    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            Some(self.data[y as usize * self.width + x as usize])
        } else {
            None
        }
    }
}
