//! Primitive rasterization, all clipped at the canvas bounds.

use crate::canvas::Canvas;

impl Canvas {
    /// Bresenham line between two pixel positions.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
        let mut x = x0;
        let mut y = y0;
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.put_pixel(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Filled circle of radius `r`.
    pub fn draw_circle(&mut self, cx: i32, cy: i32, r: i32, color: u32) {
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r {
                    self.put_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Axis-aligned cross with the given arm length.
    pub fn draw_cross(&mut self, cx: i32, cy: i32, arm: i32, color: u32) {
        self.draw_line(cx - arm, cy, cx + arm, cy, color);
        self.draw_line(cx, cy - arm, cx, cy + arm, color);
    }

    /// Filled axis-aligned rectangle.
    pub fn draw_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: u32) {
        for dy in 0..h as i32 {
            for dx in 0..w as i32 {
                self.put_pixel(x + dx, y + dy, color);
            }
        }
    }
}
