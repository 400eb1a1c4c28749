//! 2D rasterization for AR overlays.
//!
//! A [`Canvas`] is a packed `0x00RRGGBB` pixel field that can be handed
//! to `minifb` as-is. Drawing is deliberately plain: Bresenham lines,
//! filled circles and rectangles, and an inverse-mapping perspective
//! warp for compositing an image under a homography. Nothing here knows
//! about cameras or poses.

mod canvas;
mod draw;
mod warp;

pub use canvas::{color, rgb, Canvas};
pub use warp::warp_rgb_into;
