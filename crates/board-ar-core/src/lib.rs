//! Core types for chessboard-anchored AR overlays.
//!
//! This crate is intentionally small and purely geometric: image buffers,
//! the pinhole camera model with Brown-Conrady distortion, homography
//! estimation and planar pose recovery. It does *not* depend on any
//! concrete corner detector, image codec or window system.

mod camera;
mod corner;
mod homography;
mod image;
mod logger;
pub mod math;
mod pose;

pub use camera::{Camera, Distortion, Intrinsics};
pub use corner::Corner;
pub use homography::{estimate_homography, homography_from_4pt, Homography};
pub use image::{
    sample_bilinear, sample_bilinear_rgb, sample_bilinear_rgb_u8, sample_bilinear_u8, GrayImage,
    GrayImageView, RgbImage, RgbImageView,
};
pub use pose::pose_from_homography;

pub use math::{Iso3, Mat3, Pt2, Pt3, Real, Vec2, Vec3};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
