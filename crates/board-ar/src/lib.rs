//! High-level facade crate for the `board-ar-*` workspace.
//!
//! This crate provides:
//! - stable, convenient re-exports of the underlying crates
//! - (feature-gated) end-to-end helpers that run a ChESS corner detector
//!   (`chess-corners`), assemble chessboard lattices and estimate board
//!   poses from a precomputed calibration.
//!
//! ## Quickstart
//!
//! ```no_run
//! use std::path::Path;
//!
//! use board_ar::calibration::load_calibration;
//! use board_ar::chessboard::BoardSpec;
//! use board_ar::detect;
//! use board_ar::pose::estimate_board_pose;
//! use image::ImageReader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let calib = load_calibration(Path::new("calibration.json"))?;
//! let spec = BoardSpec::with_unit_squares(6, 9)?;
//! let img = ImageReader::open("frame.png")?.decode()?.to_luma8();
//!
//! let chess_cfg = detect::default_chess_config();
//! if let Some(board) = detect::detect_board(&img, &chess_cfg, &spec) {
//!     if let Some(estimate) = estimate_board_pose(&calib.camera, &spec, &board) {
//!         println!(
//!             "board at {:?}, mean reprojection {:.2} px",
//!             estimate.pose.translation.vector, estimate.reprojection_error
//!         );
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `board_ar::core`: camera model, homographies, image buffers.
//! - `board_ar::chessboard`: lattice assembly from saddle corners.
//! - `board_ar::harris`: reference Harris corner response.
//! - `board_ar::scene`: demo wireframe objects.
//! - `board_ar::render`: packed-u32 canvas, rasterization and warping.
//! - `board_ar::calibration`, `board_ar::pose`, `board_ar::ar`,
//!   `board_ar::overlay`: the demo pipeline itself.
//! - `board_ar::detect`, `board_ar::frames` (feature `image`): end-to-end
//!   helpers working on `image::GrayImage` and frame directories.

pub use board_ar_chessboard as chessboard;
pub use board_ar_core as core;
pub use board_ar_harris as harris;
pub use board_ar_render as render;
pub use board_ar_scene as scene;

pub use board_ar_chessboard::{BoardDetection, BoardSpec};
pub use board_ar_core::{Camera, Corner};

pub mod ar;
pub mod calibration;
pub mod overlay;
pub mod pose;

#[cfg(feature = "image")]
pub mod detect;
#[cfg(feature = "image")]
pub mod frames;
