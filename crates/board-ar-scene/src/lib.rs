//! Wireframe scene primitives for board-anchored augmented reality.
//!
//! Objects live in the board-world frame (the chessboard plane is
//! `z = 0`, one unit per square). Rendering and camera projection are
//! out of scope here; a wireframe is just vertices plus edge indices
//! that a consumer projects and rasterizes.

mod demo;
mod wireframe;

pub use demo::{dual_board_objects, stock_scene, SceneObject, CYAN, GREEN, RED, YELLOW};
pub use wireframe::{Axes, Wireframe};
