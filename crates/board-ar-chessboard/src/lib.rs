//! Chessboard lattice detector built on top of `board-ar-core`.
//!
//! ## Quickstart
//!
//! ```
//! use board_ar_chessboard::ChessboardDetector;
//! use board_ar_core::Corner;
//!
//! let detector = ChessboardDetector::with_expected_dims(6, 9);
//!
//! let corners: Vec<Corner> = Vec::new();
//! let result = detector.detect_from_corners(&corners);
//! println!("detected: {}", result.is_some());
//! ```
//!
//! Detection pipeline (graph-based, detector-agnostic):
//! 1. Filter corners by strength.
//! 2. Query k-nearest candidates per corner from a kd-tree.
//! 3. Accept candidate edges by saddle-orientation agreement (adjacent
//!    diagonals orthogonal, edge at ~45 degrees to both) and a spacing window.
//! 4. Keep the best candidate in each of the four lattice directions.
//! 5. Walk connected components and BFS-assign integer (row, col) coordinates.
//! 6. Normalize the lattice orientation and keep components that match the
//!    expected dimensions and completeness threshold.

mod board;
mod detector;
mod graph;
mod params;

pub use board::{BoardSpec, BoardSpecError};
pub use detector::{BoardDetection, ChessboardDetector};
pub use graph::{
    assign_lattice_coords, connected_components, GridGraph, NeighborDirection, NodeNeighbor,
};
pub use params::{ChessboardParams, GridGraphParams};
