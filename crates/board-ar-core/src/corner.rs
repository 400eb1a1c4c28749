use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// A detector-agnostic chessboard saddle corner.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Corner {
    /// Subpixel position in image coordinates.
    pub position: Point2<f32>,
    /// Direction of one saddle diagonal, radians, defined modulo pi.
    pub orientation: f32,
    /// Detector response; higher is stronger.
    pub strength: f32,
}
