use serde::{Deserialize, Serialize};

/// Parameters for the corner-to-corner neighbor graph.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GridGraphParams {
    /// Reject candidate edges shorter than this (pixels).
    pub min_spacing_pix: f32,
    /// Reject candidate edges longer than this (pixels).
    pub max_spacing_pix: f32,
    /// How many nearest corners to consider per node.
    pub k_neighbors: usize,
    /// Tolerance for the saddle-orientation checks (degrees).
    pub orientation_tolerance_deg: f32,
}

impl Default for GridGraphParams {
    fn default() -> Self {
        Self {
            min_spacing_pix: 5.0,
            max_spacing_pix: 60.0,
            k_neighbors: 8,
            orientation_tolerance_deg: 22.5,
        }
    }
}

/// Parameters for lattice assembly and acceptance.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct ChessboardParams {
    /// Minimal corner strength to consider.
    pub min_strength: f32,

    /// Minimal number of corners in a component to be considered at all.
    pub min_corners: usize,

    /// Expected number of inner corners per column (lattice rows).
    pub expected_rows: Option<u32>,

    /// Expected number of inner corners per row (lattice columns).
    pub expected_cols: Option<u32>,

    /// Minimal fraction of occupied lattice cells in a detection.
    pub completeness_threshold: f32,
}

impl Default for ChessboardParams {
    fn default() -> Self {
        Self {
            min_strength: 0.0,
            min_corners: 16,
            expected_rows: None,
            expected_cols: None,
            completeness_threshold: 0.7,
        }
    }
}
