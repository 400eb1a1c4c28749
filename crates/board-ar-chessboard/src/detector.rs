//! Lattice assembly and board detection on top of the neighbor graph.

use std::cmp::Reverse;

use board_ar_core::math::Pt3;
use board_ar_core::Corner;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::board::BoardSpec;
use crate::graph::{assign_lattice_coords, connected_components, GridGraph};
use crate::params::{ChessboardParams, GridGraphParams};

/// A chessboard found in one frame.
///
/// Corners are stored row-major over the `rows x cols` inner-corner
/// lattice; cells the detector could not fill are `None`.
#[derive(Clone, Debug)]
pub struct BoardDetection {
    pub rows: u32,
    pub cols: u32,
    pub corners: Vec<Option<Point2<f32>>>,
    /// Fraction of lattice cells occupied, in `[0, 1]`.
    pub completeness: f32,
}

impl BoardDetection {
    pub fn corner(&self, row: u32, col: u32) -> Option<Point2<f32>> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.corners[(row * self.cols + col) as usize]
    }

    pub fn present_count(&self) -> usize {
        self.corners.iter().flatten().count()
    }

    /// The four extreme lattice corners in TL, TR, BR, BL order, if all
    /// of them were detected.
    pub fn outer_corners(&self) -> Option<[Point2<f32>; 4]> {
        Some([
            self.corner(0, 0)?,
            self.corner(0, self.cols - 1)?,
            self.corner(self.rows - 1, self.cols - 1)?,
            self.corner(self.rows - 1, 0)?,
        ])
    }

    /// World/image pairs for every detected corner, row-major. `None` if
    /// `spec` and this detection disagree on dimensions.
    pub fn correspondences(&self, spec: &BoardSpec) -> Option<Vec<(Pt3, Point2<f32>)>> {
        if self.rows != spec.rows || self.cols != spec.cols {
            return None;
        }
        let mut pairs = Vec::with_capacity(self.present_count());
        for row in 0..self.rows {
            for col in 0..self.cols {
                if let Some(pixel) = self.corner(row, col) {
                    pairs.push((spec.world_point(row, col), pixel));
                }
            }
        }
        Some(pairs)
    }
}

/// Assembles chessboard lattices from saddle corners.
///
/// The detector builds an orientation-gated neighbor graph, walks its
/// connected components, assigns integer lattice coordinates by BFS and
/// keeps components that fill their bounding lattice well enough. When
/// expected dimensions are set, only components matching them (under one
/// of the four lattice rotations) are accepted.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChessboardDetector {
    pub graph: GridGraphParams,
    pub params: ChessboardParams,
}

impl ChessboardDetector {
    pub fn new(graph: GridGraphParams, params: ChessboardParams) -> Self {
        Self { graph, params }
    }

    pub fn with_expected_dims(rows: u32, cols: u32) -> Self {
        Self {
            params: ChessboardParams {
                expected_rows: Some(rows),
                expected_cols: Some(cols),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// The single best board in the corner set, largest component first.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip(self, corners), fields(n_corners = corners.len()))
    )]
    pub fn detect_from_corners(&self, corners: &[Corner]) -> Option<BoardDetection> {
        let strong = self.filter_by_strength(corners);
        if strong.len() < self.params.min_corners {
            log::debug!(
                "{} corners after strength gate, need at least {}",
                strong.len(),
                self.params.min_corners
            );
            return None;
        }

        let graph = GridGraph::new(&strong, &self.graph);
        let mut components = connected_components(&graph);
        components.sort_by_key(|c| Reverse(c.len()));

        let expected = self.expected_dims();
        for component in &components {
            if component.len() < self.params.min_corners {
                break;
            }
            if let Some(detection) = self.assemble(&graph, component, &strong, expected) {
                return Some(detection);
            }
        }
        None
    }

    /// Every acceptable board lattice, one per qualifying component.
    ///
    /// Expected dimensions are ignored here; callers working with several
    /// board sizes match the returned detections by dimension themselves.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip(self, corners), fields(n_corners = corners.len()))
    )]
    pub fn detect_all_from_corners(&self, corners: &[Corner]) -> Vec<BoardDetection> {
        let strong = self.filter_by_strength(corners);
        if strong.len() < self.params.min_corners {
            return Vec::new();
        }

        let graph = GridGraph::new(&strong, &self.graph);
        connected_components(&graph)
            .iter()
            .filter(|c| c.len() >= self.params.min_corners)
            .filter_map(|c| self.assemble(&graph, c, &strong, None))
            .collect()
    }

    fn expected_dims(&self) -> Option<(u32, u32)> {
        match (self.params.expected_rows, self.params.expected_cols) {
            (Some(rows), Some(cols)) => Some((rows, cols)),
            _ => None,
        }
    }

    fn filter_by_strength(&self, corners: &[Corner]) -> Vec<Corner> {
        corners
            .iter()
            .filter(|c| c.strength >= self.params.min_strength)
            .copied()
            .collect()
    }

    fn assemble(
        &self,
        graph: &GridGraph,
        component: &[usize],
        corners: &[Corner],
        expected: Option<(u32, u32)>,
    ) -> Option<BoardDetection> {
        let coords = assign_lattice_coords(graph, component);
        let grid = build_component_grid(&coords, corners);
        let oriented = pick_orientation(grid, corners, expected)?;
        let detection = detection_from_grid(&oriented, corners);

        if detection.completeness < self.params.completeness_threshold {
            log::debug!(
                "{}x{} lattice too sparse, completeness {:.2}",
                detection.rows,
                detection.cols,
                detection.completeness
            );
            return None;
        }
        log::debug!(
            "assembled {}x{} lattice, completeness {:.2}",
            detection.rows,
            detection.cols,
            detection.completeness
        );
        Some(detection)
    }
}

/// Dense occupancy of a component's bounding lattice. Cells hold indices
/// into the corner slice the graph was built from.
struct ComponentGrid {
    height: usize,
    width: usize,
    cells: Vec<Option<usize>>,
}

fn build_component_grid(coords: &[(usize, i32, i32)], corners: &[Corner]) -> ComponentGrid {
    if coords.is_empty() {
        return ComponentGrid {
            height: 0,
            width: 0,
            cells: Vec::new(),
        };
    }

    let mut min_r = i32::MAX;
    let mut max_r = i32::MIN;
    let mut min_c = i32::MAX;
    let mut max_c = i32::MIN;
    for &(_, r, c) in coords {
        min_r = min_r.min(r);
        max_r = max_r.max(r);
        min_c = min_c.min(c);
        max_c = max_c.max(c);
    }

    let height = (max_r - min_r + 1) as usize;
    let width = (max_c - min_c + 1) as usize;
    let mut cells: Vec<Option<usize>> = vec![None; height * width];

    for &(idx, r, c) in coords {
        let cell = (r - min_r) as usize * width + (c - min_c) as usize;
        let keep_new = match cells[cell] {
            None => true,
            // Two nodes claiming one cell: keep the stronger corner.
            Some(prev) => corners[idx].strength > corners[prev].strength,
        };
        if keep_new {
            cells[cell] = Some(idx);
        }
    }

    ComponentGrid {
        height,
        width,
        cells,
    }
}

/// Rotate the lattice labels 90 degrees clockwise. Image positions are
/// untouched; only the (row, col) labeling changes.
fn rotate_once(grid: &ComponentGrid) -> ComponentGrid {
    let (h, w) = (grid.height, grid.width);
    let mut cells = vec![None; h * w];
    for r in 0..h {
        for c in 0..w {
            cells[c * h + (h - 1 - r)] = grid.cells[r * w + c];
        }
    }
    ComponentGrid {
        height: w,
        width: h,
        cells,
    }
}

fn anchor_key(grid: &ComponentGrid, corners: &[Corner]) -> (f32, f32) {
    grid.cells
        .iter()
        .flatten()
        .next()
        .map(|&idx| (corners[idx].position.y, corners[idx].position.x))
        .unwrap_or((f32::INFINITY, f32::INFINITY))
}

/// Normalize the lattice orientation over the four label rotations.
///
/// With expected dimensions, keep rotations matching them exactly;
/// without, keep landscape rotations (`width >= height`). Ties resolve to
/// the rotation whose first occupied cell sits topmost, then leftmost, in
/// the image, which makes the labeling stable across frames.
fn pick_orientation(
    grid: ComponentGrid,
    corners: &[Corner],
    expected: Option<(u32, u32)>,
) -> Option<ComponentGrid> {
    let mut candidates = Vec::with_capacity(4);
    let mut current = grid;
    for _ in 0..4 {
        let next = rotate_once(&current);
        candidates.push(current);
        current = next;
    }

    candidates
        .into_iter()
        .filter(|g| match expected {
            Some((rows, cols)) => g.height == rows as usize && g.width == cols as usize,
            None => g.width >= g.height,
        })
        .min_by(|a, b| {
            let ka = anchor_key(a, corners);
            let kb = anchor_key(b, corners);
            ka.0.total_cmp(&kb.0).then(ka.1.total_cmp(&kb.1))
        })
}

fn detection_from_grid(grid: &ComponentGrid, corners: &[Corner]) -> BoardDetection {
    let total = grid.cells.len();
    let mut out = Vec::with_capacity(total);
    let mut present = 0usize;
    for cell in &grid.cells {
        match cell {
            Some(idx) => {
                present += 1;
                out.push(Some(corners[*idx].position));
            }
            None => out.push(None),
        }
    }
    BoardDetection {
        rows: grid.height as u32,
        cols: grid.width as u32,
        corners: out,
        completeness: if total == 0 {
            0.0
        } else {
            present as f32 / total as f32
        },
    }
}
