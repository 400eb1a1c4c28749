//! Corner-to-corner neighbor graph.
//!
//! Each ChESS corner carries the direction of one saddle diagonal
//! (modulo pi). On a chessboard, adjacent corners have roughly orthogonal
//! diagonals, and the edge between them runs at ~45 degrees to both. Those
//! two facts, plus a spacing window, gate which k-nearest candidates
//! become lattice edges; BFS over the surviving 4-connected graph then
//! assigns integer (row, col) coordinates.

use board_ar_core::Corner;
use kiddo::{KdTree, SquaredEuclidean};
use nalgebra::Vector2;

use crate::params::GridGraphParams;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NeighborDirection {
    Right,
    Left,
    Up,
    Down,
}

#[derive(Debug)]
pub struct NodeNeighbor {
    pub direction: NeighborDirection,
    pub index: usize,
    pub distance: f32,
    pub score: f32,
}

/// Absolute angle difference normalized into `[0, pi]`.
fn angle_gap(a: f32, b: f32) -> f32 {
    let two_pi = 2.0 * std::f32::consts::PI;
    let mut diff = (b - a).rem_euclid(two_pi);
    if diff >= std::f32::consts::PI {
        diff -= two_pi;
    }
    diff.abs()
}

/// Whether two saddle diagonals (angles modulo pi) are roughly orthogonal.
fn saddles_orthogonal(a: f32, b: f32, tolerance: f32) -> bool {
    (std::f32::consts::FRAC_PI_2 - angle_gap(a, b)).abs() <= tolerance.abs()
}

/// Angle between an undirected axis (defined modulo pi) and a directed
/// vector angle, in `[0, pi/2]`.
fn axis_deviation(axis_angle: f32, vec_angle: f32) -> f32 {
    let two_pi = 2.0 * std::f32::consts::PI;
    let mut diff = (vec_angle - axis_angle).rem_euclid(two_pi);
    if diff >= std::f32::consts::PI {
        diff -= two_pi;
    }
    let diff_abs = diff.abs();
    // theta and theta + pi describe the same axis.
    diff_abs.min(std::f32::consts::PI - diff_abs)
}

fn direction_quadrant(step: &Vector2<f32>) -> NeighborDirection {
    if step.x.abs() > step.y.abs() {
        if step.x >= 0.0 {
            NeighborDirection::Right
        } else {
            NeighborDirection::Left
        }
    } else if step.y >= 0.0 {
        NeighborDirection::Down
    } else {
        NeighborDirection::Up
    }
}

fn accept_neighbor(
    corner: &Corner,
    neighbor: &Corner,
    neighbor_index: usize,
    params: &GridGraphParams,
) -> Option<NodeNeighbor> {
    let tol = params.orientation_tolerance_deg.to_radians();

    // Adjacent saddles alternate diagonals.
    if !saddles_orthogonal(corner.orientation, neighbor.orientation, tol) {
        return None;
    }

    let step = neighbor.position - corner.position;
    let distance = step.norm();
    if distance < params.min_spacing_pix || distance > params.max_spacing_pix {
        return None;
    }

    // A lattice edge runs at ~45 degrees to each endpoint diagonal.
    let edge_angle = step.y.atan2(step.x);
    let dev_a = (axis_deviation(corner.orientation, edge_angle) - std::f32::consts::FRAC_PI_4).abs();
    let dev_b =
        (axis_deviation(neighbor.orientation, edge_angle) - std::f32::consts::FRAC_PI_4).abs();
    if dev_a > tol || dev_b > tol {
        return None;
    }

    let ortho_dev = (std::f32::consts::FRAC_PI_2
        - angle_gap(corner.orientation, neighbor.orientation))
    .abs();
    let score = dev_a + dev_b + ortho_dev; // lower is better

    Some(NodeNeighbor {
        direction: direction_quadrant(&step),
        index: neighbor_index,
        distance,
        score,
    })
}

/// Keep at most one candidate per direction, lowest score first, shorter
/// edge on ties.
fn pick_per_direction(candidates: Vec<NodeNeighbor>) -> Vec<NodeNeighbor> {
    let mut best: [Option<NodeNeighbor>; 4] = [None, None, None, None];

    for candidate in candidates {
        let slot = match candidate.direction {
            NeighborDirection::Right => &mut best[0],
            NeighborDirection::Left => &mut best[1],
            NeighborDirection::Up => &mut best[2],
            NeighborDirection::Down => &mut best[3],
        };

        let replace = match slot {
            None => true,
            Some(current) => {
                candidate.score < current.score
                    || (candidate.score == current.score && candidate.distance < current.distance)
            }
        };

        if replace {
            *slot = Some(candidate);
        }
    }

    best.into_iter().flatten().collect()
}

pub struct GridGraph {
    /// Accepted neighbors per node, at most one per direction.
    pub neighbors: Vec<Vec<NodeNeighbor>>,
}

impl GridGraph {
    pub fn new(corners: &[Corner], params: &GridGraphParams) -> Self {
        let coords = corners
            .iter()
            .map(|c| [c.position.x, c.position.y])
            .collect::<Vec<_>>();
        let tree: KdTree<f32, 2> = (&coords).into();

        let mut neighbors = Vec::with_capacity(corners.len());
        for (i, corner) in corners.iter().enumerate() {
            let query = [corner.position.x, corner.position.y];
            let found = tree.nearest_n::<SquaredEuclidean>(&query, params.k_neighbors);

            let mut candidates = Vec::new();
            for nn in found {
                let neighbor_index = nn.item as usize;
                if neighbor_index == i {
                    continue;
                }
                if let Some(entry) =
                    accept_neighbor(corner, &corners[neighbor_index], neighbor_index, params)
                {
                    candidates.push(entry);
                }
            }

            neighbors.push(pick_per_direction(candidates));
        }

        Self { neighbors }
    }
}

/// Nodes reachable from one another through accepted edges, in discovery
/// order.
pub fn connected_components(graph: &GridGraph) -> Vec<Vec<usize>> {
    let mut visited = vec![false; graph.neighbors.len()];
    let mut components = Vec::new();

    for start in 0..graph.neighbors.len() {
        if visited[start] {
            continue;
        }

        let mut component = Vec::new();
        let mut stack = vec![start];

        while let Some(node) = stack.pop() {
            if visited[node] {
                continue;
            }
            visited[node] = true;
            component.push(node);

            for neighbor in &graph.neighbors[node] {
                if !visited[neighbor.index] {
                    stack.push(neighbor.index);
                }
            }
        }

        components.push(component);
    }

    components
}

/// BFS a component and assign integer lattice coordinates, starting from
/// `(0, 0)` at the component's first node. Coordinates may be negative;
/// callers normalize against the bounding box.
pub fn assign_lattice_coords(graph: &GridGraph, component: &[usize]) -> Vec<(usize, i32, i32)> {
    let mut coords = Vec::with_capacity(component.len());
    let mut visited = vec![false; graph.neighbors.len()];
    let mut queue = std::collections::VecDeque::new();

    queue.push_back((component[0], 0i32, 0i32));

    while let Some((node, row, col)) = queue.pop_front() {
        if visited[node] {
            continue;
        }
        visited[node] = true;
        coords.push((node, row, col));

        for neighbor in &graph.neighbors[node] {
            let (dr, dc) = match neighbor.direction {
                NeighborDirection::Right => (0, 1),
                NeighborDirection::Left => (0, -1),
                NeighborDirection::Up => (-1, 0),
                NeighborDirection::Down => (1, 0),
            };
            queue.push_back((neighbor.index, row + dr, col + dc));
        }
    }

    coords
}
