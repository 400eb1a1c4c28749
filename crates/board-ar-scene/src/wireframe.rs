//! Wireframe primitives as vertex lists plus edge index pairs.

use board_ar_core::math::{Pt3, Real};

/// A 3D line model: vertices in board-world coordinates and edges as
/// index pairs into the vertex list.
#[derive(Clone, Debug, Default)]
pub struct Wireframe {
    pub vertices: Vec<Pt3>,
    pub edges: Vec<[usize; 2]>,
}

impl Wireframe {
    /// A vertical cylinder standing on `base_center`.
    ///
    /// Vertices interleave base and top per segment: index `2i` is the
    /// i-th base-ring point, `2i + 1` the top-ring point above it. Edges
    /// are one vertical line per segment plus the two rings.
    pub fn cylinder(base_center: Pt3, radius: Real, height: Real, segments: usize) -> Self {
        let mut vertices = Vec::with_capacity(segments * 2);
        let mut edges = Vec::with_capacity(segments * 3);

        for i in 0..segments {
            let angle = 2.0 * std::f64::consts::PI * i as Real / segments as Real;
            let x = base_center.x + radius * angle.cos();
            let y = base_center.y + radius * angle.sin();
            vertices.push(Pt3::new(x, y, base_center.z));
            vertices.push(Pt3::new(x, y, base_center.z + height));

            let next = (i + 1) % segments;
            edges.push([i * 2, i * 2 + 1]);
            edges.push([i * 2, next * 2]);
            edges.push([i * 2 + 1, next * 2 + 1]);
        }

        Self { vertices, edges }
    }

    /// An axis-aligned box between two opposite corners `a` and `b`.
    ///
    /// The face at `a.z` comes first, then the face at `b.z`, each in
    /// ring order starting from `(a.x, a.y)`.
    pub fn cuboid(a: Pt3, b: Pt3) -> Self {
        let vertices = vec![
            Pt3::new(a.x, a.y, a.z),
            Pt3::new(b.x, a.y, a.z),
            Pt3::new(b.x, b.y, a.z),
            Pt3::new(a.x, b.y, a.z),
            Pt3::new(a.x, a.y, b.z),
            Pt3::new(b.x, a.y, b.z),
            Pt3::new(b.x, b.y, b.z),
            Pt3::new(a.x, b.y, b.z),
        ];
        let edges = vec![
            [0, 1],
            [1, 2],
            [2, 3],
            [3, 0],
            [4, 5],
            [5, 6],
            [6, 7],
            [7, 4],
            [0, 4],
            [1, 5],
            [2, 6],
            [3, 7],
        ];
        Self { vertices, edges }
    }

    /// A pyramid over an arbitrary quadrilateral base; the apex is the
    /// last vertex.
    pub fn pyramid_with_base(base: [Pt3; 4], apex: Pt3) -> Self {
        let vertices = vec![base[0], base[1], base[2], base[3], apex];
        let edges = vec![
            [0, 1],
            [1, 2],
            [2, 3],
            [3, 0],
            [0, 4],
            [1, 4],
            [2, 4],
            [3, 4],
        ];
        Self { vertices, edges }
    }

    /// A square-based pyramid centered on `base_center`.
    pub fn pyramid(base_center: Pt3, half_width: Real, height: Real) -> Self {
        let (cx, cy, cz) = (base_center.x, base_center.y, base_center.z);
        Self::pyramid_with_base(
            [
                Pt3::new(cx - half_width, cy - half_width, cz),
                Pt3::new(cx + half_width, cy - half_width, cz),
                Pt3::new(cx + half_width, cy + half_width, cz),
                Pt3::new(cx - half_width, cy + half_width, cz),
            ],
            Pt3::new(cx, cy, cz + height),
        )
    }
}

/// Board-frame axis endpoints for pose visualization. Drawn by
/// convention X red, Y green, Z blue.
#[derive(Clone, Copy, Debug)]
pub struct Axes {
    pub origin: Pt3,
    pub x_end: Pt3,
    pub y_end: Pt3,
    pub z_end: Pt3,
}

impl Axes {
    pub fn new(length: Real) -> Self {
        Self {
            origin: Pt3::origin(),
            x_end: Pt3::new(length, 0.0, 0.0),
            y_end: Pt3::new(0.0, length, 0.0),
            z_end: Pt3::new(0.0, 0.0, length),
        }
    }
}
