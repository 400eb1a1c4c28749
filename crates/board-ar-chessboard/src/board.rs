use board_ar_core::math::{Pt3, Real};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoardSpecError {
    #[error("board needs at least 2x2 inner corners, got {rows}x{cols}")]
    TooSmall { rows: u32, cols: u32 },
    #[error("square size must be positive and finite, got {0}")]
    BadSquareSize(Real),
}

/// Geometry of a physical chessboard, counted in *inner* corners.
///
/// An OpenCV-style "9x6" pattern has 9 corners per row, i.e.
/// `cols = 9, rows = 6`. The board frame puts corner `(row, col)` at
/// `(row * square_size, col * square_size, 0)`, so the X axis runs down
/// the columns of squares and Z points out of the board plane.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSpec {
    pub rows: u32,
    pub cols: u32,
    pub square_size: Real,
}

impl BoardSpec {
    pub fn new(rows: u32, cols: u32, square_size: Real) -> Result<Self, BoardSpecError> {
        if rows < 2 || cols < 2 {
            return Err(BoardSpecError::TooSmall { rows, cols });
        }
        if !square_size.is_finite() || square_size <= 0.0 {
            return Err(BoardSpecError::BadSquareSize(square_size));
        }
        Ok(Self {
            rows,
            cols,
            square_size,
        })
    }

    /// Board with unit squares, the convention of the wireframe demos.
    pub fn with_unit_squares(rows: u32, cols: u32) -> Result<Self, BoardSpecError> {
        Self::new(rows, cols, 1.0)
    }

    pub fn corner_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    pub fn world_point(&self, row: u32, col: u32) -> Pt3 {
        Pt3::new(
            row as Real * self.square_size,
            col as Real * self.square_size,
            0.0,
        )
    }

    /// All inner-corner reference points, row-major.
    pub fn world_points(&self) -> Vec<Pt3> {
        let mut pts = Vec::with_capacity(self.corner_count());
        for r in 0..self.rows {
            for c in 0..self.cols {
                pts.push(self.world_point(r, c));
            }
        }
        pts
    }
}
