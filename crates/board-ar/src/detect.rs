use crate::{chessboard, core};
use chess_corners::{find_chess_corners_image, ChessConfig, CornerDescriptor};
use nalgebra::Point2;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced by the high-level facade helpers.
#[derive(thiserror::Error, Debug)]
pub enum DetectError {
    #[error("invalid grayscale image buffer length (expected {expected} bytes, got {got})")]
    InvalidGrayBuffer { expected: usize, got: usize },

    #[error("invalid grayscale image dimensions (width={width}, height={height})")]
    InvalidGrayDimensions { width: u32, height: u32 },
}

/// Reasonable default settings for the `chess-corners` ChESS detector.
///
/// This is tuned for the repo demos and is expected to be overridden by
/// callers for difficult real-world footage.
pub fn default_chess_config() -> ChessConfig {
    let mut cfg = ChessConfig::single_scale();
    cfg.params.threshold_rel = 0.2;
    cfg.params.nms_radius = 2;
    cfg
}

/// Convert an `image::GrayImage` into the lightweight `board-ar-core` view type.
pub fn gray_view(img: &::image::GrayImage) -> core::GrayImageView<'_> {
    core::GrayImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Detect raw ChESS corners using `chess-corners`.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(img, cfg), fields(width = img.width(), height = img.height()))
)]
pub fn detect_chess_corners_raw(
    img: &::image::GrayImage,
    cfg: &ChessConfig,
) -> Vec<CornerDescriptor> {
    find_chess_corners_image(img, cfg)
}

/// Detect ChESS corners and adapt them into `board-ar-core::Corner`.
pub fn detect_corners(img: &::image::GrayImage, cfg: &ChessConfig) -> Vec<core::Corner> {
    detect_chess_corners_raw(img, cfg)
        .iter()
        .map(adapt_chess_corner)
        .collect()
}

/// Convenience overload using `default_chess_config()`.
pub fn detect_corners_default(img: &::image::GrayImage) -> Vec<core::Corner> {
    let cfg = default_chess_config();
    detect_corners(img, &cfg)
}

/// Run the board detector end-to-end for one known board size:
/// ChESS corners -> lattice matching `spec.rows x spec.cols`.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "info",
        skip(img, chess_cfg, spec),
        fields(width = img.width(), height = img.height())
    )
)]
pub fn detect_board(
    img: &::image::GrayImage,
    chess_cfg: &ChessConfig,
    spec: &chessboard::BoardSpec,
) -> Option<chessboard::BoardDetection> {
    let corners = detect_corners(img, chess_cfg);
    let detector = chessboard::ChessboardDetector::with_expected_dims(spec.rows, spec.cols);
    detector.detect_from_corners(&corners)
}

/// Detect one board per spec from a single ChESS pass.
///
/// The returned vector is parallel to `specs`; a slot is `None` when no
/// lattice in the image fits that spec's dimensions. Lattices seen
/// rotated by 90 degrees are rotated back before matching, and each
/// detection is consumed by at most one spec.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "info",
        skip(img, chess_cfg, specs),
        fields(width = img.width(), height = img.height(), n_specs = specs.len())
    )
)]
pub fn detect_boards(
    img: &::image::GrayImage,
    chess_cfg: &ChessConfig,
    specs: &[chessboard::BoardSpec],
) -> Vec<Option<chessboard::BoardDetection>> {
    let corners = detect_corners(img, chess_cfg);
    let detector = chessboard::ChessboardDetector::default();
    let detections = detector.detect_all_from_corners(&corners);
    match_detections_to_specs(detections, specs)
}

/// Build an `image::GrayImage` from a raw grayscale buffer.
pub fn gray_image_from_slice(
    width: u32,
    height: u32,
    pixels: &[u8],
) -> Result<::image::GrayImage, DetectError> {
    let w = usize::try_from(width).ok();
    let h = usize::try_from(height).ok();
    let Some((w, h)) = w.zip(h) else {
        return Err(DetectError::InvalidGrayDimensions { width, height });
    };
    let Some(expected) = w.checked_mul(h) else {
        return Err(DetectError::InvalidGrayDimensions { width, height });
    };
    if pixels.len() != expected {
        return Err(DetectError::InvalidGrayBuffer {
            expected,
            got: pixels.len(),
        });
    }
    ::image::GrayImage::from_raw(width, height, pixels.to_vec())
        .ok_or(DetectError::InvalidGrayDimensions { width, height })
}

pub fn detect_board_from_gray_u8(
    width: u32,
    height: u32,
    pixels: &[u8],
    chess_cfg: &ChessConfig,
    spec: &chessboard::BoardSpec,
) -> Result<Option<chessboard::BoardDetection>, DetectError> {
    let img = gray_image_from_slice(width, height, pixels)?;
    Ok(detect_board(&img, chess_cfg, spec))
}

pub fn detect_boards_from_gray_u8(
    width: u32,
    height: u32,
    pixels: &[u8],
    chess_cfg: &ChessConfig,
    specs: &[chessboard::BoardSpec],
) -> Result<Vec<Option<chessboard::BoardDetection>>, DetectError> {
    let img = gray_image_from_slice(width, height, pixels)?;
    Ok(detect_boards(&img, chess_cfg, specs))
}

fn adapt_chess_corner(c: &CornerDescriptor) -> core::Corner {
    core::Corner {
        position: Point2::new(c.x, c.y),
        orientation: c.orientation,
        strength: c.response,
    }
}

/// Relabel a detection's lattice by a quarter turn clockwise.
fn rotate_detection_cw(d: &chessboard::BoardDetection) -> chessboard::BoardDetection {
    let (rows, cols) = (d.rows as usize, d.cols as usize);
    let mut corners = vec![None; rows * cols];
    for r in 0..rows {
        for c in 0..cols {
            // Old cell (r, c) lands at (c, rows - 1 - r) in the rotated grid.
            corners[c * rows + (rows - 1 - r)] = d.corners[r * cols + c];
        }
    }
    chessboard::BoardDetection {
        rows: d.cols,
        cols: d.rows,
        corners,
        completeness: d.completeness,
    }
}

fn match_detections_to_specs(
    mut detections: Vec<chessboard::BoardDetection>,
    specs: &[chessboard::BoardSpec],
) -> Vec<Option<chessboard::BoardDetection>> {
    let mut out: Vec<Option<chessboard::BoardDetection>> = specs.iter().map(|_| None).collect();
    for (slot, spec) in out.iter_mut().zip(specs) {
        if let Some(i) = detections
            .iter()
            .position(|d| d.rows == spec.rows && d.cols == spec.cols)
        {
            *slot = Some(detections.swap_remove(i));
        } else if let Some(i) = detections
            .iter()
            .position(|d| d.rows == spec.cols && d.cols == spec.rows)
        {
            *slot = Some(rotate_detection_cw(&detections.swap_remove(i)));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chessboard::{BoardDetection, BoardSpec};

    fn full_detection(rows: u32, cols: u32, offset: f32) -> BoardDetection {
        let corners = (0..rows)
            .flat_map(|r| {
                (0..cols).map(move |c| {
                    Some(Point2::new(
                        offset + c as f32 * 10.0,
                        offset + r as f32 * 10.0,
                    ))
                })
            })
            .collect();
        BoardDetection {
            rows,
            cols,
            corners,
            completeness: 1.0,
        }
    }

    #[test]
    fn gray_image_from_slice_checks_the_buffer_length() {
        let img = gray_image_from_slice(4, 3, &[0u8; 12]).expect("valid");
        assert_eq!(4, img.width());
        assert_eq!(3, img.height());

        let err = gray_image_from_slice(4, 3, &[0u8; 11]).unwrap_err();
        assert!(
            matches!(
                err,
                DetectError::InvalidGrayBuffer {
                    expected: 12,
                    got: 11
                }
            ),
            "{err:?}"
        );
    }

    #[test]
    fn gray_image_from_slice_rejects_overflowing_dimensions() {
        let err = gray_image_from_slice(u32::MAX, u32::MAX, &[]).unwrap_err();
        assert!(matches!(err, DetectError::InvalidGrayDimensions { .. }), "{err:?}");
    }

    #[test]
    fn rotating_a_detection_quarter_turn_swaps_dimensions() {
        let d = full_detection(2, 3, 0.0);
        let rotated = rotate_detection_cw(&d);
        assert_eq!(3, rotated.rows);
        assert_eq!(2, rotated.cols);

        // Old (0, 0) becomes the top-right cell of the rotated lattice.
        assert_eq!(d.corner(0, 0), rotated.corner(0, 1));
        assert_eq!(d.corner(1, 0), rotated.corner(0, 0));
        assert_eq!(d.corner(0, 2), rotated.corner(2, 1));
        assert_eq!(d.present_count(), rotated.present_count());
    }

    #[test]
    fn detections_are_matched_to_specs_by_dimension() {
        let specs = [
            BoardSpec::with_unit_squares(6, 9).expect("spec"),
            BoardSpec::with_unit_squares(5, 7).expect("spec"),
        ];
        let detections = vec![full_detection(5, 7, 600.0), full_detection(6, 9, 0.0)];

        let matched = match_detections_to_specs(detections, &specs);
        assert_eq!(2, matched.len());
        assert_eq!(9, matched[0].as_ref().expect("first board").cols);
        assert_eq!(7, matched[1].as_ref().expect("second board").cols);
    }

    #[test]
    fn portrait_specs_match_rotated_detections() {
        // The assembler normalizes lattices to landscape, so a 9x6 spec
        // only ever sees 6x9 detections.
        let specs = [BoardSpec::with_unit_squares(9, 6).expect("spec")];
        let matched = match_detections_to_specs(vec![full_detection(6, 9, 0.0)], &specs);

        let board = matched[0].as_ref().expect("matched after rotation");
        assert_eq!(9, board.rows);
        assert_eq!(6, board.cols);
        assert_eq!(54, board.present_count());
    }

    #[test]
    fn unmatched_specs_get_an_empty_slot() {
        let specs = [
            BoardSpec::with_unit_squares(6, 9).expect("spec"),
            BoardSpec::with_unit_squares(4, 4).expect("spec"),
        ];
        let matched = match_detections_to_specs(vec![full_detection(6, 9, 0.0)], &specs);
        assert!(matched[0].is_some());
        assert!(matched[1].is_none());
    }

    #[test]
    fn each_detection_feeds_at_most_one_spec() {
        let specs = [
            BoardSpec::with_unit_squares(6, 9).expect("spec"),
            BoardSpec::with_unit_squares(6, 9).expect("spec"),
        ];
        let matched = match_detections_to_specs(vec![full_detection(6, 9, 0.0)], &specs);
        assert!(matched[0].is_some());
        assert!(matched[1].is_none());
    }
}
