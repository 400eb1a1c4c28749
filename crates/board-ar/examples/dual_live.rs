//! Live two-board demo.
//!
//! Detects a 6x9 and a 5x7 board in the same frames, drawing a red
//! cylinder on the first and a green pyramid on the second. Esc/Q quits,
//! Space pauses, S steps one frame while paused.

use std::{env, path::PathBuf};

use board_ar::ar::draw_scene_object;
use board_ar::calibration::load_calibration;
use board_ar::chessboard::BoardSpec;
use board_ar::detect;
use board_ar::frames::FrameSource;
use board_ar::pose::estimate_board_pose;
use board_ar::render::Canvas;
use board_ar::scene::dual_board_objects;
use minifb::{Key, KeyRepeat, Window, WindowOptions};

#[cfg(not(feature = "tracing"))]
use log::{debug, info, LevelFilter};

#[cfg(feature = "tracing")]
use tracing::{debug, info};

#[cfg(feature = "tracing")]
use board_ar::core::init_tracing;
#[cfg(not(feature = "tracing"))]
use board_ar::core::init_with_level;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(not(feature = "tracing"))]
    init_with_level(LevelFilter::Info)?;

    #[cfg(feature = "tracing")]
    init_tracing(false);

    run()
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let calib_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("testdata/calibration.json"));
    let frames_dir = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("testdata/frames"));

    let calib = load_calibration(&calib_path)?;
    let specs = [
        BoardSpec::with_unit_squares(6, 9)?,
        BoardSpec::with_unit_squares(5, 7)?,
    ];
    let (cylinder, pyramid) = dual_board_objects();
    let objects = [cylinder, pyramid];
    let chess_cfg = detect::default_chess_config();
    let mut source = FrameSource::from_dir(&frames_dir)?;
    info!("{} frames in {}", source.len(), frames_dir.display());

    let [width, height] = calib.image_size;
    let mut window = Window::new(
        "board-ar: two boards (Esc/Q quit, Space pause, S step)",
        width as usize,
        height as usize,
        WindowOptions::default(),
    )?;
    window.set_target_fps(30);

    let mut canvas = Canvas::new(width as usize, height as usize);
    let mut paused = false;

    while window.is_open() && !window.is_key_down(Key::Escape) && !window.is_key_down(Key::Q) {
        if window.is_key_pressed(Key::Space, KeyRepeat::No) {
            paused = !paused;
        }
        let step = window.is_key_pressed(Key::S, KeyRepeat::No);

        if !paused || step {
            let Some(frame) = source.next_frame() else {
                source.rewind();
                continue;
            };
            let frame = frame?;

            canvas = Canvas::from_rgb(&frame.rgb.view());
            let boards = detect::detect_boards(&frame.gray, &chess_cfg, &specs);
            for ((spec, board), object) in specs.iter().zip(&boards).zip(&objects) {
                let Some(board) = board else {
                    debug!(
                        "{}: {}x{} board not found",
                        frame.path.display(),
                        spec.rows,
                        spec.cols
                    );
                    continue;
                };
                if let Some(estimate) = estimate_board_pose(&calib.camera, spec, board) {
                    draw_scene_object(&mut canvas, &calib.camera, &estimate.pose, object);
                }
            }
        }

        window.update_with_buffer(&canvas.data, canvas.width, canvas.height)?;
    }
    Ok(())
}
