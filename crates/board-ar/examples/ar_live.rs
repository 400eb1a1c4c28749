//! Live wireframe-scene demo.
//!
//! Replays a frame directory in a window, detects the board on every
//! frame and overlays the stock scene. Esc/Q quits, Space pauses, S
//! steps one frame while paused.

use std::{env, path::PathBuf};

use board_ar::ar::annotate_frame;
use board_ar::calibration::load_calibration;
use board_ar::chessboard::BoardSpec;
use board_ar::detect;
use board_ar::frames::FrameSource;
use board_ar::pose::estimate_board_pose;
use board_ar::render::Canvas;
use board_ar::scene::stock_scene;
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
    let spec = BoardSpec::with_unit_squares(6, 9)?;
    let scene = stock_scene();
    let chess_cfg = detect::default_chess_config();
    let mut source = FrameSource::from_dir(&frames_dir)?;
    info!("{} frames in {}", source.len(), frames_dir.display());

    let [width, height] = calib.image_size;
    let mut window = Window::new(
        "board-ar: wireframe scene (Esc/Q quit, Space pause, S step)",
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
            match detect::detect_board(&frame.gray, &chess_cfg, &spec) {
                Some(board) => match estimate_board_pose(&calib.camera, &spec, &board) {
                    Some(estimate) => {
                        debug!(
                            "{}: {} corners, {:.2} px mean error",
                            frame.path.display(),
                            estimate.corners_used,
                            estimate.reprojection_error
                        );
                        annotate_frame(&mut canvas, &calib.camera, &board, &estimate, &scene);
                    }
                    None => debug!("{}: pose not recovered", frame.path.display()),
                },
                None => debug!("{}: board not found", frame.path.display()),
            }
        }

        window.update_with_buffer(&canvas.data, canvas.width, canvas.height)?;
    }
    Ok(())
}
