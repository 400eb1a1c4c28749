//! Live image-overlay demo.
//!
//! Warps a chosen image onto the detected board in each frame. No
//! calibration is needed; the mapping is a pure four-point homography
//! between the image corners and the board's outer corners. Esc/Q quits,
//! Space pauses, S steps one frame while paused.

use std::{env, path::PathBuf};

use board_ar::chessboard::BoardSpec;
use board_ar::detect;
use board_ar::frames::{load_frame, FrameSource};
use board_ar::overlay::overlay_image;
use board_ar::render::Canvas;
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
    let frames_dir = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("testdata/frames"));
    let image_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("testdata/overlay.png"));

    let spec = BoardSpec::with_unit_squares(6, 9)?;
    let overlay_src = load_frame(&image_path)?;
    let chess_cfg = detect::default_chess_config();
    let mut source = FrameSource::from_dir(&frames_dir)?;
    info!(
        "{} frames in {}, overlaying {}",
        source.len(),
        frames_dir.display(),
        image_path.display()
    );

    // Window size comes from the first frame.
    let Some(first) = source.next_frame() else {
        return Ok(());
    };
    let first = first?;
    let (width, height) = (first.rgb.width, first.rgb.height);
    source.rewind();

    let mut window = Window::new(
        "board-ar: image overlay (Esc/Q quit, Space pause, S step)",
        width,
        height,
        WindowOptions::default(),
    )?;
    window.set_target_fps(30);

    let mut canvas = Canvas::new(width, height);
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
                Some(board) => {
                    if !overlay_image(&mut canvas, &board, &overlay_src.rgb.view()) {
                        debug!("{}: outer corners unusable", frame.path.display());
                    }
                }
                None => debug!("{}: board not found", frame.path.display()),
            }
        }

        window.update_with_buffer(&canvas.data, canvas.width, canvas.height)?;
    }
    Ok(())
}
