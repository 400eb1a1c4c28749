//! Harris corner viewer.
//!
//! Shows one image with detected Harris corners marked; R toggles
//! between the image and the normalized response map. Esc/Q quits.

use std::{env, path::PathBuf};

use board_ar::detect;
use board_ar::frames::load_frame;
use board_ar::harris::{harris_corners, harris_response, HarrisParams};
use board_ar::render::{color, Canvas};
use minifb::{Key, KeyRepeat, Window, WindowOptions};

#[cfg(not(feature = "tracing"))]
use log::{info, LevelFilter};

#[cfg(feature = "tracing")]
use tracing::info;

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
    let image_path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("testdata/frames/frame_000.png"));

    let frame = load_frame(&image_path)?;
    let view = detect::gray_view(&frame.gray);
    let params = HarrisParams::default();

    let corners = harris_corners(&view, &params);
    info!("{} Harris corners in {}", corners.len(), image_path.display());

    let mut marked = Canvas::from_rgb(&frame.rgb.view());
    for c in &corners {
        marked.draw_cross(c.x as i32, c.y as i32, 3, color::RED);
    }

    let response_gray = harris_response(&view, &params).to_gray_image();
    let response = Canvas::from_gray(&response_gray.view());

    let mut window = Window::new(
        "board-ar: Harris corners (Esc/Q quit, R toggle response)",
        marked.width,
        marked.height,
        WindowOptions::default(),
    )?;
    window.set_target_fps(30);

    let mut show_response = false;
    while window.is_open() && !window.is_key_down(Key::Escape) && !window.is_key_down(Key::Q) {
        if window.is_key_pressed(Key::R, KeyRepeat::No) {
            show_response = !show_response;
        }
        let canvas = if show_response { &response } else { &marked };
        window.update_with_buffer(&canvas.data, canvas.width, canvas.height)?;
    }
    Ok(())
}
