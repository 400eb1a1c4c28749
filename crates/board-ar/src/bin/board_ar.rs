//! Batch demo driver.
//!
//! Reads frames from a directory, runs one of the demo pipelines and
//! writes annotated PNGs. The interactive window variants live in the
//! crate examples (`ar_live`, `dual_live`, `overlay_live`, `harris_live`).

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use board_ar::ar::{annotate_frame, draw_scene_object};
use board_ar::calibration::{load_calibration, save_calibration, CameraCalibration};
use board_ar::chessboard::BoardSpec;
use board_ar::detect;
use board_ar::frames::{load_frame, FrameSource};
use board_ar::harris::{harris_corners, harris_response, HarrisParams};
use board_ar::overlay::overlay_image;
use board_ar::pose::estimate_board_pose;
use board_ar::render::{color, Canvas};
use board_ar::scene::{dual_board_objects, stock_scene};

#[cfg(not(feature = "tracing"))]
use board_ar::core::init_with_level;
#[cfg(not(feature = "tracing"))]
use log::LevelFilter;

#[cfg(feature = "tracing")]
use board_ar::core::init_tracing;

#[derive(Parser)]
#[command(name = "board-ar", version, about = "Chessboard-anchored AR demos")]
struct Cli {
    /// Log at debug level instead of info.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Overlay the stock wireframe scene on each frame.
    Ar(ArArgs),
    /// Track two boards at once and draw one object on each.
    Dual(DualArgs),
    /// Warp an image onto the detected board.
    Overlay(OverlayArgs),
    /// Harris corner response for a single image.
    Harris(HarrisArgs),
    /// Write a calibration template to edit by hand.
    InitCalib(InitCalibArgs),
}

#[derive(clap::Args)]
struct ArArgs {
    /// Calibration JSON file.
    #[arg(long)]
    calib: PathBuf,
    /// Directory of input frames.
    #[arg(long)]
    frames: PathBuf,
    /// Inner-corner rows of the board.
    #[arg(long, default_value_t = 6)]
    rows: u32,
    /// Inner-corner columns of the board.
    #[arg(long, default_value_t = 9)]
    cols: u32,
    /// Output directory for annotated frames.
    #[arg(long)]
    out: PathBuf,
}

#[derive(clap::Args)]
struct DualArgs {
    #[arg(long)]
    calib: PathBuf,
    #[arg(long)]
    frames: PathBuf,
    /// First board, drawn with the cylinder.
    #[arg(long, default_value_t = 6)]
    rows_a: u32,
    #[arg(long, default_value_t = 9)]
    cols_a: u32,
    /// Second board, drawn with the pyramid.
    #[arg(long, default_value_t = 5)]
    rows_b: u32,
    #[arg(long, default_value_t = 7)]
    cols_b: u32,
    #[arg(long)]
    out: PathBuf,
}

#[derive(clap::Args)]
struct OverlayArgs {
    #[arg(long)]
    frames: PathBuf,
    /// Image warped onto the board.
    #[arg(long)]
    image: PathBuf,
    #[arg(long, default_value_t = 6)]
    rows: u32,
    #[arg(long, default_value_t = 9)]
    cols: u32,
    #[arg(long)]
    out: PathBuf,
}

#[derive(clap::Args)]
struct HarrisArgs {
    /// Input image.
    #[arg(long)]
    input: PathBuf,
    /// Output image with detected corners marked.
    #[arg(long)]
    out: PathBuf,
    /// Also write the min-max normalized response map here.
    #[arg(long)]
    response_out: Option<PathBuf>,
    /// Response threshold relative to the maximum.
    #[arg(long, default_value_t = 0.01)]
    threshold_rel: f32,
}

#[derive(clap::Args)]
struct InitCalibArgs {
    #[arg(long, default_value_t = 640)]
    width: u32,
    #[arg(long, default_value_t = 480)]
    height: u32,
    /// Write to this file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    #[cfg(not(feature = "tracing"))]
    {
        let level = if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };
        let _ = init_with_level(level);
    }
    #[cfg(feature = "tracing")]
    init_tracing(false);

    let result = match cli.command {
        Command::Ar(args) => run_ar(args),
        Command::Dual(args) => run_dual(args),
        Command::Overlay(args) => run_overlay(args),
        Command::Harris(args) => run_harris(args),
        Command::InitCalib(args) => run_init_calib(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run_ar(args: ArArgs) -> Result<(), Box<dyn std::error::Error>> {
    let calib = load_calibration(&args.calib)?;
    let spec = BoardSpec::with_unit_squares(args.rows, args.cols)?;
    let scene = stock_scene();
    let chess_cfg = detect::default_chess_config();
    fs::create_dir_all(&args.out)?;

    let mut source = FrameSource::from_dir(&args.frames)?;
    let mut found = 0usize;
    let mut total = 0usize;
    while let Some(frame) = source.next_frame() {
        let frame = frame?;
        total += 1;

        let mut canvas = Canvas::from_rgb(&frame.rgb.view());
        match detect::detect_board(&frame.gray, &chess_cfg, &spec) {
            Some(board) => match estimate_board_pose(&calib.camera, &spec, &board) {
                Some(estimate) => {
                    found += 1;
                    let t = estimate.pose.translation.vector;
                    log::debug!(
                        "{}: {} corners, t = ({:.2}, {:.2}, {:.2}), mean reprojection {:.2} px",
                        frame.path.display(),
                        estimate.corners_used,
                        t.x,
                        t.y,
                        t.z,
                        estimate.reprojection_error
                    );
                    annotate_frame(&mut canvas, &calib.camera, &board, &estimate, &scene);
                }
                None => log::debug!("{}: homography did not decompose", frame.path.display()),
            },
            None => log::debug!("{}: board not found", frame.path.display()),
        }

        save_canvas(&canvas, &out_path(&args.out, &frame.path))?;
    }

    log::info!(
        "annotated {found}/{total} frames into {}",
        args.out.display()
    );
    Ok(())
}

fn run_dual(args: DualArgs) -> Result<(), Box<dyn std::error::Error>> {
    let calib = load_calibration(&args.calib)?;
    let specs = [
        BoardSpec::with_unit_squares(args.rows_a, args.cols_a)?,
        BoardSpec::with_unit_squares(args.rows_b, args.cols_b)?,
    ];
    let (cylinder, pyramid) = dual_board_objects();
    let objects = [cylinder, pyramid];
    let chess_cfg = detect::default_chess_config();
    fs::create_dir_all(&args.out)?;

    let mut source = FrameSource::from_dir(&args.frames)?;
    while let Some(frame) = source.next_frame() {
        let frame = frame?;

        let mut canvas = Canvas::from_rgb(&frame.rgb.view());
        let boards = detect::detect_boards(&frame.gray, &chess_cfg, &specs);
        for ((spec, board), object) in specs.iter().zip(&boards).zip(&objects) {
            let Some(board) = board else {
                log::debug!(
                    "{}: {}x{} board not found",
                    frame.path.display(),
                    spec.rows,
                    spec.cols
                );
                continue;
            };
            match estimate_board_pose(&calib.camera, spec, board) {
                Some(estimate) => {
                    log::debug!(
                        "{}: {}x{} at {:.2} px error",
                        frame.path.display(),
                        spec.rows,
                        spec.cols,
                        estimate.reprojection_error
                    );
                    draw_scene_object(&mut canvas, &calib.camera, &estimate.pose, object);
                }
                None => log::debug!(
                    "{}: {}x{} pose not recovered",
                    frame.path.display(),
                    spec.rows,
                    spec.cols
                ),
            }
        }

        save_canvas(&canvas, &out_path(&args.out, &frame.path))?;
    }
    Ok(())
}

fn run_overlay(args: OverlayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let overlay_src = load_frame(&args.image)?;
    let spec = BoardSpec::with_unit_squares(args.rows, args.cols)?;
    let chess_cfg = detect::default_chess_config();
    fs::create_dir_all(&args.out)?;

    let mut source = FrameSource::from_dir(&args.frames)?;
    while let Some(frame) = source.next_frame() {
        let frame = frame?;

        let mut canvas = Canvas::from_rgb(&frame.rgb.view());
        match detect::detect_board(&frame.gray, &chess_cfg, &spec) {
            Some(board) => {
                if !overlay_image(&mut canvas, &board, &overlay_src.rgb.view()) {
                    log::debug!("{}: outer corners unusable", frame.path.display());
                }
            }
            None => log::debug!("{}: board not found", frame.path.display()),
        }

        save_canvas(&canvas, &out_path(&args.out, &frame.path))?;
    }
    Ok(())
}

fn run_harris(args: HarrisArgs) -> Result<(), Box<dyn std::error::Error>> {
    let frame = load_frame(&args.input)?;
    let view = detect::gray_view(&frame.gray);

    let params = HarrisParams {
        threshold_rel: args.threshold_rel,
        ..Default::default()
    };
    let corners = harris_corners(&view, &params);
    log::info!("{} Harris corners in {}", corners.len(), args.input.display());

    let mut canvas = Canvas::from_rgb(&frame.rgb.view());
    for c in &corners {
        canvas.draw_cross(c.x as i32, c.y as i32, 3, color::RED);
    }
    save_canvas(&canvas, &args.out)?;

    if let Some(response_out) = &args.response_out {
        let normalized = harris_response(&view, &params).to_gray_image();
        ::image::GrayImage::from_raw(
            normalized.width as u32,
            normalized.height as u32,
            normalized.data,
        )
        .ok_or("response buffer size mismatch")?
        .save(response_out)?;
    }
    Ok(())
}

fn run_init_calib(args: InitCalibArgs) -> Result<(), Box<dyn std::error::Error>> {
    let calib = CameraCalibration::template(args.width, args.height);
    match &args.out {
        Some(path) => {
            save_calibration(path, &calib)?;
            log::info!("wrote calibration template to {}", path.display());
        }
        None => println!("{}", calib.to_json_pretty()?),
    }
    Ok(())
}

fn out_path(dir: &Path, frame: &Path) -> PathBuf {
    let stem = frame.file_stem().unwrap_or_default();
    dir.join(Path::new(stem).with_extension("png"))
}

fn save_canvas(canvas: &Canvas, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut data = Vec::with_capacity(canvas.data.len() * 3);
    for &px in &canvas.data {
        data.push((px >> 16) as u8);
        data.push((px >> 8) as u8);
        data.push(px as u8);
    }
    ::image::RgbImage::from_raw(canvas.width as u32, canvas.height as u32, data)
        .ok_or("canvas buffer size mismatch")?
        .save(path)?;
    Ok(())
}
