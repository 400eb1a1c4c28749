#![cfg(feature = "cli")]

//! Smoke tests for the board-ar binary.

use assert_cmd::Command;
use board_ar::calibration::{save_calibration, CameraCalibration};
use predicates::prelude::*;

fn board_ar() -> Command {
    Command::cargo_bin("board-ar").expect("binary builds")
}

#[test]
fn help_lists_the_subcommands() {
    board_ar().arg("--help").assert().success().stdout(
        predicate::str::contains("dual")
            .and(predicate::str::contains("overlay"))
            .and(predicate::str::contains("harris"))
            .and(predicate::str::contains("init-calib")),
    );
}

#[test]
fn init_calib_prints_a_template() {
    board_ar()
        .args(["init-calib", "--width", "800", "--height", "600"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\"fx\": 800.0").and(predicate::str::contains("\"image_size\"")),
        );
}

#[test]
fn init_calib_writes_a_loadable_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("calib.json");

    board_ar()
        .args(["init-calib", "--width", "800", "--height", "600", "--out"])
        .arg(&path)
        .assert()
        .success();

    let calib = board_ar::calibration::load_calibration(&path).expect("loads back");
    assert_eq!([800, 600], calib.image_size);
    assert_eq!(800.0, calib.camera.intrinsics.fx);
}

#[test]
fn missing_calibration_file_fails_with_a_message() {
    let dir = tempfile::tempdir().expect("tempdir");

    board_ar()
        .args(["ar", "--calib"])
        .arg(dir.path().join("nope.json"))
        .arg("--frames")
        .arg(dir.path())
        .arg("--out")
        .arg(dir.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn empty_frame_directory_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let calib_path = dir.path().join("calib.json");
    save_calibration(&calib_path, &CameraCalibration::template(640, 480))
        .expect("write calibration");
    let frames = dir.path().join("frames");
    std::fs::create_dir(&frames).expect("mkdir");

    board_ar()
        .args(["ar", "--calib"])
        .arg(&calib_path)
        .arg("--frames")
        .arg(&frames)
        .arg("--out")
        .arg(dir.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no frames with a supported extension"));
}

#[test]
fn ar_emits_one_annotated_frame_per_input() {
    let dir = tempfile::tempdir().expect("tempdir");
    let calib_path = dir.path().join("calib.json");
    save_calibration(&calib_path, &CameraCalibration::template(96, 72))
        .expect("write calibration");

    let frames = dir.path().join("frames");
    std::fs::create_dir(&frames).expect("mkdir");
    image::GrayImage::from_pixel(96, 72, image::Luma([128]))
        .save(frames.join("frame_000.png"))
        .expect("save frame");

    let out = dir.path().join("out");

    board_ar()
        .args(["ar", "--calib"])
        .arg(&calib_path)
        .arg("--frames")
        .arg(&frames)
        .arg("--out")
        .arg(&out)
        .assert()
        .success();

    // No board in the frame; it still comes out the other end as a PNG.
    assert!(out.join("frame_000.png").is_file());
}

#[test]
fn overlay_without_a_board_passes_frames_through() {
    let dir = tempfile::tempdir().expect("tempdir");
    let frames = dir.path().join("frames");
    std::fs::create_dir(&frames).expect("mkdir");
    image::GrayImage::from_pixel(96, 72, image::Luma([90]))
        .save(frames.join("a.png"))
        .expect("save frame");
    let overlay = dir.path().join("overlay.png");
    image::RgbImage::from_pixel(8, 8, image::Rgb([250, 10, 10]))
        .save(&overlay)
        .expect("save overlay");
    let out = dir.path().join("out");

    board_ar()
        .args(["overlay", "--frames"])
        .arg(&frames)
        .arg("--image")
        .arg(&overlay)
        .arg("--out")
        .arg(&out)
        .assert()
        .success();

    assert!(out.join("a.png").is_file());
}

#[test]
fn harris_marks_corners_on_a_checkerboard() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("checker.png");
    image::GrayImage::from_fn(96, 96, |x, y| {
        if ((x / 12) + (y / 12)) % 2 == 0 {
            image::Luma([30])
        } else {
            image::Luma([220])
        }
    })
    .save(&input)
    .expect("save checkerboard");

    let out = dir.path().join("marked.png");
    let response = dir.path().join("response.png");

    board_ar()
        .args(["harris", "--input"])
        .arg(&input)
        .arg("--out")
        .arg(&out)
        .arg("--response-out")
        .arg(&response)
        .assert()
        .success();

    assert!(out.is_file());
    assert!(response.is_file());
}
