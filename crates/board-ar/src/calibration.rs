//! Camera calibration files.
//!
//! The demos never calibrate; they consume a calibration produced
//! offline, stored as JSON next to the frame data. `init-calib` in the
//! CLI prints a [`CameraCalibration::template`] to start from.

use std::fs;
use std::path::Path;

use board_ar_core::math::Real;
use board_ar_core::{Camera, Distortion, Intrinsics};
use serde::{Deserialize, Serialize};

/// Errors from reading, writing or validating calibration files.
#[derive(thiserror::Error, Debug)]
pub enum CalibrationError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("invalid calibration: {0}")]
    Invalid(String),
}

/// A precomputed camera calibration and the image size it was estimated
/// for.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraCalibration {
    pub camera: Camera,
    /// `[width, height]` in pixels.
    pub image_size: [u32; 2],
}

impl CameraCalibration {
    pub fn new(camera: Camera, width: u32, height: u32) -> Self {
        Self {
            camera,
            image_size: [width, height],
        }
    }

    /// A plausible zero-distortion starting point for a `width x height`
    /// sensor: focal length equal to the larger side, principal point at
    /// the center. Meant to be edited by hand, not used as-is.
    pub fn template(width: u32, height: u32) -> Self {
        let f = width.max(height) as Real;
        Self::new(
            Camera::new(
                Intrinsics {
                    fx: f,
                    fy: f,
                    cx: width as Real / 2.0,
                    cy: height as Real / 2.0,
                    skew: 0.0,
                },
                Distortion::default(),
            ),
            width,
            height,
        )
    }

    pub fn validate(&self) -> Result<(), CalibrationError> {
        if !self.camera.intrinsics.is_valid() {
            return Err(CalibrationError::Invalid(
                "intrinsics must be finite with nonzero focal lengths".into(),
            ));
        }
        let [w, h] = self.image_size;
        if w == 0 || h == 0 {
            return Err(CalibrationError::Invalid(format!(
                "image size must be nonzero, got {w}x{h}"
            )));
        }
        Ok(())
    }

    pub fn to_json_pretty(&self) -> Result<String, CalibrationError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Read and validate a calibration JSON file.
pub fn load_calibration(path: &Path) -> Result<CameraCalibration, CalibrationError> {
    let raw = fs::read_to_string(path)?;
    let calib: CameraCalibration = serde_json::from_str(&raw)?;
    calib.validate()?;
    Ok(calib)
}

/// Write a calibration as pretty-printed JSON.
pub fn save_calibration(path: &Path, calib: &CameraCalibration) -> Result<(), CalibrationError> {
    fs::write(path, calib.to_json_pretty()?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_is_valid_and_centered() {
        let calib = CameraCalibration::template(640, 480);
        calib.validate().expect("template validates");
        assert_eq!([640, 480], calib.image_size);
        assert_eq!(640.0, calib.camera.intrinsics.fx);
        assert_eq!(320.0, calib.camera.intrinsics.cx);
        assert_eq!(240.0, calib.camera.intrinsics.cy);
        assert!(calib.camera.distortion.is_zero());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("calibration.json");

        let calib = CameraCalibration::template(800, 600);
        save_calibration(&path, &calib).expect("save");
        let back = load_calibration(&path).expect("load");
        assert_eq!(calib, back);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_calibration(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, CalibrationError::Io(_)), "{err:?}");
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").expect("write");
        let err = load_calibration(&path).unwrap_err();
        assert!(matches!(err, CalibrationError::Json(_)), "{err:?}");
    }

    #[test]
    fn zero_focal_length_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("zero_f.json");

        let mut calib = CameraCalibration::template(640, 480);
        calib.camera.intrinsics.fx = 0.0;
        fs::write(&path, calib.to_json_pretty().expect("json")).expect("write");

        let err = load_calibration(&path).unwrap_err();
        assert!(matches!(err, CalibrationError::Invalid(_)), "{err:?}");
    }

    #[test]
    fn zero_image_size_is_rejected() {
        let calib = CameraCalibration::template(640, 480);
        let calib = CameraCalibration {
            image_size: [640, 0],
            ..calib
        };
        assert!(calib.validate().is_err());
    }

    #[test]
    fn distortion_fields_default_to_zero_when_absent() {
        let json = r#"{
            "camera": {
                "intrinsics": { "fx": 700.0, "fy": 700.0, "cx": 320.0, "cy": 240.0 }
            },
            "image_size": [640, 480]
        }"#;
        let calib: CameraCalibration = serde_json::from_str(json).expect("parse");
        calib.validate().expect("valid");
        assert!(calib.camera.distortion.is_zero());
        assert_eq!(0.0, calib.camera.intrinsics.skew);
    }
}
