//! Frame input for the demo loops.
//!
//! Demos read frames from a directory of still images, sorted by file
//! name, standing in for a camera or video stream. Each frame is decoded
//! once and handed out both as luma for the corner detector and as
//! interleaved RGB for display.

use std::fs;
use std::path::{Path, PathBuf};

use board_ar_core::RgbImage;

/// Errors from enumerating or decoding frame files.
#[derive(thiserror::Error, Debug)]
pub enum FrameSourceError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        source: ::image::ImageError,
    },

    #[error("no frames with a supported extension in {}", .0.display())]
    Empty(PathBuf),
}

/// One decoded frame.
#[derive(Debug)]
pub struct Frame {
    pub path: PathBuf,
    /// Luma copy for the corner detector.
    pub gray: ::image::GrayImage,
    /// Interleaved RGB copy for display and overlay composition.
    pub rgb: RgbImage,
}

fn is_supported(path: &Path) -> bool {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    matches!(
        ext.as_deref(),
        Some("png" | "jpg" | "jpeg" | "bmp" | "tif" | "tiff")
    )
}

/// Decode one image into both formats the demos need.
pub fn load_frame(path: &Path) -> Result<Frame, FrameSourceError> {
    let dynamic = ::image::ImageReader::open(path)?
        .decode()
        .map_err(|source| FrameSourceError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

    let gray = dynamic.to_luma8();
    let rgb8 = dynamic.to_rgb8();
    let rgb = RgbImage {
        width: rgb8.width() as usize,
        height: rgb8.height() as usize,
        data: rgb8.into_raw(),
    };

    Ok(Frame {
        path: path.to_path_buf(),
        gray,
        rgb,
    })
}

/// The image files of one directory, replayed in file-name order.
#[derive(Debug)]
pub struct FrameSource {
    paths: Vec<PathBuf>,
    next: usize,
}

impl FrameSource {
    /// List the supported images in `dir`. Fails when the directory is
    /// unreadable or holds no supported files.
    pub fn from_dir(dir: &Path) -> Result<Self, FrameSourceError> {
        let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && is_supported(p))
            .collect();
        paths.sort();
        if paths.is_empty() {
            return Err(FrameSourceError::Empty(dir.to_path_buf()));
        }
        Ok(Self { paths, next: 0 })
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Decode the next frame, or `None` after the last one.
    #[allow(clippy::should_implement_trait)]
    pub fn next_frame(&mut self) -> Option<Result<Frame, FrameSourceError>> {
        let path = self.paths.get(self.next)?.clone();
        self.next += 1;
        Some(load_frame(&path))
    }

    /// Restart playback from the first frame.
    pub fn rewind(&mut self) {
        self.next = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_png(path: &Path, width: u32, height: u32, px: [u8; 3]) {
        let img = ::image::RgbImage::from_pixel(width, height, ::image::Rgb(px));
        img.save(path).expect("save test frame");
    }

    #[test]
    fn frames_come_back_sorted_by_file_name() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_png(&dir.path().join("b.png"), 8, 6, [0, 255, 0]);
        write_png(&dir.path().join("a.png"), 8, 6, [255, 0, 0]);
        write_png(&dir.path().join("c.png"), 8, 6, [0, 0, 255]);
        fs::write(dir.path().join("notes.txt"), "ignored").expect("write");

        let mut source = FrameSource::from_dir(dir.path()).expect("source");
        assert_eq!(3, source.len());

        let first = source.next_frame().expect("some").expect("loads");
        assert!(first.path.ends_with("a.png"));
        assert_eq!(8, first.gray.width());
        assert_eq!(6, first.gray.height());
        assert_eq!(8, first.rgb.width);
        assert_eq!([255, 0, 0], [first.rgb.data[0], first.rgb.data[1], first.rgb.data[2]]);

        let second = source.next_frame().expect("some").expect("loads");
        assert!(second.path.ends_with("b.png"));
        let third = source.next_frame().expect("some").expect("loads");
        assert!(third.path.ends_with("c.png"));
        assert!(source.next_frame().is_none());
    }

    #[test]
    fn rewind_restarts_playback() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_png(&dir.path().join("only.png"), 4, 4, [9, 9, 9]);

        let mut source = FrameSource::from_dir(dir.path()).expect("source");
        assert!(source.next_frame().is_some());
        assert!(source.next_frame().is_none());

        source.rewind();
        let again = source.next_frame().expect("some").expect("loads");
        assert!(again.path.ends_with("only.png"));
    }

    #[test]
    fn gray_copy_matches_the_luma_conversion() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_png(&dir.path().join("gray.png"), 2, 2, [100, 100, 100]);

        let frame = load_frame(&dir.path().join("gray.png")).expect("loads");
        assert!(frame.gray.as_raw().iter().all(|&v| v == 100));
    }

    #[test]
    fn directories_without_frames_are_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("readme.md"), "no images here").expect("write");

        let err = FrameSource::from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, FrameSourceError::Empty(_)), "{err:?}");
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = FrameSource::from_dir(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, FrameSourceError::Io(_)), "{err:?}");
    }

    #[test]
    fn undecodable_files_report_their_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bogus.png");
        fs::write(&path, b"not a png at all").expect("write");

        let mut source = FrameSource::from_dir(dir.path()).expect("source");
        let err = source.next_frame().expect("some").unwrap_err();
        match err {
            FrameSourceError::Decode { path: p, .. } => assert_eq!(path, p),
            other => panic!("expected decode error, got {other:?}"),
        }
    }
}
