use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

/// Directory screenshots are written to, relative to the working directory
pub const SCREENSHOT_DIR: &str = "screenshots";

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("failed to create screenshot directory {dir}: {source}")]
    CreateDir {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("frame buffer does not match {width}x{height}")]
    BadFrame { width: u32, height: u32 },
    #[error("failed to write screenshot: {0}")]
    Write(#[from] image::ImageError),
}

/// Serializes an RGBA frame buffer to a timestamped PNG under `dir`,
/// creating the directory if needed. Returns the path written. A second
/// screenshot within the same wall-clock second overwrites the first.
pub fn save_screenshot(
    frame: &[u8],
    width: u32,
    height: u32,
    dir: &Path,
) -> Result<PathBuf, CaptureError> {
    fs::create_dir_all(dir).map_err(|source| CaptureError::CreateDir {
        dir: dir.to_path_buf(),
        source,
    })?;
    let image = image::RgbaImage::from_raw(width, height, frame.to_vec())
        .ok_or(CaptureError::BadFrame { width, height })?;
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("screenshot_{timestamp}.png"));
    image.save(&path)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("shapepad_{name}_{}", std::process::id()))
    }

    #[test]
    fn writes_timestamped_png() {
        let dir = temp_dir("ok");
        let _ = fs::remove_dir_all(&dir);

        let frame = vec![255u8; 8 * 6 * 4];
        let path = save_screenshot(&frame, 8, 6, &dir).expect("save");
        assert!(path.exists());
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("screenshot_"));
        assert!(name.ends_with(".png"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn unwritable_directory_returns_error() {
        // a regular file where the directory should go
        let blocker = temp_dir("blocked");
        let _ = fs::remove_file(&blocker);
        fs::write(&blocker, b"not a directory").expect("blocker file");

        let frame = vec![0u8; 4 * 4 * 4];
        let dir = blocker.join("screenshots");
        let result = save_screenshot(&frame, 4, 4, &dir);
        assert!(matches!(result, Err(CaptureError::CreateDir { .. })));

        let _ = fs::remove_file(&blocker);
    }

    #[test]
    fn mismatched_frame_size_is_rejected() {
        let dir = temp_dir("badframe");
        let _ = fs::remove_dir_all(&dir);

        let frame = vec![0u8; 16];
        let result = save_screenshot(&frame, 100, 100, &dir);
        assert!(matches!(result, Err(CaptureError::BadFrame { .. })));

        let _ = fs::remove_dir_all(&dir);
    }
}
