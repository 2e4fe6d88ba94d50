//! Image dimension probing.
//!
//! The only I/O-bound step of the pipeline. Dimensions are read from the
//! image header without decoding pixel data.

use crate::error::{ImagerError, Result};
use std::path::Path;

/// Pixel dimensions of one probed image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageMetrics {
    pub width: u32,
    pub height: u32,
}

/// Probe an image file for its pixel dimensions.
pub fn probe(path: &Path) -> Result<ImageMetrics> {
    let (width, height) = image::image_dimensions(path)
        .map_err(|err| ImagerError::ImageMetrics(path.to_path_buf(), err))?;
    Ok(ImageMetrics { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probes_png_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("noodle@1x.png");
        image::RgbaImage::new(64, 32).save(&path).unwrap();

        let metrics = probe(&path).unwrap();
        assert_eq!(metrics, ImageMetrics { width: 64, height: 32 });
    }

    #[test]
    fn missing_file_is_a_metrics_error() {
        let err = probe(Path::new("/nonexistent/noodle@1x.png")).unwrap_err();
        assert!(matches!(err, ImagerError::ImageMetrics(..)));
    }
}
