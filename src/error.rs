//! Error types for the filename DSL and the render pipeline.
//!
//! No layer below `main` recovers from these: any failure aborts the whole
//! render pass and no partial CSS is emitted.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while parsing filenames or generating CSS.
#[derive(Debug, Error)]
pub enum ImagerError {
    /// Filename does not carry a recognized image extension.
    #[error("`{0}` does not have a recognized image extension")]
    InvalidFilename(String),

    /// A descriptor token does not match `<number>(x|w|h)`.
    #[error("illegal media descriptor `{0}`")]
    IllegalDescriptor(String),

    /// The `@...` suffix as a whole is malformed.
    #[error("illegal media rule `{0}` in `{1}`")]
    IllegalMediaRule(String, String),

    #[error("failed to read directory `{0}`")]
    DirectoryRead(PathBuf, #[source] std::io::Error),

    #[error("failed to read image dimensions from `{0}`")]
    ImageMetrics(PathBuf, #[source] image::ImageError),

    /// No qualifying image files after filtering the directory listing.
    #[error("no images found in `{0}`")]
    NoImagesFound(PathBuf),
}

pub type Result<T> = std::result::Result<T, ImagerError>;
