//! Image inspection trait and shared types.
//!
//! The header image step only needs two answers about a file: does it exist,
//! and what are its pixel dimensions. [`ImageInspector`] is that seam; the
//! production implementation is
//! [`FsInspector`](super::rust_backend::FsInspector).

use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImagingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Decode failed: {0}")]
    Decode(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Read-only access to image files on disk.
pub trait ImageInspector {
    /// Whether a regular file exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Pixel dimensions, or an error when the file is not a readable image.
    fn dimensions(&self, path: &Path) -> Result<Dimensions, ImagingError>;
}
