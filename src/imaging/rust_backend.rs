//! Filesystem image inspector.
//!
//! | Format | Identify |
//! |--------|----------|
//! | JPEG, PNG, GIF, WebP | `image::image_dimensions` (header only) |
//! | AVIF | `avif-parse` container metadata |
//!
//! No pixel data is decoded: both paths read only what is needed for the
//! width and height.

use super::backend::{Dimensions, ImageInspector, ImagingError};
use std::path::Path;

/// Inspector backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsInspector;

impl FsInspector {
    pub fn new() -> Self {
        Self
    }
}

fn is_avif(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("avif"))
}

/// Extract dimensions from an AVIF file's container metadata.
fn identify_avif(path: &Path) -> Result<Dimensions, ImagingError> {
    let file_data = std::fs::read(path)?;
    let avif = avif_parse::read_avif(&mut std::io::Cursor::new(&file_data)).map_err(|e| {
        ImagingError::Decode(format!("Failed to parse AVIF {}: {e:?}", path.display()))
    })?;
    let meta = avif.primary_item_metadata().map_err(|e| {
        ImagingError::Decode(format!(
            "Failed to read AVIF metadata {}: {e:?}",
            path.display()
        ))
    })?;
    Ok(Dimensions {
        width: meta.max_frame_width.get(),
        height: meta.max_frame_height.get(),
    })
}

impl ImageInspector for FsInspector {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn dimensions(&self, path: &Path) -> Result<Dimensions, ImagingError> {
        if is_avif(path) {
            return identify_avif(path);
        }
        let (width, height) = image::image_dimensions(path).map_err(|e| {
            ImagingError::Decode(format!("Failed to read dimensions of {}: {e}", path.display()))
        })?;
        Ok(Dimensions { width, height })
    }
}
