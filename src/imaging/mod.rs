//! Header image inspection.
//!
//! - **Backend**: [`ImageInspector`] trait + [`Dimensions`]
//! - **Filesystem**: [`FsInspector`], header-only identify through `image`
//!   and `avif-parse`

pub mod backend;
pub mod rust_backend;

pub use backend::{Dimensions, ImageInspector, ImagingError};
pub use rust_backend::FsInspector;
