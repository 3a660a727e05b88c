//! Shared test utilities.
//!
//! Builds form submissions the way the admin page posts them, resolves them
//! through an in-memory store, and writes real image files for the
//! filesystem inspector.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let resolved = resolved_with(&[("global_page_width", "35")]);
//! assert_eq!(resolved.integer("global_page_width"), 35);
//!
//! let mut submission = submission_with(&[("global_js", "1")]);
//! submission.remove("footer_enabled"); // uncheck a checkbox
//! ```

use std::path::{Path, PathBuf};

use crate::catalog::{SettingDefinition, ValueKind};
use crate::config::BlogConfig;
use crate::resolve::{self, CHECKED, ResolvedSettings, Submission};
use crate::store::{DeclaredType, MemoryStore, Namespace, SettingValue, SettingsStore, StoreError};

pub const NS: &str = "originemini";

// =========================================================================
// Submissions
// =========================================================================

pub fn default_submission() -> Submission {
    resolve::default_form()
}

/// [`default_submission`] with some fields overridden.
pub fn submission_with(pairs: &[(&str, &str)]) -> Submission {
    let mut submission = default_submission();
    for (id, raw) in pairs {
        submission.insert(id.to_string(), raw.to_string());
    }
    submission
}

/// A submitted value different from the default, if the setting has one.
/// `Some(None)` means "leave the field out" (an unchecked checkbox).
pub fn non_default_raw(def: &SettingDefinition) -> Option<Option<String>> {
    match def.kind {
        ValueKind::Boolean { default: true } => Some(None),
        ValueKind::Boolean { default: false } => Some(Some(CHECKED.to_string())),
        ValueKind::EnumString { default, choices } => choices
            .iter()
            .find(|c| c.value != default)
            .map(|c| Some(c.value.to_string())),
        ValueKind::EnumInteger { default, choices } => choices
            .iter()
            .find(|c| c.value != default)
            .map(|c| Some(c.value.to_string())),
        ValueKind::Integer { default } => Some(Some((default + 1).to_string())),
        ValueKind::String { .. } | ValueKind::FreeText { .. } => Some(Some("custom".to_string())),
        ValueKind::Image => None,
    }
}

// =========================================================================
// Resolution
// =========================================================================

/// Apply `submission` to a fresh store and resolve it back.
pub fn resolve_submission(submission: &Submission) -> ResolvedSettings {
    let mut store = MemoryStore::new();
    let mut ns = Namespace::new(&mut store, NS);
    resolve::apply_submission(&mut ns, submission).unwrap();
    ResolvedSettings::load(&ns).unwrap()
}

pub fn resolved_with(pairs: &[(&str, &str)]) -> ResolvedSettings {
    resolve_submission(&submission_with(pairs))
}

// =========================================================================
// Stores and files
// =========================================================================

/// A store whose every operation fails.
pub struct FailingStore;

fn unavailable() -> StoreError {
    StoreError::Io(std::io::Error::other("store unavailable"))
}

impl SettingsStore for FailingStore {
    fn get(&self, _namespace: &str, _id: &str) -> Result<Option<SettingValue>, StoreError> {
        Err(unavailable())
    }

    fn put(
        &mut self,
        _namespace: &str,
        _id: &str,
        _value: SettingValue,
        _declared: DeclaredType,
        _label: &str,
    ) -> Result<(), StoreError> {
        Err(unavailable())
    }

    fn remove(&mut self, _namespace: &str, _id: &str) -> Result<(), StoreError> {
        Err(unavailable())
    }
}

/// Blog locations with the public folder at `public_path`.
pub fn blog_config(public_path: impl Into<PathBuf>) -> BlogConfig {
    BlogConfig {
        public_path: public_path.into(),
        ..BlogConfig::default()
    }
}

/// Write a solid PNG of the given size.
pub fn write_png(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    image::RgbImage::from_pixel(width, height, image::Rgb([23, 66, 207]))
        .save(path)
        .unwrap();
}
