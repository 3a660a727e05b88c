//! Save, reset and read back the theme settings.
//!
//! A save runs the whole pipeline against one namespace:
//!
//! ```text
//! submission ──▶ apply_submission ──▶ header_image::apply ──▶ ResolvedSettings::load
//!                                                                      │
//!                      styles ◀── persist ◀── serialize ◀── StyleRuleBuilder::build
//! ```
//!
//! Every step reads what the previous one wrote to the store, so the
//! stylesheet always describes exactly the persisted settings.

use crate::catalog::{self, STYLES_ID};
use crate::config::BlogConfig;
use crate::header_image::{self, HEADER_IMAGE_ID, HeaderImage};
use crate::imaging::ImageInspector;
use crate::resolve::{self, ResolvedSettings, Submission, SubmissionReport};
use crate::store::{Namespace, SettingsStore, StoreError};
use crate::styles::{self, StyleRuleBuilder};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("settings store error: {0}")]
    Store(#[from] StoreError),
}

/// What one save did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub report: SubmissionReport,
    pub header_image: Option<HeaderImage>,
    pub resolved: ResolvedSettings,
    /// Stored stylesheet, `None` when every setting is at its default.
    pub stylesheet: Option<String>,
}

/// The theme settings engine for one blog.
pub struct Theme<I: ImageInspector> {
    blog: BlogConfig,
    inspector: I,
    builder: StyleRuleBuilder,
}

impl<I: ImageInspector> Theme<I> {
    pub fn new(blog: BlogConfig, inspector: I) -> Self {
        let builder = StyleRuleBuilder::new(blog.font_assets_url());
        Self {
            blog,
            inspector,
            builder,
        }
    }

    pub fn blog(&self) -> &BlogConfig {
        &self.blog
    }

    /// Validate and persist `submission`, then regenerate the stylesheet.
    pub fn save<S: SettingsStore + ?Sized>(
        &self,
        ns: &mut Namespace<'_, S>,
        submission: &Submission,
    ) -> Result<SaveOutcome, SaveError> {
        let report = resolve::apply_submission(ns, submission)?;

        let page_width = ResolvedSettings::load(ns)?.integer("global_page_width");
        let header_image = header_image::apply(
            ns,
            &self.inspector,
            &self.blog,
            submission.get(HEADER_IMAGE_ID).map(String::as_str),
            page_width,
        )?;

        let resolved = ResolvedSettings::load(ns)?;
        let stylesheet = self.regenerate(ns, &resolved)?;

        Ok(SaveOutcome {
            report,
            header_image,
            resolved,
            stylesheet,
        })
    }

    /// Build, serialize and store the stylesheet for `resolved`.
    pub fn regenerate<S: SettingsStore + ?Sized>(
        &self,
        ns: &mut Namespace<'_, S>,
        resolved: &ResolvedSettings,
    ) -> Result<Option<String>, SaveError> {
        let scale_percent = resolved.header_image().map(|image| image.width);
        let buckets = self.builder.build(resolved, scale_percent);
        Ok(styles::persist(ns, &styles::serialize(&buckets))?)
    }

    /// Remove every stored setting, the stylesheet included.
    pub fn reset<S: SettingsStore + ?Sized>(
        &self,
        ns: &mut Namespace<'_, S>,
    ) -> Result<(), SaveError> {
        for def in catalog::CATALOG {
            ns.remove(def.id)?;
        }
        log::info!("settings of '{}' reset to defaults", ns.name());
        Ok(())
    }

    /// The stored stylesheet, if any.
    pub fn stylesheet<S: SettingsStore + ?Sized>(
        &self,
        ns: &Namespace<'_, S>,
    ) -> Result<Option<String>, SaveError> {
        Ok(ns
            .get(STYLES_ID)?
            .and_then(|value| value.as_str().map(str::to_string)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::MockInspector;
    use crate::store::{MemoryStore, SettingValue};
    use crate::test_helpers::*;

    fn theme(inspector: MockInspector) -> Theme<MockInspector> {
        Theme::new(blog_config("/srv/blog/public"), inspector)
    }

    #[test]
    fn default_submission_leaves_store_empty() {
        let mut store = MemoryStore::new();
        let mut ns = Namespace::new(&mut store, NS);
        let outcome = theme(MockInspector::new())
            .save(&mut ns, &default_submission())
            .unwrap();
        assert_eq!(outcome.stylesheet, None);
        assert!(store.ids(NS).is_empty());
    }

    #[test]
    fn save_stores_overrides_and_stylesheet() {
        let mut store = MemoryStore::new();
        let mut ns = Namespace::new(&mut store, NS);
        let outcome = theme(MockInspector::new())
            .save(&mut ns, &submission_with(&[("global_page_width", "35")]))
            .unwrap();

        assert_eq!(outcome.stylesheet.as_deref(), Some(":root{--page-width:35em;}"));
        assert_eq!(store.ids(NS), vec!["global_page_width", "styles"]);
    }

    #[test]
    fn banner_scale_uses_the_submitted_page_width() {
        let inspector = MockInspector::new().with_image("/srv/blog/public/banner.png", 600, 100);
        let mut store = MemoryStore::new();
        let mut ns = Namespace::new(&mut store, NS);
        let submission = submission_with(&[
            ("global_page_width", "40"),
            ("header_image", "/public/banner.png"),
        ]);
        let outcome = theme(inspector).save(&mut ns, &submission).unwrap();

        // 600 / (40 * 16)
        assert_eq!(outcome.header_image.as_ref().map(|i| i.width), Some(93));
        assert_eq!(outcome.resolved.header_image(), outcome.header_image.as_ref());
        let css = outcome.stylesheet.unwrap();
        assert!(css.contains("#site-image{width:100%;}"));
        assert!(!css.contains("#site-image img"));
    }

    #[test]
    fn invalid_banner_is_dropped_without_error() {
        let mut store = MemoryStore::new();
        let mut ns = Namespace::new(&mut store, NS);
        let outcome = theme(MockInspector::new())
            .save(&mut ns, &submission_with(&[("header_image", "/public/nope.png")]))
            .unwrap();
        assert_eq!(outcome.header_image, None);
        assert_eq!(outcome.stylesheet, None);
    }

    #[test]
    fn reset_removes_everything() {
        let mut store = MemoryStore::new();
        let mut ns = Namespace::new(&mut store, NS);
        let theme = theme(MockInspector::new());
        theme
            .save(&mut ns, &submission_with(&[("global_color_primary", "red")]))
            .unwrap();
        assert!(theme.stylesheet(&ns).unwrap().is_some());

        theme.reset(&mut ns).unwrap();
        assert_eq!(theme.stylesheet(&ns).unwrap(), None);
        assert!(store.ids(NS).is_empty());
    }

    #[test]
    fn stylesheet_ignores_non_string_values() {
        let mut store = MemoryStore::new();
        store
            .put(NS, STYLES_ID, SettingValue::Integer(1), crate::store::DeclaredType::Integer, "")
            .unwrap();
        let ns = Namespace::new(&mut store, NS);
        assert_eq!(theme(MockInspector::new()).stylesheet(&ns).unwrap(), None);
    }

    #[test]
    fn store_failure_is_a_save_error() {
        let mut store = FailingStore;
        let mut ns = Namespace::new(&mut store, NS);
        let err = theme(MockInspector::new())
            .save(&mut ns, &default_submission())
            .unwrap_err();
        assert!(matches!(err, SaveError::Store(_)));
    }
}
