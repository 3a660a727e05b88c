//! Submission validation and effective setting values.
//!
//! Two halves:
//!
//! 1. [`apply_submission`] takes the raw form submission (a flat string map,
//!    with HTTP form semantics: an unchecked checkbox has no key at all) and
//!    writes the minimal set of overrides to the store. A setting is stored
//!    **iff** its accepted value differs from the default; everything else is
//!    removed, so "nothing stored" always means "default".
//! 2. [`ResolvedSettings::load`] reads the store back and overlays every
//!    valid stored value onto the catalog defaults. That snapshot is what the
//!    stylesheet builder consumes.
//!
//! Untrusted input never fails a save: values outside the allowed choices
//! are dropped and the default stands. Only store errors propagate.

use crate::catalog::{self, SettingDefinition, ValueKind};
use crate::escape::escape_html;
use crate::header_image::HeaderImage;
use crate::store::{Namespace, SettingValue, SettingsStore, StoreError};
use std::collections::BTreeMap;

/// Raw form submission: field name → raw value.
pub type Submission = BTreeMap<String, String>;

/// Raw value a checked checkbox submits.
pub const CHECKED: &str = "1";

/// What to do with one setting after looking at its submitted value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Store this value; it differs from the default.
    Put(SettingValue),
    /// Remove any stored override; the default applies.
    Remove,
    /// The value is not acceptable; remove any override.
    Reject,
}

/// Decide the fate of a single submitted value.
pub fn decide(def: &SettingDefinition, raw: Option<&str>) -> Decision {
    let Some(raw) = raw else {
        // Checkboxes are only submitted when checked.
        return match def.kind {
            ValueKind::Boolean { default: true } => Decision::Put(SettingValue::Boolean(false)),
            _ => Decision::Remove,
        };
    };

    match def.kind {
        ValueKind::Boolean { default } => {
            if raw != CHECKED {
                Decision::Reject
            } else if default {
                Decision::Remove
            } else {
                Decision::Put(SettingValue::Boolean(true))
            }
        }
        ValueKind::EnumString { default, .. } => {
            if raw == default {
                Decision::Remove
            } else if def.allows(raw) {
                Decision::Put(SettingValue::String(raw.to_string()))
            } else {
                Decision::Reject
            }
        }
        ValueKind::EnumInteger { default, .. } | ValueKind::Integer { default } => {
            match raw.trim().parse::<i64>() {
                Ok(n) if n == default => Decision::Remove,
                Ok(n) if def.allows(raw) => Decision::Put(SettingValue::Integer(n)),
                _ => Decision::Reject,
            }
        }
        ValueKind::String { default } | ValueKind::FreeText { default } => {
            if raw == default {
                Decision::Remove
            } else {
                Decision::Put(SettingValue::String(escape_html(raw)))
            }
        }
        // The banner goes through `header_image::apply`.
        ValueKind::Image => Decision::Remove,
    }
}

/// The submission of an untouched admin form: every field at its default,
/// checkboxes present only when checked.
pub fn default_form() -> Submission {
    let mut submission = Submission::new();
    for def in catalog::submitted() {
        let raw = match def.kind {
            ValueKind::Boolean { default: true } => CHECKED.to_string(),
            ValueKind::Boolean { default: false } | ValueKind::Image => continue,
            ValueKind::Integer { default } | ValueKind::EnumInteger { default, .. } => {
                default.to_string()
            }
            ValueKind::String { default }
            | ValueKind::FreeText { default }
            | ValueKind::EnumString { default, .. } => default.to_string(),
        };
        submission.insert(def.id.to_string(), raw);
    }
    submission
}

/// Ids touched by one submission, grouped by outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionReport {
    pub stored: Vec<(&'static str, SettingValue)>,
    pub removed: Vec<&'static str>,
    pub rejected: Vec<&'static str>,
}

/// Validate `submission` against the catalog and persist the overrides.
///
/// Derived settings (`header_image`, `header_image2x`, `styles`) are left
/// untouched; they have their own save steps.
pub fn apply_submission<S: SettingsStore + ?Sized>(
    ns: &mut Namespace<'_, S>,
    submission: &Submission,
) -> Result<SubmissionReport, StoreError> {
    let mut report = SubmissionReport::default();

    for def in catalog::submitted() {
        let raw = submission.get(def.id).map(String::as_str);
        match decide(def, raw) {
            Decision::Put(value) => {
                ns.put(def.id, value.clone(), value.declared_type(), def.label)?;
                report.stored.push((def.id, value));
            }
            Decision::Remove => {
                ns.remove(def.id)?;
                report.removed.push(def.id);
            }
            Decision::Reject => {
                log::debug!("ignoring invalid value {:?} for '{}'", raw, def.id);
                ns.remove(def.id)?;
                report.rejected.push(def.id);
            }
        }
    }

    for key in submission.keys() {
        if catalog::find(key).is_none() {
            log::debug!("ignoring unknown field '{key}'");
        }
    }

    Ok(report)
}

/// Effective value of every setting for one generation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSettings {
    values: BTreeMap<&'static str, SettingValue>,
    header_image: Option<HeaderImage>,
}

impl ResolvedSettings {
    /// Every setting at its default.
    pub fn defaults() -> Self {
        let values = catalog::CATALOG
            .iter()
            .filter_map(|def| def.default_value().map(|v| (def.id, v)))
            .collect();
        Self {
            values,
            header_image: None,
        }
    }

    /// Overlay the valid values stored in `ns` onto the defaults.
    pub fn load<S: SettingsStore + ?Sized>(ns: &Namespace<'_, S>) -> Result<Self, StoreError> {
        let mut resolved = Self::defaults();
        for def in catalog::CATALOG {
            if def.id == catalog::STYLES_ID {
                continue;
            }
            let Some(stored) = ns.get(def.id)? else {
                continue;
            };
            if let ValueKind::Image = def.kind {
                resolved.header_image = HeaderImage::from_setting(&stored);
                continue;
            }
            match coerce(def, &stored) {
                Some(value) => {
                    resolved.values.insert(def.id, value);
                }
                None => log::debug!("stored value {stored} for '{}' is not valid", def.id),
            }
        }
        Ok(resolved)
    }

    pub fn value(&self, id: &str) -> Option<&SettingValue> {
        debug_assert!(catalog::find(id).is_some(), "unknown setting '{id}'");
        self.values.get(id)
    }

    pub fn bool(&self, id: &str) -> bool {
        self.value(id).and_then(SettingValue::as_bool).unwrap_or(false)
    }

    pub fn integer(&self, id: &str) -> i64 {
        self.value(id).and_then(SettingValue::as_integer).unwrap_or(0)
    }

    pub fn string(&self, id: &str) -> &str {
        self.value(id).and_then(SettingValue::as_str).unwrap_or("")
    }

    pub fn header_image(&self) -> Option<&HeaderImage> {
        self.header_image.as_ref()
    }

    /// Ids whose effective value differs from the default, in catalog order.
    pub fn overrides(&self) -> Vec<&'static str> {
        catalog::CATALOG
            .iter()
            .filter(|def| match def.kind {
                ValueKind::Image => self.header_image.is_some(),
                _ => def.default_value().as_ref() != self.values.get(def.id),
            })
            .map(|def| def.id)
            .collect()
    }
}

/// Convert a stored value to the setting's declared type, or `None` when it
/// cannot be or is not an allowed choice.
fn coerce(def: &SettingDefinition, stored: &SettingValue) -> Option<SettingValue> {
    match def.kind {
        ValueKind::Boolean { .. } => match stored {
            SettingValue::Boolean(b) => Some(SettingValue::Boolean(*b)),
            SettingValue::Integer(n) => Some(SettingValue::Boolean(*n != 0)),
            SettingValue::String(s) => Some(SettingValue::Boolean(!s.is_empty() && s != "0")),
            SettingValue::Array(_) => None,
        },
        ValueKind::Integer { .. } | ValueKind::EnumInteger { .. } => {
            let n = match stored {
                SettingValue::Integer(n) => *n,
                SettingValue::String(s) => s.trim().parse().ok()?,
                _ => return None,
            };
            def.allows(&n.to_string()).then_some(SettingValue::Integer(n))
        }
        ValueKind::EnumString { .. } => {
            let s = stored.as_str()?;
            def.allows(s).then(|| SettingValue::String(s.to_string()))
        }
        ValueKind::String { .. } | ValueKind::FreeText { .. } => {
            stored.as_str().map(|s| SettingValue::String(s.to_string()))
        }
        ValueKind::Image => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{DeclaredType, MemoryStore};
    use crate::test_helpers::*;

    fn def(id: &str) -> &'static SettingDefinition {
        catalog::find(id).unwrap()
    }

    // =========================================================================
    // decide
    // =========================================================================

    #[test]
    fn absent_checkbox_with_true_default_stores_false() {
        assert_eq!(
            decide(def("footer_enabled"), None),
            Decision::Put(SettingValue::Boolean(false))
        );
    }

    #[test]
    fn absent_checkbox_with_false_default_is_removed() {
        assert_eq!(decide(def("global_js"), None), Decision::Remove);
    }

    #[test]
    fn absent_non_checkbox_is_removed() {
        assert_eq!(decide(def("global_page_width"), None), Decision::Remove);
        assert_eq!(decide(def("content_separator"), None), Decision::Remove);
    }

    #[test]
    fn checked_checkbox() {
        assert_eq!(
            decide(def("global_js"), Some("1")),
            Decision::Put(SettingValue::Boolean(true))
        );
        assert_eq!(decide(def("footer_enabled"), Some("1")), Decision::Remove);
        assert_eq!(decide(def("global_js"), Some("on")), Decision::Reject);
    }

    #[test]
    fn enum_string_membership() {
        let family = def("global_font_family");
        assert_eq!(decide(family, Some("sans-serif")), Decision::Remove);
        assert_eq!(
            decide(family, Some("luciole")),
            Decision::Put(SettingValue::String("luciole".into()))
        );
        assert_eq!(decide(family, Some("<script>")), Decision::Reject);
    }

    #[test]
    fn enum_integer_membership() {
        let width = def("global_page_width");
        assert_eq!(decide(width, Some("30")), Decision::Remove);
        assert_eq!(decide(width, Some("35")), Decision::Put(SettingValue::Integer(35)));
        assert_eq!(decide(width, Some("36")), Decision::Reject);
        assert_eq!(decide(width, Some("thirty")), Decision::Reject);
        assert_eq!(decide(width, Some("")), Decision::Reject);
    }

    #[test]
    fn text_is_escaped() {
        assert_eq!(
            decide(def("global_meta_home_description"), Some("<b>Hi</b> & bye")),
            Decision::Put(SettingValue::String("&lt;b&gt;Hi&lt;/b&gt; &amp; bye".into()))
        );
        assert_eq!(decide(def("content_separator"), Some("|")), Decision::Remove);
        assert_eq!(decide(def("header_image_description"), Some("")), Decision::Remove);
    }

    // =========================================================================
    // apply_submission
    // =========================================================================

    #[test]
    fn default_submission_stores_nothing() {
        let mut store = MemoryStore::new();
        let mut ns = Namespace::new(&mut store, NS);
        let report = apply_submission(&mut ns, &default_submission()).unwrap();
        assert!(report.stored.is_empty());
        assert!(report.rejected.is_empty());
        assert!(store.ids(NS).is_empty());
    }

    #[test]
    fn empty_submission_unchecks_every_checkbox() {
        let mut store = MemoryStore::new();
        let mut ns = Namespace::new(&mut store, NS);
        let report = apply_submission(&mut ns, &Submission::new()).unwrap();

        let checked_by_default: Vec<&str> = catalog::submitted()
            .filter(|def| matches!(def.kind, ValueKind::Boolean { default: true }))
            .map(|def| def.id)
            .collect();
        assert!(checked_by_default.contains(&"footer_enabled"));
        assert!(checked_by_default.contains(&"content_links_underline"));
        assert_eq!(
            report.stored,
            checked_by_default
                .iter()
                .map(|id| (*id, SettingValue::Boolean(false)))
                .collect::<Vec<_>>()
        );
        assert!(report.rejected.is_empty());

        let resolved = ResolvedSettings::load(&ns).unwrap();
        assert!(!resolved.bool("footer_enabled"));
        assert!(!resolved.bool("content_links_underline"));
        assert_eq!(resolved.integer("global_page_width"), 30);
    }

    #[test]
    fn each_allowed_non_default_value_stores_exactly_one_override() {
        for def in catalog::submitted() {
            let Some(raw) = non_default_raw(def) else {
                continue;
            };
            let mut store = MemoryStore::new();
            let mut ns = Namespace::new(&mut store, NS);
            let mut submission = default_submission();
            match raw {
                Some(raw) => submission.insert(def.id.to_string(), raw),
                None => submission.remove(def.id),
            };
            apply_submission(&mut ns, &submission).unwrap();
            assert_eq!(store.ids(NS), vec![def.id], "overrides for {}", def.id);
        }
    }

    #[test]
    fn stale_override_is_removed_when_default_is_submitted() {
        let mut store = MemoryStore::new();
        store
            .put(NS, "global_page_width", SettingValue::Integer(40), DeclaredType::Integer, "")
            .unwrap();
        let mut ns = Namespace::new(&mut store, NS);
        apply_submission(&mut ns, &default_submission()).unwrap();
        assert!(store.ids(NS).is_empty());
    }

    #[test]
    fn malformed_input_never_errors_and_never_persists() {
        let mut store = MemoryStore::new();
        let mut ns = Namespace::new(&mut store, NS);
        let mut submission = default_submission();
        submission.insert("global_page_width".into(), "99999999999999999999999".into());
        submission.insert("global_font_size".into(), "-1".into());
        submission.insert("global_color_primary".into(), "chartreuse".into());
        submission.insert("global_js".into(), "yes".into());
        submission.insert("not_a_setting".into(), "1".into());

        let report = apply_submission(&mut ns, &submission).unwrap();
        assert_eq!(
            report.rejected,
            vec![
                "global_page_width",
                "global_font_size",
                "global_color_primary",
                "global_js",
            ]
        );
        assert!(store.ids(NS).is_empty());
    }

    #[test]
    fn derived_settings_are_not_touched() {
        let mut store = MemoryStore::new();
        store
            .put(NS, "styles", SettingValue::String("a{}".into()), DeclaredType::String, "")
            .unwrap();
        let mut ns = Namespace::new(&mut store, NS);
        apply_submission(&mut ns, &default_submission()).unwrap();
        assert_eq!(store.ids(NS), vec!["styles"]);
    }

    #[test]
    fn store_failure_propagates() {
        let mut store = FailingStore;
        let mut ns = Namespace::new(&mut store, NS);
        assert!(apply_submission(&mut ns, &default_submission()).is_err());
    }

    // =========================================================================
    // ResolvedSettings
    // =========================================================================

    #[test]
    fn defaults_resolve_every_catalog_default() {
        let resolved = ResolvedSettings::defaults();
        assert_eq!(resolved.integer("global_page_width"), 30);
        assert_eq!(resolved.string("global_font_family"), "sans-serif");
        assert!(resolved.bool("content_links_underline"));
        assert!(!resolved.bool("global_js"));
        assert_eq!(resolved.string("content_separator"), "|");
        assert!(resolved.header_image().is_none());
        assert!(resolved.overrides().is_empty());
    }

    #[test]
    fn load_overlays_stored_values() {
        let resolved = resolved_with(&[("global_page_width", "40"), ("global_js", "1")]);
        assert_eq!(resolved.integer("global_page_width"), 40);
        assert!(resolved.bool("global_js"));
        assert_eq!(resolved.overrides(), vec!["global_page_width", "global_js"]);
    }

    #[test]
    fn load_ignores_invalid_stored_values() {
        let mut store = MemoryStore::new();
        store
            .put(NS, "global_page_width", SettingValue::Integer(33), DeclaredType::Integer, "")
            .unwrap();
        store
            .put(NS, "global_font_family", SettingValue::Integer(1), DeclaredType::Integer, "")
            .unwrap();
        let ns = Namespace::new(&mut store, NS);
        let resolved = ResolvedSettings::load(&ns).unwrap();
        assert_eq!(resolved.integer("global_page_width"), 30);
        assert_eq!(resolved.string("global_font_family"), "sans-serif");
    }

    #[test]
    fn load_coerces_legacy_representations() {
        let mut store = MemoryStore::new();
        store
            .put(NS, "global_js", SettingValue::Integer(1), DeclaredType::Integer, "")
            .unwrap();
        store
            .put(
                NS,
                "global_font_size",
                SettingValue::String("90".into()),
                DeclaredType::String,
                "",
            )
            .unwrap();
        let ns = Namespace::new(&mut store, NS);
        let resolved = ResolvedSettings::load(&ns).unwrap();
        assert!(resolved.bool("global_js"));
        assert_eq!(resolved.integer("global_font_size"), 90);
    }

    #[test]
    fn resolving_twice_is_identical() {
        let pairs = [("global_font_family", "atkinson"), ("content_hyphens", "enabled")];
        assert_eq!(resolved_with(&pairs), resolved_with(&pairs));
    }
}
