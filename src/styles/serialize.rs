//! Stylesheet rendering and persistence.
//!
//! Output is minified: `selector{prop:value;...}` per rule, no whitespace
//! between rules, each wrapped bucket closed with a single `}`.

use super::bucket::{CssBucket, Selector, StyleBuckets};
use crate::catalog::{self, STYLES_ID};
use crate::escape::escape_stylesheet;
use crate::store::{DeclaredType, Namespace, SettingValue, SettingsStore, StoreError};

/// Render the rules of one bucket, without its wrapper.
pub fn render_bucket(bucket: &CssBucket) -> String {
    let mut css = String::new();
    for (selector, declarations) in bucket.iter() {
        match selector {
            Selector::Css(selector) => css.push_str(selector),
            Selector::FontFace(_) => css.push_str("@font-face"),
        }
        css.push('{');
        for (property, value) in declarations {
            css.push_str(property);
            css.push(':');
            css.push_str(value);
            css.push(';');
        }
        css.push('}');
    }
    css
}

/// Render every non-empty bucket in order, wrapped in its at-rule.
pub fn serialize(buckets: &StyleBuckets) -> String {
    let mut css = String::new();
    for (name, bucket) in buckets.iter() {
        let rules = render_bucket(bucket);
        match name.wrapper() {
            Some(open) => {
                css.push_str(open);
                css.push_str(&rules);
                css.push('}');
            }
            None => css.push_str(&rules),
        }
    }
    css
}

/// Store `css` as the `styles` setting, or remove the setting when there is
/// nothing to store. Returns the stored text.
pub fn persist<S: SettingsStore + ?Sized>(
    ns: &mut Namespace<'_, S>,
    css: &str,
) -> Result<Option<String>, StoreError> {
    if css.is_empty() {
        ns.remove(STYLES_ID)?;
        log::info!("no custom styles needed, stylesheet removed");
        return Ok(None);
    }
    let label = catalog::find(STYLES_ID).map_or("", |def| def.label);
    let escaped = escape_stylesheet(css);
    log::info!("stylesheet stored ({} bytes)", escaped.len());
    ns.put(STYLES_ID, SettingValue::String(escaped.clone()), DeclaredType::String, label)?;
    Ok(Some(escaped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::styles::bucket::BucketName;
    use crate::test_helpers::NS;

    #[test]
    fn empty_buckets_render_nothing() {
        assert_eq!(serialize(&StyleBuckets::new()), "");
    }

    #[test]
    fn rules_render_minified() {
        let mut buckets = StyleBuckets::new();
        buckets.add_all(
            BucketName::Root,
            ":root",
            &[("--page-width", "35em"), ("--font-size", "0.8em")],
        );
        buckets.add(BucketName::Root, "body", "font-smooth", "always");
        assert_eq!(
            serialize(&buckets),
            ":root{--page-width:35em;--font-size:0.8em;}body{font-smooth:always;}"
        );
    }

    #[test]
    fn font_faces_render_as_at_rules() {
        let mut buckets = StyleBuckets::new();
        buckets.add_font_face(
            0,
            &[("font-family", "\"Luciole\"".to_string()), ("font-weight", "400".to_string())],
        );
        buckets.add_font_face(1, &[("font-weight", "700".to_string())]);
        assert_eq!(
            serialize(&buckets),
            "@font-face{font-family:\"Luciole\";font-weight:400;}@font-face{font-weight:700;}"
        );
    }

    #[test]
    fn buckets_are_wrapped_in_fixed_order() {
        let mut buckets = StyleBuckets::new();
        buckets.add(BucketName::Print, "body", "font-smooth", "unset");
        buckets.add(BucketName::Narrow, ":root", "--text-align", "left");
        buckets.add(BucketName::Main, "a", "transition", "unset");
        buckets.add(BucketName::Root, ":root", "--text-align", "justify");

        assert_eq!(
            serialize(&buckets),
            ":root{--text-align:justify;}\
             a{transition:unset;}\
             @media (max-width:34em){:root{--text-align:left;}}\
             @media print{body{font-smooth:unset;}}"
        );
    }

    #[test]
    fn initial_letter_wrapper_keeps_child_combinator_when_stored() {
        let mut buckets = StyleBuckets::new();
        buckets.add(
            BucketName::InitialLetter,
            ".content-text > p",
            "initial-letter",
            "2",
        );
        let css = serialize(&buckets);
        assert!(css.starts_with("@supports (initial-letter: 2)"));

        let mut store = MemoryStore::new();
        let mut ns = Namespace::new(&mut store, NS);
        assert_eq!(persist(&mut ns, &css).unwrap().as_deref(), Some(css.as_str()));
        let stored = store.get(NS, STYLES_ID).unwrap().unwrap();
        assert_eq!(stored.as_str(), Some(css.as_str()));
    }

    #[test]
    fn persisting_empty_css_removes_the_setting() {
        let mut store = MemoryStore::new();
        let mut ns = Namespace::new(&mut store, NS);
        persist(&mut ns, "a{b:c;}").unwrap();
        assert_eq!(persist(&mut ns, "").unwrap(), None);
        assert!(store.ids(NS).is_empty());
    }
}
