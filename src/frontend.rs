//! Values the public templates ask the theme for.

use crate::escape::escape_url;
use maud::{PreEscaped, html};

pub const THEME_NAME: &str = "Origine Mini";
pub const THEME_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The request URI, escaped for use in an attribute.
pub fn uri_relative(request_uri: &str) -> String {
    escape_url(request_uri)
}

/// Message key of the label printed before a post's tag list.
pub fn post_tags_prefix(tag_count: usize) -> Option<&'static str> {
    match tag_count {
        0 => None,
        1 => Some("post-tags-prefix-one"),
        _ => Some("post-tags-prefix-multiple"),
    }
}

/// Versions shown in the footer credits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credits {
    pub core_version: String,
    pub theme_name: String,
    pub theme_version: String,
    /// Development blogs show the detailed version line.
    pub dev_mode: bool,
}

impl Credits {
    pub fn for_theme(core_version: impl Into<String>, dev_mode: bool) -> Self {
        Self {
            core_version: core_version.into(),
            theme_name: THEME_NAME.to_string(),
            theme_version: THEME_VERSION.to_string(),
            dev_mode,
        }
    }
}

/// Core version without its pre-release suffix: `2.27-dev` → `2.27`.
pub fn short_version(version: &str) -> &str {
    version.split('-').next().unwrap_or(version)
}

/// Substitute `%s` placeholders in order; `%%` is a literal percent sign.
/// Missing arguments leave their placeholder empty.
pub fn format_template(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('s') => {
                chars.next();
                if let Some(arg) = args.next() {
                    out.push_str(arg);
                }
            }
            Some('%') => {
                chars.next();
                out.push('%');
            }
            _ => out.push('%'),
        }
    }
    out
}

/// Footer credits block.
///
/// `template` is the translated credits message and may contain markup. In
/// production it takes the theme name; in development mode it takes the core
/// version, the short core version, the theme name and the theme version.
pub fn footer_credits(credits: &Credits, template: &str) -> String {
    let text = if credits.dev_mode {
        format_template(
            template,
            &[
                &credits.core_version,
                short_version(&credits.core_version),
                &credits.theme_name,
                &credits.theme_version,
            ],
        )
    } else {
        format_template(template, &[&credits.theme_name])
    };
    html! {
        div.site-footer-block { (PreEscaped(text)) }
    }
    .into_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uri_relative_escapes_query_strings() {
        assert_eq!(uri_relative("/post/a?x=1&y='2'"), "/post/a?x=1&amp;y=&#039;2&#039;");
    }

    #[test]
    fn tags_prefix_is_pluralized() {
        assert_eq!(post_tags_prefix(0), None);
        assert_eq!(post_tags_prefix(1), Some("post-tags-prefix-one"));
        assert_eq!(post_tags_prefix(7), Some("post-tags-prefix-multiple"));
    }

    #[test]
    fn short_version_drops_suffix() {
        assert_eq!(short_version("2.27-dev-r1234"), "2.27");
        assert_eq!(short_version("2.27"), "2.27");
    }

    #[test]
    fn template_placeholders() {
        assert_eq!(format_template("%s and %s", &["a", "b"]), "a and b");
        assert_eq!(format_template("100%% %s", &["done"]), "100% done");
        assert_eq!(format_template("%s %s", &["one"]), "one ");
        assert_eq!(format_template("50%", &[]), "50%");
    }

    #[test]
    fn production_credits() {
        let credits = Credits::for_theme("2.27", false);
        let html = footer_credits(&credits, "Powered by <a href=\"https://dotclear.org/\">Dotclear</a> and %s");
        assert_eq!(
            html,
            "<div class=\"site-footer-block\">Powered by <a href=\"https://dotclear.org/\">Dotclear</a> and Origine Mini</div>"
        );
    }

    #[test]
    fn development_credits_show_versions() {
        let credits = Credits {
            core_version: "2.27-dev".into(),
            theme_name: "Origine Mini".into(),
            theme_version: "0.1".into(),
            dev_mode: true,
        };
        assert_eq!(
            footer_credits(&credits, "Dotclear %s (%s), %s %s"),
            "<div class=\"site-footer-block\">Dotclear 2.27-dev (2.27), Origine Mini 0.1</div>"
        );
    }
}
