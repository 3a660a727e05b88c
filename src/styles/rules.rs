//! Stylesheet rules derived from the resolved settings.
//!
//! Every setting that changes the look of the blog has one contribution
//! here: a plain function that checks its activation condition and, when it
//! holds, adds declarations to the buckets. Contributions never read the
//! buckets and never write a (bucket, selector, property) triple another
//! contribution writes, so the order they run in only affects where new
//! selectors land, never which value wins.
//!
//! Settings left at their default contribute nothing: the theme's base
//! stylesheet already renders the defaults.

use super::bucket::{BucketName, StyleBuckets};
use super::{fonts, palette};
use crate::catalog::SOCIAL_NETWORKS;
use crate::resolve::ResolvedSettings;

use BucketName::{Contrast, InitialLetter, Main, Narrow, Print, ReducedMotion, Root};

const TRANSITION: &str = "all .2s ease-in-out";

/// Everything a contribution may look at.
pub struct RuleInput<'a> {
    pub resolved: &'a ResolvedSettings,
    /// Width of the accepted header banner as a percentage of the page
    /// width, `None` without a banner.
    pub scale_percent: Option<u32>,
    /// Base URL of the bundled font files.
    pub font_assets_url: &'a str,
}

pub type Contribution = fn(&RuleInput<'_>, &mut StyleBuckets);

/// All contributions, in the order they are applied.
pub const CONTRIBUTIONS: &[(&str, Contribution)] = &[
    ("page-width", page_width),
    ("font-size", font_size),
    ("font-family", font_family),
    ("font-antialiasing", font_antialiasing),
    ("primary-color", primary_color),
    ("background-color", background_color),
    ("transitions", transitions),
    ("links-underline", links_underline),
    ("border-radius", border_radius),
    ("trackback-link", trackback_link),
    ("header-banner", header_banner),
    ("blog-description", blog_description),
    ("content-font", content_font),
    ("line-height", line_height),
    ("text-align", text_align),
    ("hyphenation", hyphenation),
    ("initial-letter", initial_letter),
    ("post-intro", post_intro),
    ("post-list-content", post_list_content),
    ("content-links", content_links),
    ("post-list-reaction-link", post_list_reaction_link),
    ("private-comment", private_comment),
    ("structure-order", structure_order),
    ("social-links", social_links),
];

/// Builds the CSS buckets for one set of resolved settings.
#[derive(Debug, Clone)]
pub struct StyleRuleBuilder {
    font_assets_url: String,
}

impl StyleRuleBuilder {
    pub fn new(font_assets_url: impl Into<String>) -> Self {
        Self {
            font_assets_url: font_assets_url.into(),
        }
    }

    pub fn build(&self, resolved: &ResolvedSettings, scale_percent: Option<u32>) -> StyleBuckets {
        let input = RuleInput {
            resolved,
            scale_percent,
            font_assets_url: &self.font_assets_url,
        };
        let mut buckets = StyleBuckets::new();
        for (_, contribution) in CONTRIBUTIONS {
            contribution(&input, &mut buckets);
        }
        buckets
    }
}

/// `value / 100` written as a short decimal: 80 → `0.8`, 125 → `1.25`.
pub fn hundredths(value: i64) -> String {
    let sign = if value < 0 { "-" } else { "" };
    let value = value.abs();
    let (int, frac) = (value / 100, value % 100);
    if frac == 0 {
        format!("{sign}{int}")
    } else {
        let frac = format!("{frac:02}");
        format!("{sign}{int}.{}", frac.trim_end_matches('0'))
    }
}

fn page_width(input: &RuleInput<'_>, b: &mut StyleBuckets) {
    let width = input.resolved.integer("global_page_width");
    if matches!(width, 35 | 40) {
        b.add(Root, ":root", "--page-width", format!("{width}em"));
    }
}

fn font_size(input: &RuleInput<'_>, b: &mut StyleBuckets) {
    let size = input.resolved.integer("global_font_size");
    if matches!(size, 80 | 90 | 110 | 120) {
        b.add(Root, ":root", "--font-size", format!("{}em", hundredths(size)));
    }
}

fn add_webfont_faces(
    b: &mut StyleBuckets,
    font: &fonts::WebFont,
    first_slot: u8,
    assets_url: &str,
) {
    for (slot, face) in (first_slot..).zip(font.faces(assets_url)) {
        b.add_font_face(slot, &face);
    }
}

fn font_family(input: &RuleInput<'_>, b: &mut StyleBuckets) {
    let family = input.resolved.string("global_font_family");
    if let Some(font) = fonts::webfont(family) {
        add_webfont_faces(b, font, 0, input.font_assets_url);
    }
    if let Some(stack) = fonts::stack(family, false) {
        b.add(Root, ":root", "--font-family", stack);
    }
}

fn font_antialiasing(input: &RuleInput<'_>, b: &mut StyleBuckets) {
    if !input.resolved.bool("global_font_antialiasing") {
        return;
    }
    b.add_all(
        Root,
        "body",
        &[
            ("-moz-osx-font-smoothing", "grayscale"),
            ("-webkit-font-smoothing", "antialiased"),
            ("font-smooth", "always"),
        ],
    );
    let unset = [
        ("-moz-osx-font-smoothing", "unset"),
        ("-webkit-font-smoothing", "unset"),
        ("font-smooth", "unset"),
    ];
    b.add_all(Contrast, "body", &unset);
    b.add_all(Print, "body", &unset);
}

fn add_channels(b: &mut StyleBuckets, prefix: &str, hsl: &palette::Hsl) {
    for (channel, value) in [("h", hsl.h), ("s", hsl.s), ("l", hsl.l)] {
        if let Some(value) = value {
            b.add(Root, ":root", &format!("{prefix}-{channel}-custom"), value);
        }
    }
}

fn primary_color(input: &RuleInput<'_>, b: &mut StyleBuckets) {
    let Some(colors) = palette::primary(input.resolved.string("global_color_primary")) else {
        return;
    };
    add_channels(b, "--color-primary", &colors.light);
    add_channels(b, "--color-primary-amplified", &colors.light_amplified);
    add_channels(b, "--color-primary-dark", &colors.dark);
    add_channels(b, "--color-primary-dark-amplified", &colors.dark_amplified);
}

fn background_color(input: &RuleInput<'_>, b: &mut StyleBuckets) {
    let Some(channels) = palette::background(input.resolved.string("global_color_background"))
    else {
        return;
    };
    add_channels(b, "--color-background", channels);
    b.add(Root, ":root", "--color-input-background", "#fff");
}

const TRANSITION_SELECTORS: [&str; 4] = [
    "a",
    "a:active, a:hover",
    r#"input[type="submit"], .form-submit, .button"#,
    r#"input[type="submit"]:hover, .button:hover, .form-submit:hover"#,
];

fn transitions(input: &RuleInput<'_>, b: &mut StyleBuckets) {
    if !input.resolved.bool("global_css_transition") {
        return;
    }
    for selector in TRANSITION_SELECTORS {
        b.add(Main, selector, "transition", TRANSITION);
    }
    for selector in TRANSITION_SELECTORS {
        b.add(ReducedMotion, selector, "transition", "unset");
    }
}

fn links_underline(input: &RuleInput<'_>, b: &mut StyleBuckets) {
    if !input.resolved.bool("global_css_links_underline") {
        return;
    }
    b.add_all(
        Root,
        ":root",
        &[
            ("--link-text-decoration", "underline"),
            ("--link-text-decoration-style", "dotted"),
        ],
    );
    b.add_all(
        Root,
        ".button",
        &[("text-decoration", "none"), ("text-decoration-style", "none")],
    );
}

fn border_radius(input: &RuleInput<'_>, b: &mut StyleBuckets) {
    if input.resolved.bool("global_css_border_radius") {
        b.add(Root, ":root", "--border-radius", ".168rem");
    }
}

fn trackback_link(input: &RuleInput<'_>, b: &mut StyleBuckets) {
    let resolved = input.resolved;
    if !(resolved.bool("global_js") && resolved.bool("content_trackback_link")) {
        return;
    }
    b.add(Main, "#trackback-url", "color", "var(--color-primary, #1742cf)");
    b.add_all(
        Main,
        "#trackback-url:is(:active, :focus, :hover)",
        &[
            ("cursor", "pointer"),
            ("filter", "brightness(1.25)"),
            ("text-decoration", "underline"),
            ("text-decoration-style", "solid"),
        ],
    );
    b.add(Main, "#trackback-url-copied", "display", "none");
}

fn header_banner(input: &RuleInput<'_>, b: &mut StyleBuckets) {
    let Some(scale) = input.scale_percent else {
        return;
    };
    b.add(Main, "#site-image", "width", "100%");
    if input.resolved.bool("global_css_border_radius") {
        b.add(Main, "#site-image img", "border-radius", "var(--border-radius)");
    }
    if scale >= 100 {
        b.add(Main, "#site-image img", "width", "100%");
    }
}

fn blog_description(input: &RuleInput<'_>, b: &mut StyleBuckets) {
    if !input.resolved.bool("header_description") {
        return;
    }
    b.add_all(
        Main,
        "#site-identity",
        &[
            ("align-items", "center"),
            ("column-gap", ".5rem"),
            ("display", "flex"),
            ("flex-wrap", "wrap"),
            ("row-gap", ".5rem"),
        ],
    );
    b.add_all(
        Main,
        "#site-description",
        &[
            ("font-size", ".8em"),
            ("font-style", "italic"),
            ("font-weight", "normal"),
            ("margin", "0"),
        ],
    );
}

fn content_font(input: &RuleInput<'_>, b: &mut StyleBuckets) {
    let resolved = input.resolved;
    let family = resolved.string("content_text_font");
    if family == "same" || family == resolved.string("global_font_family") {
        return;
    }
    if let Some(font) = fonts::webfont(family) {
        add_webfont_faces(b, font, 4, input.font_assets_url);
    }
    if let Some(stack) = fonts::stack(family, true) {
        b.add(Root, ":root", "--font-family-content", stack);
    }
}

fn line_height(input: &RuleInput<'_>, b: &mut StyleBuckets) {
    let height = input.resolved.integer("content_line_height");
    if matches!(height, 125 | 175) {
        b.add(Root, ":root", "--text-line-height", hundredths(height));
    }
}

fn text_align(input: &RuleInput<'_>, b: &mut StyleBuckets) {
    let align = input.resolved.string("content_text_align");
    if !matches!(align, "justify" | "justify_not_mobile") {
        return;
    }
    b.add(Root, ":root", "--text-align", "justify");
    b.add(Contrast, ":root", "--text-align", "left");
    if align == "justify_not_mobile" {
        b.add(Narrow, ":root", "--text-align", "left");
    }
}

const HYPHENATION: [(&str, &str); 15] = [
    ("-webkit-hyphens", "auto"),
    ("-ms-hyphens", "auto"),
    ("hyphens", "auto"),
    ("-webkit-hyphenate-limit-chars", "5 2 2"),
    ("-moz-hyphenate-limit-chars", "5 2 2"),
    ("-ms-hyphenate-limit-chars", "5 2 2"),
    ("hyphenate-limit-chars", "5 2 2"),
    ("-webkit-hyphenate-limit-lines", "2"),
    ("-moz-hyphenate-limit-lines", "2"),
    ("-ms-hyphenate-limit-lines", "2"),
    ("hyphenate-limit-lines", "2"),
    ("-webkit-hyphenate-limit-last", "always"),
    ("-moz-hyphenate-limit-last", "always"),
    ("-ms-hyphenate-limit-last", "always"),
    ("hyphenate-limit-last", "always"),
];

fn hyphenation(input: &RuleInput<'_>, b: &mut StyleBuckets) {
    let hyphens = input.resolved.string("content_hyphens");
    if hyphens == "disabled" {
        return;
    }
    let unset: Vec<(&str, &str)> = HYPHENATION.iter().map(|(p, _)| (*p, "unset")).collect();
    b.add_all(Main, ".content-text", &HYPHENATION);
    b.add_all(Contrast, ".content-text", &unset);
    if hyphens == "enabled_not_mobile" {
        b.add_all(Narrow, ".content-text", &unset);
    }
}

fn initial_letter(input: &RuleInput<'_>, b: &mut StyleBuckets) {
    if !input.resolved.bool("content_initial_letter") {
        return;
    }
    b.add_all(
        InitialLetter,
        ":is(.post, .page) .content-text > p:first-of-type::first-letter",
        &[
            ("-moz-initial-letter", "2"),
            ("-webkit-initial-letter", "2"),
            ("initial-letter", "2"),
            ("margin-right", ".25rem"),
        ],
    );
}

fn post_intro(input: &RuleInput<'_>, b: &mut StyleBuckets) {
    if !input.resolved.bool("content_post_intro") {
        return;
    }
    b.add_all(
        Main,
        "#post-intro",
        &[
            ("border-block", ".063rem solid var(--color-border, #c2c7d6)"),
            ("font-weight", "700"),
            ("margin-bottom", "2rem"),
        ],
    );
    b.add(Main, "#post-intro strong", "font-weight", "900");
}

fn post_list_content(input: &RuleInput<'_>, b: &mut StyleBuckets) {
    if input.resolved.string("content_post_list_type") != "content" {
        return;
    }
    b.add(Main, ".entry-list-content .post", "margin-bottom", "4rem");
    b.add(Main, ".entry-list-content .post:last-child", "margin-bottom", "0");
    b.add(Main, ".entry-list-content .entry-title", "font-size", "1.4em");
}

fn content_links(input: &RuleInput<'_>, b: &mut StyleBuckets) {
    if input.resolved.bool("content_links_underline") {
        return;
    }
    b.add_all(
        Root,
        ":root",
        &[
            ("--content-link-text-decoration-line", "none"),
            ("--content-link-text-decoration-style", "unset"),
            ("--content-link-text-decoration-thickness", ".063rem"),
        ],
    );
}

fn post_list_reaction_link(input: &RuleInput<'_>, b: &mut StyleBuckets) {
    let resolved = input.resolved;
    if !resolved.bool("content_post_list_reaction_link") {
        return;
    }
    b.add(Main, ".entry-list .post", "flex-wrap", "wrap");
    if resolved.string("content_post_list_type") == "excerpt" {
        b.add_all(
            Main,
            ".post-reaction-link",
            &[
                ("display", "inline-block"),
                ("flex-basis", "100%"),
                ("margin-top", ".5rem"),
            ],
        );
    } else {
        b.add(Main, ".post-reaction-link", "flex-basis", "100%");
        b.add(Narrow, ".post-reaction-link", "order", "3");
    }
}

fn private_comment(input: &RuleInput<'_>, b: &mut StyleBuckets) {
    if input.resolved.string("content_post_email_author") != "disabled" {
        b.add(Main, ".comment-private", "margin-bottom", "2rem");
    }
}

/// Page blocks whose flex order can move, with their default order.
const STRUCTURE_DEFAULTS: [(&str, usize); 4] = [
    ("--order-content", 2),
    ("--order-widgets-nav", 3),
    ("--order-widgets-extra", 4),
    ("--order-footer", 5),
];

/// First flex order of the movable blocks; the header comes before.
const FIRST_ORDER: usize = 2;

/// Flex order of every displayed block, in page order.
pub fn structure(resolved: &ResolvedSettings) -> Vec<(&'static str, usize)> {
    let nav = resolved.string("widgets_nav_position");
    let mut blocks = Vec::with_capacity(4);
    if nav == "header_content" {
        blocks.push("--order-widgets-nav");
    }
    blocks.push("--order-content");
    if nav == "content_footer" {
        blocks.push("--order-widgets-nav");
    }
    if resolved.bool("widgets_extra_enabled") {
        blocks.push("--order-widgets-extra");
    }
    if resolved.bool("footer_enabled") {
        blocks.push("--order-footer");
    }
    blocks
        .into_iter()
        .enumerate()
        .map(|(i, block)| (block, FIRST_ORDER + i))
        .collect()
}

fn structure_order(input: &RuleInput<'_>, b: &mut StyleBuckets) {
    let order = structure(input.resolved);
    for (block, default) in STRUCTURE_DEFAULTS {
        if let Some((_, position)) = order.iter().find(|(name, _)| *name == block) {
            if *position != default {
                b.add(Root, ":root", block, position.to_string());
            }
        }
    }
}

const SOCIAL_ICON_CONTAINER: &str = ".footer-social-links-icon-container";
const SOCIAL_ICON: &str = ".footer-social-links-icon";
const SOCIAL_CONTAINER_ACTIVE: &str = ".footer-social-links a:active .footer-social-links-icon-container, .footer-social-links a:focus .footer-social-links-icon-container, .footer-social-links a:hover .footer-social-links-icon-container";
const SOCIAL_ICON_ACTIVE: &str = ".footer-social-links a:active .footer-social-links-icon, .footer-social-links a:focus .footer-social-links-icon, .footer-social-links a:hover .footer-social-links-icon";

fn has_social_links(resolved: &ResolvedSettings) -> bool {
    SOCIAL_NETWORKS
        .iter()
        .any(|network| !resolved.string(&format!("footer_social_links_{network}")).is_empty())
}

fn social_links(input: &RuleInput<'_>, b: &mut StyleBuckets) {
    let resolved = input.resolved;
    if !has_social_links(resolved) {
        return;
    }
    b.add(Main, ".footer-social-links", "margin-bottom", "1rem");
    b.add_all(
        Main,
        ".footer-social-links ul",
        &[("list-style", "none"), ("margin", "0"), ("padding-left", "0")],
    );
    b.add_all(
        Main,
        ".footer-social-links ul li",
        &[("display", "inline-block"), ("margin", ".25em")],
    );
    b.add(Main, ".footer-social-links ul li:first-child", "margin-left", "0");
    b.add(Main, ".footer-social-links ul li:last-child", "margin-right", "0");
    b.add_all(
        Main,
        ".footer-social-links a",
        &[("display", "inline-block"), ("border-bottom", "none")],
    );
    b.add_all(
        Main,
        SOCIAL_ICON_CONTAINER,
        &[
            ("align-items", "center"),
            ("background-color", "var(--color-input-background, #f1f2f4)"),
            ("border-radius", "var(--border-radius, unset)"),
            ("display", "flex"),
            ("justify-content", "center"),
            ("width", "1.5rem"),
            ("height", "1.5rem"),
        ],
    );
    b.add_all(
        Main,
        SOCIAL_ICON,
        &[
            ("border", "0"),
            ("fill", "var(--color-text-main, #2e3038)"),
            ("stroke", "none"),
            ("stroke-linecap", "round"),
            ("stroke-linejoin", "round"),
            ("stroke-width", "0"),
            ("width", "1rem"),
        ],
    );
    b.add(
        Main,
        SOCIAL_CONTAINER_ACTIVE,
        "background-color",
        "var(--color-primary, #1742cf)",
    );
    b.add(
        Main,
        ".footer-social-links a:active, .footer-social-links a:focus, .footer-social-links a:hover",
        "border-bottom",
        "none",
    );
    b.add(Main, SOCIAL_ICON_ACTIVE, "fill", "var(--color-background, #fcfcfd)");

    if resolved.bool("global_css_transition") {
        let animated = [
            SOCIAL_ICON_CONTAINER,
            SOCIAL_ICON,
            SOCIAL_CONTAINER_ACTIVE,
            SOCIAL_ICON_ACTIVE,
        ];
        for selector in animated {
            b.add(Main, selector, "transition", TRANSITION);
        }
        for selector in animated {
            b.add(ReducedMotion, selector, "transition", "unset");
        }
    }

    b.add(
        Contrast,
        SOCIAL_ICON_CONTAINER,
        "border",
        "1px solid var(--color-border, #c2c7d6)",
    );
}
