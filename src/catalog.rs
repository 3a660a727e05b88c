//! The closed catalog of theme settings.
//!
//! Every configurable option of the theme is declared here once, with its
//! value type, default, allowed choices and the admin section it is shown in.
//! The catalog is a `static` slice: nothing adds to it or mutates it at
//! runtime, and every other module looks settings up by id.
//!
//! ## Value Types
//!
//! | Type | Form input | Stored as |
//! |------|------------|-----------|
//! | `Boolean` | checkbox (`"1"` when checked, absent otherwise) | boolean |
//! | `String` | one-line text field | string |
//! | `Integer` | number field | integer |
//! | `EnumString` | select | string |
//! | `EnumInteger` | select with numeric values | integer |
//! | `FreeText` | textarea | string |
//! | `Image` | URL field, validated against the public folder | array |
//!
//! Labels are i18n message keys (`settings-global-pagewidth-title`, …). The
//! host translates them; this crate only carries them through to the store.

use crate::store::SettingValue;

/// Admin page section a setting is displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Section {
    Global,
    Header,
    Content,
    Widgets,
    Footer,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Global,
        Section::Header,
        Section::Content,
        Section::Widgets,
        Section::Footer,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Section::Global => "global",
            Section::Header => "header",
            Section::Content => "content",
            Section::Widgets => "widgets",
            Section::Footer => "footer",
        }
    }
}

/// Declared value type of a setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Boolean,
    String,
    Integer,
    EnumString,
    EnumInteger,
    FreeText,
    Image,
}

/// One allowed value of an enumerated setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice<T> {
    pub value: T,
    /// i18n key of the option label.
    pub label: &'static str,
}

/// Value type together with the default and, for enums, the allowed values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Boolean {
        default: bool,
    },
    String {
        default: &'static str,
    },
    Integer {
        default: i64,
    },
    EnumString {
        default: &'static str,
        choices: &'static [Choice<&'static str>],
    },
    EnumInteger {
        default: i64,
        choices: &'static [Choice<i64>],
    },
    FreeText {
        default: &'static str,
    },
    /// Banner image; the default is "no image".
    Image,
}

/// A single configurable option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingDefinition {
    pub id: &'static str,
    pub kind: ValueKind,
    /// i18n key of the setting title (also used as the store label).
    pub label: &'static str,
    pub section: Section,
    /// Subsection id, `None` for settings shown directly under the section title.
    pub subsection: Option<&'static str>,
    /// Computed by the save pipeline instead of read from the submission.
    pub derived: bool,
}

impl SettingDefinition {
    pub fn value_type(&self) -> ValueType {
        match self.kind {
            ValueKind::Boolean { .. } => ValueType::Boolean,
            ValueKind::String { .. } => ValueType::String,
            ValueKind::Integer { .. } => ValueType::Integer,
            ValueKind::EnumString { .. } => ValueType::EnumString,
            ValueKind::EnumInteger { .. } => ValueType::EnumInteger,
            ValueKind::FreeText { .. } => ValueType::FreeText,
            ValueKind::Image => ValueType::Image,
        }
    }

    /// Typed default, `None` for the banner image.
    pub fn default_value(&self) -> Option<SettingValue> {
        match self.kind {
            ValueKind::Boolean { default } => Some(SettingValue::Boolean(default)),
            ValueKind::Integer { default } | ValueKind::EnumInteger { default, .. } => {
                Some(SettingValue::Integer(default))
            }
            ValueKind::String { default }
            | ValueKind::FreeText { default }
            | ValueKind::EnumString { default, .. } => {
                Some(SettingValue::String(default.to_string()))
            }
            ValueKind::Image => None,
        }
    }

    /// Whether `raw` is one of the allowed raw values. Non-enum settings accept
    /// anything.
    pub fn allows(&self, raw: &str) -> bool {
        match self.kind {
            ValueKind::EnumString { choices, .. } => choices.iter().any(|c| c.value == raw),
            ValueKind::EnumInteger { choices, .. } => raw
                .trim()
                .parse::<i64>()
                .is_ok_and(|n| choices.iter().any(|c| c.value == n)),
            _ => true,
        }
    }
}

const fn checkbox(
    id: &'static str,
    label: &'static str,
    default: bool,
    section: Section,
    subsection: Option<&'static str>,
) -> SettingDefinition {
    SettingDefinition {
        id,
        kind: ValueKind::Boolean { default },
        label,
        section,
        subsection,
        derived: false,
    }
}

const fn text(
    id: &'static str,
    label: &'static str,
    default: &'static str,
    section: Section,
    subsection: Option<&'static str>,
) -> SettingDefinition {
    SettingDefinition {
        id,
        kind: ValueKind::String { default },
        label,
        section,
        subsection,
        derived: false,
    }
}

const fn select(
    id: &'static str,
    label: &'static str,
    default: &'static str,
    choices: &'static [Choice<&'static str>],
    section: Section,
    subsection: Option<&'static str>,
) -> SettingDefinition {
    SettingDefinition {
        id,
        kind: ValueKind::EnumString { default, choices },
        label,
        section,
        subsection,
        derived: false,
    }
}

const fn select_int(
    id: &'static str,
    label: &'static str,
    default: i64,
    choices: &'static [Choice<i64>],
    section: Section,
    subsection: Option<&'static str>,
) -> SettingDefinition {
    SettingDefinition {
        id,
        kind: ValueKind::EnumInteger { default, choices },
        label,
        section,
        subsection,
        derived: false,
    }
}

const fn choice<T: Copy>(value: T, label: &'static str) -> Choice<T> {
    Choice { value, label }
}

/// Font families offered for the whole blog.
pub const FONT_FAMILY_CHOICES: &[Choice<&str>] = &[
    choice("sans-serif", "settings-global-fontfamily-sansserif-default"),
    choice("serif", "settings-global-fontfamily-serif"),
    choice("monospace", "settings-global-fontfamily-mono"),
    choice("sans-serif-browser", "settings-global-fontfamily-sansserifbrowser"),
    choice("serif-browser", "settings-global-fontfamily-serifbrowser"),
    choice("monospace-browser", "settings-global-fontfamily-monobrowser"),
    choice("atkinson", "settings-global-fontfamily-atkinson"),
    choice("luciole", "settings-global-fontfamily-luciole"),
];

/// Font families offered for post content; `same` follows the global family.
pub const CONTENT_FONT_CHOICES: &[Choice<&str>] = &[
    choice("same", "settings-content-fontfamily-same-default"),
    choice("sans-serif", "settings-global-fontfamily-sansserif"),
    choice("serif", "settings-global-fontfamily-serif"),
    choice("monospace", "settings-global-fontfamily-mono"),
    choice("sans-serif-browser", "settings-global-fontfamily-sansserifbrowser"),
    choice("serif-browser", "settings-global-fontfamily-serifbrowser"),
    choice("monospace-browser", "settings-global-fontfamily-monobrowser"),
    choice("atkinson", "settings-global-fontfamily-atkinson"),
    choice("luciole", "settings-global-fontfamily-luciole"),
];

/// Social networks with a footer link setting, in display order.
pub const SOCIAL_NETWORKS: [&str; 9] = [
    "diaspora", "discord", "facebook", "github", "mastodon", "signal", "tiktok", "twitter",
    "whatsapp",
];

const GLOBAL_PAGE_WIDTH_CHOICES: &[Choice<i64>] = &[
    choice(30, "settings-global-pagewidth-30-default"),
    choice(35, "settings-global-pagewidth-35"),
    choice(40, "settings-global-pagewidth-40"),
];

const GLOBAL_FONT_SIZE_CHOICES: &[Choice<i64>] = &[
    choice(80, "settings-global-fontsize-80"),
    choice(90, "settings-global-fontsize-90"),
    choice(100, "settings-global-fontsize-100-default"),
    choice(110, "settings-global-fontsize-110"),
    choice(120, "settings-global-fontsize-120"),
];

const GLOBAL_COLOR_PRIMARY_CHOICES: &[Choice<&str>] = &[
    choice("blue", "settings-global-primarycolor-blue-default"),
    choice("gray", "settings-global-primarycolor-gray"),
    choice("green", "settings-global-primarycolor-green"),
    choice("red", "settings-global-primarycolor-red"),
];

const GLOBAL_COLOR_BACKGROUND_CHOICES: &[Choice<&str>] = &[
    choice("none", "settings-global-backgroundcolor-none-default"),
    choice("beige", "settings-global-backgroundcolor-beige"),
    choice("blue", "settings-global-backgroundcolor-blue"),
    choice("gray", "settings-global-backgroundcolor-gray"),
    choice("green", "settings-global-backgroundcolor-green"),
    choice("red", "settings-global-backgroundcolor-red"),
];

const HEADER_IMAGE_POSITION_CHOICES: &[Choice<&str>] = &[
    choice("top", "settings-header-imageposition-top-default"),
    choice("bottom", "settings-header-imageposition-bottom"),
];

const CONTENT_LINE_HEIGHT_CHOICES: &[Choice<i64>] = &[
    choice(125, "settings-content-lineheight-small"),
    choice(150, "settings-content-lineheight-standard-default"),
    choice(175, "settings-content-lineheight-big"),
];

const CONTENT_TEXT_ALIGN_CHOICES: &[Choice<&str>] = &[
    choice("left", "settings-content-textalign-left-default"),
    choice("justify", "settings-content-textalign-justify"),
    choice("justify_not_mobile", "settings-content-textalign-justifynotmobile"),
];

const CONTENT_HYPHENS_CHOICES: &[Choice<&str>] = &[
    choice("disabled", "settings-content-hyphens-disabled-default"),
    choice("enabled", "settings-content-hyphens-enabled"),
    choice("enabled_not_mobile", "settings-content-hyphens-enablednotmobile"),
];

const CONTENT_POST_LIST_TYPE_CHOICES: &[Choice<&str>] = &[
    choice("short", "settings-content-postlisttype-short-default"),
    choice("excerpt", "settings-content-postlisttype-excerpt"),
    choice("content", "settings-content-postlisttype-content"),
];

const CONTENT_POST_EMAIL_AUTHOR_CHOICES: &[Choice<&str>] = &[
    choice("disabled", "settings-content-postlistcommentlink-no-default"),
    choice("comments_open", "settings-content-postlistcommentlink-open"),
    choice("always", "settings-content-postlistcommentlink-always"),
];

const WIDGETS_NAV_POSITION_CHOICES: &[Choice<&str>] = &[
    choice("header_content", "settings-widgets-navposition-top"),
    choice("content_footer", "settings-widgets-navposition-bottom-default"),
    choice("disabled", "settings-widgets-navposition-disabled"),
];

use Section::{Content, Footer, Global, Header, Widgets};

/// Every theme setting, in admin display order.
pub static CATALOG: &[SettingDefinition] = &[
    // Global
    select_int(
        "global_page_width",
        "settings-global-pagewidth-title",
        30,
        GLOBAL_PAGE_WIDTH_CHOICES,
        Global,
        Some("layout"),
    ),
    select_int(
        "global_font_size",
        "settings-global-fontsize-title",
        100,
        GLOBAL_FONT_SIZE_CHOICES,
        Global,
        Some("fonts"),
    ),
    select(
        "global_font_family",
        "settings-global-fontfamily-title",
        "sans-serif",
        FONT_FAMILY_CHOICES,
        Global,
        Some("fonts"),
    ),
    checkbox(
        "global_font_antialiasing",
        "settings-global-fontantialiasing-title",
        false,
        Global,
        Some("fonts"),
    ),
    select(
        "global_color_primary",
        "settings-global-primarycolor-title",
        "blue",
        GLOBAL_COLOR_PRIMARY_CHOICES,
        Global,
        Some("colors"),
    ),
    select(
        "global_color_background",
        "settings-global-backgroundcolor-title",
        "none",
        GLOBAL_COLOR_BACKGROUND_CHOICES,
        Global,
        Some("colors"),
    ),
    checkbox(
        "global_css_transition",
        "settings-global-colortransition-title",
        false,
        Global,
        Some("colors"),
    ),
    checkbox(
        "global_css_links_underline",
        "settings-global-linksunderline-title",
        false,
        Global,
        Some("colors"),
    ),
    checkbox(
        "global_css_border_radius",
        "settings-global-roundcorner-title",
        false,
        Global,
        Some("colors"),
    ),
    checkbox(
        "global_meta_social",
        "settings-global-minimalsocialmarkups-title",
        false,
        Global,
        Some("advanced"),
    ),
    SettingDefinition {
        id: "global_meta_home_description",
        kind: ValueKind::FreeText { default: "" },
        label: "settings-global-metahomedescription-title",
        section: Global,
        subsection: Some("advanced"),
        derived: false,
    },
    checkbox(
        "global_js",
        "settings-global-js-title",
        false,
        Global,
        Some("advanced"),
    ),
    checkbox(
        "global_meta_generator",
        "settings-global-metagenerator-title",
        false,
        Global,
        Some("advanced"),
    ),
    // Header
    checkbox(
        "header_description",
        "settings-header-description-title",
        false,
        Header,
        None,
    ),
    SettingDefinition {
        id: "header_image",
        kind: ValueKind::Image,
        label: "settings-header-image-title",
        section: Header,
        subsection: Some("image"),
        derived: true,
    },
    SettingDefinition {
        id: "header_image2x",
        kind: ValueKind::String { default: "" },
        label: "settings-header-image-title",
        section: Header,
        subsection: Some("image"),
        derived: true,
    },
    select(
        "header_image_position",
        "settings-header-layout-title",
        "top",
        HEADER_IMAGE_POSITION_CHOICES,
        Header,
        Some("image"),
    ),
    text(
        "header_image_description",
        "settings-header-imagedescription-title",
        "",
        Header,
        Some("image"),
    ),
    // Content
    select(
        "content_text_font",
        "settings-content-fontfamily-title",
        "same",
        CONTENT_FONT_CHOICES,
        Content,
        Some("text-formatting"),
    ),
    select_int(
        "content_line_height",
        "settings-content-lineheight-title",
        150,
        CONTENT_LINE_HEIGHT_CHOICES,
        Content,
        Some("text-formatting"),
    ),
    select(
        "content_text_align",
        "settings-content-textalign-title",
        "left",
        CONTENT_TEXT_ALIGN_CHOICES,
        Content,
        Some("text-formatting"),
    ),
    select(
        "content_hyphens",
        "settings-content-hyphens-title",
        "disabled",
        CONTENT_HYPHENS_CHOICES,
        Content,
        Some("text-formatting"),
    ),
    checkbox(
        "content_initial_letter",
        "settings-content-initialletter-title",
        false,
        Content,
        Some("text-formatting"),
    ),
    select(
        "content_post_list_type",
        "settings-content-postlisttype-title",
        "short",
        CONTENT_POST_LIST_TYPE_CHOICES,
        Content,
        Some("entry-list"),
    ),
    checkbox(
        "content_post_list_time",
        "settings-content-postlisttime-title",
        false,
        Content,
        Some("entry-list"),
    ),
    checkbox(
        "content_post_list_reaction_link",
        "settings-content-postlistreactionlink-title",
        false,
        Content,
        Some("entry-list"),
    ),
    checkbox(
        "content_post_time",
        "settings-content-posttime-title",
        false,
        Content,
        Some("post"),
    ),
    checkbox(
        "content_post_intro",
        "settings-content-postintro-title",
        false,
        Content,
        Some("post"),
    ),
    checkbox(
        "content_links_underline",
        "settings-content-linksunderline-title",
        true,
        Content,
        Some("post"),
    ),
    checkbox(
        "content_images_wide",
        "settings-content-imageswide-title",
        false,
        Content,
        Some("post"),
    ),
    checkbox(
        "content_commentform_hide",
        "settings-content-commentformhide-title",
        false,
        Content,
        Some("reactions"),
    ),
    checkbox(
        "content_reaction_feed",
        "settings-content-postreactionfeed-title",
        true,
        Content,
        Some("reactions"),
    ),
    checkbox(
        "content_trackback_link",
        "settings-content-posttrackbacklink-title",
        true,
        Content,
        Some("reactions"),
    ),
    select(
        "content_post_email_author",
        "settings-content-privatecomment-title",
        "disabled",
        CONTENT_POST_EMAIL_AUTHOR_CHOICES,
        Content,
        Some("reactions"),
    ),
    text(
        "content_separator",
        "settings-content-separator-title",
        "|",
        Content,
        Some("other"),
    ),
    // Widgets
    select(
        "widgets_nav_position",
        "settings-widgets-navposition-title",
        "content_footer",
        WIDGETS_NAV_POSITION_CHOICES,
        Widgets,
        None,
    ),
    checkbox(
        "widgets_search_form",
        "settings-widgets-searchform-title",
        false,
        Widgets,
        None,
    ),
    checkbox(
        "widgets_extra_enabled",
        "settings-widgets-extra-title",
        true,
        Widgets,
        None,
    ),
    // Footer
    checkbox(
        "footer_enabled",
        "settings-footer-activation-title",
        true,
        Footer,
        None,
    ),
    checkbox(
        "footer_credits",
        "settings-footer-credits-title",
        true,
        Footer,
        None,
    ),
    text(
        "footer_social_links_diaspora",
        "settings-footer-sociallinks-diaspora-title",
        "",
        Footer,
        Some("social-links"),
    ),
    text(
        "footer_social_links_discord",
        "settings-footer-sociallinks-discord-title",
        "",
        Footer,
        Some("social-links"),
    ),
    text(
        "footer_social_links_facebook",
        "settings-footer-sociallinks-facebook-title",
        "",
        Footer,
        Some("social-links"),
    ),
    text(
        "footer_social_links_github",
        "settings-footer-sociallinks-github-title",
        "",
        Footer,
        Some("social-links"),
    ),
    text(
        "footer_social_links_mastodon",
        "settings-footer-sociallinks-mastodon-title",
        "",
        Footer,
        Some("social-links"),
    ),
    text(
        "footer_social_links_signal",
        "settings-footer-sociallinks-signal-title",
        "",
        Footer,
        Some("social-links"),
    ),
    text(
        "footer_social_links_tiktok",
        "settings-footer-sociallinks-tiktok-title",
        "",
        Footer,
        Some("social-links"),
    ),
    text(
        "footer_social_links_twitter",
        "settings-footer-sociallinks-twitter-title",
        "",
        Footer,
        Some("social-links"),
    ),
    text(
        "footer_social_links_whatsapp",
        "settings-footer-sociallinks-whatsapp-title",
        "",
        Footer,
        Some("social-links"),
    ),
    SettingDefinition {
        id: STYLES_ID,
        kind: ValueKind::String { default: "" },
        label: "settings-footer-origineministyles-title",
        section: Footer,
        subsection: None,
        derived: true,
    },
];

/// Id of the generated stylesheet setting.
pub const STYLES_ID: &str = "styles";

/// Look a setting up by id.
pub fn find(id: &str) -> Option<&'static SettingDefinition> {
    CATALOG.iter().find(|d| d.id == id)
}

/// Settings read from the submission, i.e. everything not derived.
pub fn submitted() -> impl Iterator<Item = &'static SettingDefinition> {
    CATALOG.iter().filter(|d| !d.derived)
}
