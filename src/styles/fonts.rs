//! Font stacks and bundled webfonts.

/// Weight and style of the four faces of a bundled webfont, in slot order.
pub const FACE_VARIANTS: [(&str, &str); 4] = [
    ("400", "normal"),
    ("400", "italic"),
    ("700", "normal"),
    ("700", "italic"),
];

const SERIF: &str = r#""Iowan Old Style", "Apple Garamond", Baskerville, "Times New Roman", "Droid Serif", Times, "Source Serif Pro", serif, "Apple Color Emoji", "Segoe UI Emoji", "Segoe UI Symbol""#;
const MONOSPACE: &str = r#"Menlo, Consolas, Monaco, "Liberation Mono", "Lucida Console", monospace"#;
const SYSTEM_SANS_SERIF: &str = r#"-apple-system, BlinkMacSystemFont, "Avenir Next", Avenir, "Segoe UI", "Helvetica Neue", Helvetica, Ubuntu, Roboto, Noto, Arial, sans-serif"#;

/// A font family shipped with the theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WebFont {
    /// Quoted family name used in `@font-face`.
    pub face_name: &'static str,
    /// Value of the font family custom property.
    pub stack: &'static str,
    /// File names, one per entry of [`FACE_VARIANTS`].
    pub files: [&'static str; 4],
    /// `format()` hint of the files.
    pub format: &'static str,
}

pub const ATKINSON: WebFont = WebFont {
    face_name: r#""Atkinson Hyperlegible""#,
    stack: r#""Atkinson Hyperlegible", sans-serif"#,
    files: [
        "Atkinson-Hyperlegible-Regular-102a.woff2",
        "Atkinson-Hyperlegible-Italic-102a.woff2",
        "Atkinson-Hyperlegible-Bold-102a.woff2",
        "Atkinson-Hyperlegible-BoldItalic-102a.woff2",
    ],
    format: "woff2",
};

pub const LUCIOLE: WebFont = WebFont {
    face_name: r#""Luciole""#,
    stack: "Luciole, sans-serif",
    files: [
        "Luciole-Regular.ttf",
        "Luciole-Regular-Italic.ttf",
        "Luciole-Bold.ttf",
        "Luciole-Bold-Italic.ttf",
    ],
    format: "truetype",
};

pub fn webfont(family: &str) -> Option<&'static WebFont> {
    match family {
        "atkinson" => Some(&ATKINSON),
        "luciole" => Some(&LUCIOLE),
        _ => None,
    }
}

/// Stack for a font family choice.
///
/// The theme's own default is a system sans-serif stack, so `sans-serif`
/// only needs spelling out for post content, where it overrides another
/// global family.
pub fn stack(family: &str, for_content: bool) -> Option<&'static str> {
    match family {
        "sans-serif" if for_content => Some(SYSTEM_SANS_SERIF),
        "serif" => Some(SERIF),
        "monospace" => Some(MONOSPACE),
        "sans-serif-browser" => Some("sans-serif"),
        "serif-browser" => Some("serif"),
        "monospace-browser" => Some("monospace"),
        _ => webfont(family).map(|font| font.stack),
    }
}

impl WebFont {
    /// Declarations of the four faces, `url()`s resolved against `assets_url`.
    pub fn faces(&self, assets_url: &str) -> Vec<Vec<(&'static str, String)>> {
        let base = assets_url.trim_end_matches('/');
        self.files
            .iter()
            .zip(FACE_VARIANTS)
            .map(|(file, (weight, style))| {
                vec![
                    ("font-family", self.face_name.to_string()),
                    ("src", format!(r#"url("{base}/{file}") format("{}")"#, self.format)),
                    ("font-style", style.to_string()),
                    ("font-weight", weight.to_string()),
                ]
            })
            .collect()
    }
}
