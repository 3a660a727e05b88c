//! Color palettes.
//!
//! Colors are expressed as HSL channel overrides on top of the theme's
//! built-in blue. A channel the theme default already has is left out of the
//! table and is not emitted.

/// HSL channel values; `None` keeps the theme default for that channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsl {
    pub h: Option<&'static str>,
    pub s: Option<&'static str>,
    pub l: Option<&'static str>,
}

const fn hsl(h: &'static str, s: &'static str, l: &'static str) -> Hsl {
    Hsl {
        h: Some(h),
        s: Some(s),
        l: Some(l),
    }
}

/// The four variants of a primary color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimaryPalette {
    pub light: Hsl,
    pub light_amplified: Hsl,
    pub dark: Hsl,
    pub dark_amplified: Hsl,
}

const GRAY: PrimaryPalette = PrimaryPalette {
    light: hsl("0", "0%", "10%"),
    light_amplified: Hsl {
        h: None,
        s: None,
        l: Some("28%"),
    },
    dark: Hsl {
        h: Some("0%"),
        s: None,
        l: Some("99%"),
    },
    dark_amplified: Hsl {
        h: None,
        s: None,
        l: Some("80%"),
    },
};

const GREEN: PrimaryPalette = PrimaryPalette {
    light: hsl("120", "75%", "30%"),
    light_amplified: Hsl {
        h: None,
        s: Some("60%"),
        l: Some("40%"),
    },
    dark: Hsl {
        h: None,
        s: Some("60%"),
        l: Some("80%"),
    },
    dark_amplified: Hsl {
        h: None,
        s: Some("50%"),
        l: Some("60%"),
    },
};

const RED: PrimaryPalette = PrimaryPalette {
    light: hsl("0", "90%", "45%"),
    light_amplified: Hsl {
        h: None,
        s: Some("100%"),
        l: Some("55%"),
    },
    dark: Hsl {
        h: None,
        s: Some("70%"),
        l: Some("85%"),
    },
    dark_amplified: Hsl {
        h: None,
        s: None,
        l: Some("70%"),
    },
};

/// Palette of a non-default primary color. `None` for the default blue and
/// unknown names.
pub fn primary(name: &str) -> Option<&'static PrimaryPalette> {
    match name {
        "gray" => Some(&GRAY),
        "green" => Some(&GREEN),
        "red" => Some(&RED),
        _ => None,
    }
}

const BEIGE_BACKGROUND: Hsl = hsl("45", "65%", "96%");
const BLUE_BACKGROUND: Hsl = Hsl {
    h: None,
    s: Some("100%"),
    l: Some("98%"),
};
const GRAY_BACKGROUND: Hsl = hsl("0", "0%", "97%");
const GREEN_BACKGROUND: Hsl = hsl("105", "90%", "98%");
const RED_BACKGROUND: Hsl = hsl("0", "90%", "98%");

/// Channels of a tinted background. `None` for `none` and unknown names.
pub fn background(name: &str) -> Option<&'static Hsl> {
    match name {
        "beige" => Some(&BEIGE_BACKGROUND),
        "blue" => Some(&BLUE_BACKGROUND),
        "gray" => Some(&GRAY_BACKGROUND),
        "green" => Some(&GREEN_BACKGROUND),
        "red" => Some(&RED_BACKGROUND),
        _ => None,
    }
}
