//! # Origine Mini
//!
//! Settings engine for the Origine Mini blog theme. The theme exposes a few
//! dozen typed settings (layout, fonts, colors, header banner, post and
//! footer options); this crate validates submitted values, persists only the
//! ones that differ from their default, and turns the effective settings into
//! the small custom stylesheet the public pages inline.
//!
//! # Architecture: One Save, Four Steps
//!
//! ```text
//! 1. Resolve     submission  →  store     (validate, keep non-defaults only)
//! 2. Banner      header URL  →  store     (probe the image, compute its scale)
//! 3. Build       settings    →  buckets   (one CSS contribution per concern)
//! 4. Serialize   buckets     →  "styles"  (deterministic CSS text, stored)
//! ```
//!
//! Each step reads what the previous one persisted, so the stored stylesheet
//! always matches the stored settings. A submission made only of defaults
//! leaves the store empty.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`catalog`] | Every setting: id, type, default, allowed choices, admin section |
//! | [`store`] | Namespaced key/value settings store, in memory or as a JSON file |
//! | [`resolve`] | Submission validation and the effective value of every setting |
//! | [`header_image`] | Header banner validation, 2x variant and display scale |
//! | [`imaging`] | Image existence and dimension probing behind a trait |
//! | [`styles`] | CSS buckets, the rule contributions and the stylesheet serializer |
//! | [`theme`] | The save / reset / regenerate pipeline over one namespace |
//! | [`escape`] | HTML, URL and stylesheet escaping |
//! | [`frontend`] | Values the public templates ask for: footer credits, tag labels |
//! | [`wide_images`] | Display size of landscape images wider than the text column |
//! | [`config`] | `origine-mini.toml` loading, merging and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Minimal Overrides
//!
//! The store never holds a value equal to its default. Reading a setting
//! falls back to the catalog, so changing a default in a later release
//! reaches every blog that never touched it.
//!
//! ## Buckets Before Text
//!
//! Stylesheet rules are collected into ordered buckets (root variables,
//! main rules, media queries) keyed by selector and property, and only
//! serialized at the end. Contributions never see each other's output, and
//! the same settings always produce byte-identical CSS.

pub mod catalog;
pub mod config;
pub mod escape;
pub mod frontend;
pub mod header_image;
pub mod imaging;
pub mod output;
pub mod resolve;
pub mod store;
pub mod styles;
pub mod theme;
pub mod wide_images;

#[cfg(test)]
pub(crate) mod test_helpers;
