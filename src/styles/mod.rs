//! Custom stylesheet generation.
//!
//! | Stage | Module |
//! |-------|--------|
//! | Resolved settings → buckets | [`rules`] ([`StyleRuleBuilder`]) |
//! | Buckets → CSS string → `styles` setting | [`serialize`] |
//!
//! Supporting tables live in [`palette`] (HSL channel overrides) and
//! [`fonts`] (font stacks and bundled webfonts); the ordered container is
//! [`bucket`].

pub mod bucket;
pub mod fonts;
pub mod palette;
pub mod rules;
pub mod serialize;

pub use bucket::{BucketName, CssBucket, Selector, StyleBuckets};
pub use rules::StyleRuleBuilder;
pub use serialize::{persist, serialize};
