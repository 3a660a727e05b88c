//! Ordered CSS buckets.
//!
//! A bucket is one stylesheet segment: a selector → declarations map that is
//! serialized as is and, for every bucket but the root and main ones, wrapped
//! in an at-rule. Both levels are [`IndexMap`]s, so insertion order is the
//! serialization order and nothing depends on hash iteration.

use indexmap::IndexMap;
use std::collections::BTreeMap;

/// Stylesheet segments, declared in serialization order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BucketName {
    /// Custom properties and root-level rules.
    Root,
    /// Dark color scheme variant of the root properties.
    RootDark,
    /// Regular rules, including `@font-face` slots.
    Main,
    /// Rules gated on `initial-letter` support.
    InitialLetter,
    /// Narrow viewport overrides.
    Narrow,
    /// Increased contrast overrides.
    Contrast,
    /// Reduced motion overrides.
    ReducedMotion,
    /// Print overrides.
    Print,
}

impl BucketName {
    pub const ORDER: [BucketName; 8] = [
        BucketName::Root,
        BucketName::RootDark,
        BucketName::Main,
        BucketName::InitialLetter,
        BucketName::Narrow,
        BucketName::Contrast,
        BucketName::ReducedMotion,
        BucketName::Print,
    ];

    /// Opening of the at-rule the bucket is wrapped in, without the closing
    /// brace. `None` for unwrapped buckets.
    pub fn wrapper(self) -> Option<&'static str> {
        match self {
            BucketName::Root | BucketName::Main => None,
            BucketName::RootDark => Some("@media (prefers-color-scheme:dark){"),
            BucketName::InitialLetter => Some(
                "@supports (initial-letter: 2) or (-webkit-initial-letter: 2) or (-moz-initial-letter: 2){",
            ),
            BucketName::Narrow => Some("@media (max-width:34em){"),
            BucketName::Contrast => Some(
                "@media (prefers-contrast:more),(-ms-high-contrast:active),(-ms-high-contrast:black-on-white){",
            ),
            BucketName::ReducedMotion => Some("@media (prefers-reduced-motion:reduce){"),
            BucketName::Print => Some("@media print{"),
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            BucketName::Root => "root",
            BucketName::RootDark => "root-dark",
            BucketName::Main => "main",
            BucketName::InitialLetter => "supports-initial-letter",
            BucketName::Narrow => "narrow",
            BucketName::Contrast => "contrast",
            BucketName::ReducedMotion => "reduced-motion",
            BucketName::Print => "print",
        }
    }
}

/// Key of a rule inside a bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// A regular selector list, e.g. `#site-image img`.
    Css(String),
    /// A numbered `@font-face` block. The slot only keeps faces apart; it is
    /// not rendered.
    FontFace(u8),
}

impl Selector {
    pub fn css(selector: &str) -> Self {
        Selector::Css(selector.to_string())
    }
}

/// Property → value, in declaration order.
pub type Declarations = IndexMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CssBucket {
    rules: IndexMap<Selector, Declarations>,
}

impl CssBucket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `property` on `selector`, appending the selector if it is new.
    /// Returns the value it replaces, if any.
    pub fn declare(
        &mut self,
        selector: Selector,
        property: &str,
        value: impl Into<String>,
    ) -> Option<String> {
        self.rules
            .entry(selector)
            .or_default()
            .insert(property.to_string(), value.into())
    }

    pub fn get(&self, selector: &Selector) -> Option<&Declarations> {
        self.rules.get(selector)
    }

    /// Value of `property` on a CSS selector.
    pub fn value(&self, selector: &str, property: &str) -> Option<&str> {
        self.rules
            .get(&Selector::css(selector))
            .and_then(|d| d.get(property))
            .map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Selector, &Declarations)> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// One (bucket, selector, property) triple written by the builder.
pub type Triple = (BucketName, Selector, String);

/// The full set of buckets for one stylesheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleBuckets {
    buckets: BTreeMap<BucketName, CssBucket>,
}

impl StyleBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bucket(&self, name: BucketName) -> Option<&CssBucket> {
        self.buckets.get(&name).filter(|b| !b.is_empty())
    }

    pub fn bucket_mut(&mut self, name: BucketName) -> &mut CssBucket {
        self.buckets.entry(name).or_default()
    }

    /// Shorthand for a declaration on a CSS selector.
    pub fn add(
        &mut self,
        name: BucketName,
        selector: &str,
        property: &str,
        value: impl Into<String>,
    ) {
        self.bucket_mut(name)
            .declare(Selector::css(selector), property, value);
    }

    /// Several declarations on one selector, in order.
    pub fn add_all(&mut self, name: BucketName, selector: &str, declarations: &[(&str, &str)]) {
        let bucket = self.bucket_mut(name);
        for (property, value) in declarations {
            bucket.declare(Selector::css(selector), property, *value);
        }
    }

    /// An `@font-face` block in the main bucket.
    pub fn add_font_face(&mut self, slot: u8, declarations: &[(&str, String)]) {
        let bucket = self.bucket_mut(BucketName::Main);
        for (property, value) in declarations {
            bucket.declare(Selector::FontFace(slot), property, value.clone());
        }
    }

    /// Non-empty buckets in serialization order.
    pub fn iter(&self) -> impl Iterator<Item = (BucketName, &CssBucket)> {
        self.buckets
            .iter()
            .filter(|(_, b)| !b.is_empty())
            .map(|(name, b)| (*name, b))
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.values().all(CssBucket::is_empty)
    }

    /// Every triple written so far, in serialization order.
    pub fn triples(&self) -> Vec<Triple> {
        self.iter()
            .flat_map(|(name, bucket)| {
                bucket.iter().flat_map(move |(selector, decls)| {
                    decls
                        .keys()
                        .map(move |property| (name, selector.clone(), property.clone()))
                })
            })
            .collect()
    }
}
