//! Header banner validation.
//!
//! The banner is submitted as a URL inside the blog's public folder. It is
//! only kept when the file exists and is a readable image; its width is then
//! stored as a percentage of the page width so the stylesheet can size the
//! banner without knowing pixels.
//!
//! A sibling file named `<stem>-2x.<ext>` is picked up as the high-density
//! variant when it exists and is readable too.

use crate::config::BlogConfig;
use crate::escape::{sanitize_url, strip_host_url};
use crate::imaging::ImageInspector;
use crate::store::{DeclaredType, Namespace, SettingValue, SettingsStore, StoreError};
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

pub const HEADER_IMAGE_ID: &str = "header_image";
pub const HEADER_IMAGE_2X_ID: &str = "header_image2x";

const LABEL: &str = "settings-header-image-title";

/// Root font size the page width is expressed against, in pixels.
pub const BASE_FONT_PX: i64 = 16;

/// Accepted banner as stored in the `header_image` array setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderImage {
    pub url: String,
    /// Rendered width as a percentage of the page width, at most 100.
    pub width: u32,
}

impl HeaderImage {
    pub fn from_setting(value: &SettingValue) -> Option<Self> {
        let map = value.as_array()?;
        let url = map.get("url")?.as_str()?.to_string();
        let width = map
            .get("width")
            .and_then(SettingValue::as_integer)
            .and_then(|w| u32::try_from(w).ok())?;
        Some(Self { url, width })
    }

    pub fn to_setting(&self) -> SettingValue {
        let mut map = BTreeMap::new();
        map.insert("url".to_string(), SettingValue::String(self.url.clone()));
        map.insert("width".to_string(), SettingValue::Integer(i64::from(self.width)));
        SettingValue::Array(map)
    }
}

/// Banner width as a percentage of a page `page_width_em` wide.
pub fn scale_percent(image_width: u32, page_width_em: i64) -> u32 {
    let page_px = page_width_em.max(1) * BASE_FONT_PX;
    let width = i64::from(image_width);
    if width > page_px {
        100
    } else {
        (width * 100 / page_px) as u32
    }
}

/// Map a public URL to the file it designates under the public folder.
///
/// Returns `None` for URLs that climb out of the folder.
pub fn public_file(blog: &BlogConfig, url: &str) -> Option<PathBuf> {
    let prefix = format!("{}/", blog.public_url.trim_end_matches('/'));
    let relative = url.strip_prefix(&prefix).unwrap_or(url);
    let relative = Path::new(relative.trim_start_matches('/'));
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
    {
        return None;
    }
    Some(blog.public_path.join(relative))
}

/// `dir/stem-2x.ext` for `dir/stem.ext`.
fn double_density_name(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem}-2x.{ext}"),
        _ => format!("{file_name}-2x"),
    }
}

/// URL of the high-density variant of `url`.
fn double_density_url(url: &str) -> String {
    match url.rsplit_once('/') {
        Some((dir, file)) => format!("{dir}/{}", double_density_name(file)),
        None => double_density_name(url),
    }
}

/// Validate the submitted banner URL and store or drop the image settings.
///
/// Returns the accepted banner so the caller can size it in the stylesheet.
/// Unusable images are never an error: both settings are removed instead.
pub fn apply<S: SettingsStore + ?Sized, I: ImageInspector + ?Sized>(
    ns: &mut Namespace<'_, S>,
    inspector: &I,
    blog: &BlogConfig,
    submitted_url: Option<&str>,
    page_width_em: i64,
) -> Result<Option<HeaderImage>, StoreError> {
    let raw = submitted_url.map(str::trim).unwrap_or("");
    if raw.is_empty() {
        drop_both(ns)?;
        return Ok(None);
    }

    let url = strip_host_url(raw);
    let Some(path) = public_file(blog, url).filter(|p| inspector.exists(p)) else {
        log::debug!("header image {raw:?} is not a file in the public folder");
        drop_both(ns)?;
        return Ok(None);
    };
    let dims = match inspector.dimensions(&path) {
        Ok(dims) => dims,
        Err(e) => {
            log::warn!("header image {} is not usable: {e}", path.display());
            drop_both(ns)?;
            return Ok(None);
        }
    };

    let image = HeaderImage {
        url: sanitize_url(url),
        width: scale_percent(dims.width, page_width_em),
    };
    ns.put(HEADER_IMAGE_ID, image.to_setting(), DeclaredType::Array, LABEL)?;
    log::info!("header image {} accepted at {}%", image.url, image.width);

    let path_2x = path
        .file_name()
        .and_then(|name| name.to_str())
        .map(|name| path.with_file_name(double_density_name(name)));
    match path_2x.filter(|p| inspector.exists(p) && inspector.dimensions(p).is_ok()) {
        Some(_) => {
            let url_2x = sanitize_url(&double_density_url(url));
            ns.put(HEADER_IMAGE_2X_ID, SettingValue::String(url_2x), DeclaredType::String, LABEL)?;
        }
        None => ns.remove(HEADER_IMAGE_2X_ID)?,
    }

    Ok(Some(image))
}

fn drop_both<S: SettingsStore + ?Sized>(ns: &mut Namespace<'_, S>) -> Result<(), StoreError> {
    ns.remove(HEADER_IMAGE_ID)?;
    ns.remove(HEADER_IMAGE_2X_ID)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::MockInspector;
    use crate::store::MemoryStore;
    use crate::test_helpers::{NS, blog_config};

    fn run(
        store: &mut MemoryStore,
        inspector: &MockInspector,
        url: Option<&str>,
        page_width_em: i64,
    ) -> Option<HeaderImage> {
        let blog = blog_config("/srv/blog/public");
        let mut ns = Namespace::new(store, NS);
        apply(&mut ns, inspector, &blog, url, page_width_em).unwrap()
    }

    #[test]
    fn scale_is_percentage_of_page_width() {
        assert_eq!(scale_percent(240, 30), 50);
        assert_eq!(scale_percent(480, 30), 100);
        assert_eq!(scale_percent(1000, 30), 100);
        assert_eq!(scale_percent(100, 30), 20);
        assert_eq!(scale_percent(350, 35), 62);
    }

    #[test]
    fn public_url_maps_into_public_path() {
        let blog = blog_config("/srv/blog/public");
        assert_eq!(
            public_file(&blog, "/public/img/banner.png"),
            Some(PathBuf::from("/srv/blog/public/img/banner.png"))
        );
        assert_eq!(public_file(&blog, "/public/../secret.png"), None);
    }

    #[test]
    fn double_density_names() {
        assert_eq!(double_density_name("banner.png"), "banner-2x.png");
        assert_eq!(double_density_name("banner"), "banner-2x");
        assert_eq!(double_density_url("/public/a/b.jpg"), "/public/a/b-2x.jpg");
    }

    #[test]
    fn absent_or_empty_url_drops_both_settings() {
        let mut store = MemoryStore::new();
        store
            .put(
                NS,
                HEADER_IMAGE_2X_ID,
                SettingValue::String("/x".into()),
                DeclaredType::String,
                "",
            )
            .unwrap();
        let inspector = MockInspector::new();

        assert_eq!(run(&mut store, &inspector, None, 30), None);
        assert_eq!(run(&mut store, &inspector, Some("  "), 30), None);
        assert!(store.ids(NS).is_empty());
    }

    #[test]
    fn valid_banner_is_stored_with_scale() {
        let mut store = MemoryStore::new();
        let inspector = MockInspector::new().with_image("/srv/blog/public/banner.png", 240, 80);

        let image = run(
            &mut store,
            &inspector,
            Some("https://blog.example.org/public/banner.png"),
            30,
        )
        .unwrap();
        assert_eq!(image.url, "/public/banner.png");
        assert_eq!(image.width, 50);

        let stored = store.get(NS, HEADER_IMAGE_ID).unwrap().unwrap();
        assert_eq!(HeaderImage::from_setting(&stored), Some(image));
        assert_eq!(store.get(NS, HEADER_IMAGE_2X_ID).unwrap(), None);
    }

    #[test]
    fn double_density_variant_is_stored_when_readable() {
        let mut store = MemoryStore::new();
        let inspector = MockInspector::new()
            .with_image("/srv/blog/public/banner.png", 960, 200)
            .with_image("/srv/blog/public/banner-2x.png", 1920, 400);

        let image = run(&mut store, &inspector, Some("/public/banner.png"), 30).unwrap();
        assert_eq!(image.width, 100);
        assert_eq!(
            store.get(NS, HEADER_IMAGE_2X_ID).unwrap(),
            Some(SettingValue::String("/public/banner-2x.png".into()))
        );
    }

    #[test]
    fn unreadable_double_density_variant_is_removed() {
        let mut store = MemoryStore::new();
        store
            .put(
                NS,
                HEADER_IMAGE_2X_ID,
                SettingValue::String("/old".into()),
                DeclaredType::String,
                "",
            )
            .unwrap();
        let inspector = MockInspector::new()
            .with_image("/srv/blog/public/banner.png", 960, 200)
            .with_broken("/srv/blog/public/banner-2x.png");

        assert!(run(&mut store, &inspector, Some("/public/banner.png"), 30).is_some());
        assert_eq!(store.get(NS, HEADER_IMAGE_2X_ID).unwrap(), None);
    }

    #[test]
    fn missing_or_broken_banner_drops_both_settings() {
        let mut store = MemoryStore::new();
        let inspector = MockInspector::new().with_broken("/srv/blog/public/broken.png");

        assert_eq!(run(&mut store, &inspector, Some("/public/missing.png"), 30), None);
        assert_eq!(run(&mut store, &inspector, Some("/public/broken.png"), 30), None);
        assert!(store.ids(NS).is_empty());
    }

    #[test]
    fn stored_url_is_sanitized() {
        let mut store = MemoryStore::new();
        let inspector = MockInspector::new().with_image("/srv/blog/public/my banner.png", 100, 20);

        let image = run(&mut store, &inspector, Some("/public/my banner.png"), 40).unwrap();
        assert_eq!(image.url, "/public/my%20banner.png");
        assert_eq!(image.width, 15);
    }

    #[test]
    fn from_setting_rejects_malformed_arrays() {
        assert_eq!(HeaderImage::from_setting(&SettingValue::String("x".into())), None);
        let mut map = BTreeMap::new();
        map.insert("url".to_string(), SettingValue::String("/a.png".into()));
        assert_eq!(HeaderImage::from_setting(&SettingValue::Array(map.clone())), None);
        map.insert("width".to_string(), SettingValue::Integer(-5));
        assert_eq!(HeaderImage::from_setting(&SettingValue::Array(map)), None);
    }
}
