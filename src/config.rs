//! Command-line configuration.
//!
//! The engine itself takes the blog locations and the settings namespace as
//! plain arguments; this module loads them for the command-line front end
//! from `origine-mini.toml`.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! namespace = "originemini"       # Settings namespace of the theme
//! store_path = "settings.json"    # JSON settings store
//!
//! [blog]
//! public_url = "/public"          # URL of the public folder
//! public_path = "public"          # Filesystem path of the public folder
//! themes_url = "/themes"          # URL of the themes folder
//! theme_dir = "origine-mini"      # Directory of this theme in themes_url
//! ```
//!
//! Config files are sparse: values not given keep their stock default.
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "origine-mini.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Settings namespace the theme stores its values in.
    pub namespace: String,
    /// Path of the JSON settings store.
    pub store_path: PathBuf,
    /// Locations of the blog's public folder and themes.
    pub blog: BlogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            namespace: "originemini".to_string(),
            store_path: PathBuf::from("settings.json"),
            blog: BlogConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.namespace.trim().is_empty() {
            return Err(ConfigError::Validation("namespace must not be empty".into()));
        }
        if self.blog.theme_dir.is_empty() || self.blog.theme_dir.contains('/') {
            return Err(ConfigError::Validation(
                "blog.theme_dir must be a single directory name".into(),
            ));
        }
        if !self.blog.public_url.starts_with('/') {
            return Err(ConfigError::Validation(
                "blog.public_url must be an absolute path".into(),
            ));
        }
        Ok(())
    }
}

/// Where the blog serves its public files and themes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BlogConfig {
    /// URL path of the public folder, e.g. `/public`.
    pub public_url: String,
    /// Filesystem path the public URL maps to.
    pub public_path: PathBuf,
    /// URL path of the themes folder.
    pub themes_url: String,
    /// Directory of this theme under `themes_url`.
    pub theme_dir: String,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            public_url: "/public".to_string(),
            public_path: PathBuf::from("public"),
            themes_url: "/themes".to_string(),
            theme_dir: "origine-mini".to_string(),
        }
    }
}

impl BlogConfig {
    /// Base URL of the bundled font files.
    pub fn font_assets_url(&self) -> String {
        format!(
            "{}/{}/fonts",
            self.themes_url.trim_end_matches('/'),
            self.theme_dir
        )
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock config as a `toml::Value::Table`: the base layer user
/// overrides are merged onto.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::from_str(stock_config_toml())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<AppConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: AppConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the config file at `path`.
///
/// A missing file yields the stock config; a file with invalid TOML,
/// unknown keys or invalid values is an error.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let overlay = if path.exists() {
        let content = fs::read_to_string(path)?;
        Some(toml::from_str(&content)?)
    } else {
        log::debug!("no config at {}, using defaults", path.display());
        None
    };
    resolve_config(stock_defaults_value()?, overlay)
}

/// Returns a fully-commented stock `origine-mini.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Origine Mini Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# Settings namespace the theme reads and writes.
namespace = "originemini"

# JSON file holding the blog settings.
store_path = "settings.json"

# ---------------------------------------------------------------------------
# Blog locations
# ---------------------------------------------------------------------------
[blog]
# URL of the public folder. Header images must live under it.
public_url = "/public"

# Filesystem path of the public folder.
public_path = "public"

# URL of the themes folder.
themes_url = "/themes"

# Directory of this theme inside the themes folder.
# Webfonts are served from <themes_url>/<theme_dir>/fonts.
theme_dir = "origine-mini"
"##
}
