//! Gallery configuration module.
//!
//! Handles loading, validating, and merging `gallery.toml`. Stock defaults are
//! the base layer; a user file overrides only the keys it names.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! base_path = "/gallery"    # Gallery path used in share links
//! origin = ""               # Origin prefix for share links, e.g. "https://studio.example"
//! locale = "en"             # Active locale (drives scripture language)
//!
//! [reveal]
//! mode = "scroll"           # "button" (load-more intent) or "scroll" (sentinel proximity)
//! initial_limit = 8         # Items visible before any load-more
//! page_size = 8             # Items revealed per advance
//! threshold = 0.0           # Sentinel visibility ratio that must be exceeded
//!
//! [download]
//! extension = "jpg"         # Extension of the saved file
//! mime = "image/jpeg"       # MIME type of the local object reference
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [reveal]
//! mode = "button"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::i18n::Locale;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
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

/// Gallery configuration loaded from `gallery.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Path of the gallery page; share links are `{origin}{base_path}?image=<id>`.
    pub base_path: String,
    /// Scheme and host prepended to share links. Empty keeps links site-relative.
    pub origin: String,
    /// Active locale.
    pub locale: Locale,
    /// Grid paging behavior.
    pub reveal: RevealConfig,
    /// Gated download settings.
    pub download: DownloadConfig,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            base_path: "/gallery".to_string(),
            origin: String::new(),
            locale: Locale::default(),
            reveal: RevealConfig::default(),
            download: DownloadConfig::default(),
        }
    }
}

impl GalleryConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.base_path.starts_with('/') {
            return Err(ConfigError::Validation(
                "base_path must start with '/'".into(),
            ));
        }
        if self.reveal.initial_limit == 0 {
            return Err(ConfigError::Validation(
                "reveal.initial_limit must be at least 1".into(),
            ));
        }
        if self.reveal.page_size == 0 {
            return Err(ConfigError::Validation(
                "reveal.page_size must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(ConfigError::Validation(
                "reveal.threshold must be between 0.0 and 1.0".into(),
            ));
        }
        if self.download.extension.trim().is_empty() {
            return Err(ConfigError::Validation(
                "download.extension must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// How the grid reveals more items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealMode {
    /// A visible "load more" control emits the advance intent.
    Button,
    /// A sentinel below the grid advances automatically when it scrolls into view.
    Scroll,
}

/// Grid paging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    pub mode: RevealMode,
    pub initial_limit: usize,
    pub page_size: usize,
    /// Sentinel visibility ratio that must be exceeded to advance. `0.0` means
    /// any overlap with the viewport.
    pub threshold: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            mode: RevealMode::Scroll,
            initial_limit: 8,
            page_size: 8,
            threshold: 0.0,
        }
    }
}

/// Download settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DownloadConfig {
    pub extension: String,
    pub mime: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            extension: "jpg".to_string(),
            mime: "image/jpeg".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(GalleryConfig::default()).expect("default config must serialize")
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

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<GalleryConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: GalleryConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from the given `gallery.toml` path.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result. A missing file yields the stock defaults.
pub fn load_config(path: &Path) -> Result<GalleryConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `gallery.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Studio Gallery Configuration
# ============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Path of the gallery page. Share links point here with ?image=<id>.
base_path = "/gallery"

# Scheme and host prepended to share links, e.g. "https://studio.example".
# Leave empty for site-relative links.
origin = ""

# Active locale. Chinese locales (any "zh" subtag) show the Chinese
# scripture excerpt on annotated artworks.
locale = "en"

# ---------------------------------------------------------------------------
# Grid paging
# ---------------------------------------------------------------------------
[reveal]
# "button": a load-more control reveals the next page.
# "scroll": the next page is revealed when the end of the grid scrolls into view.
mode = "scroll"

# Number of artworks shown before any paging.
initial_limit = 8

# Number of artworks revealed per page.
page_size = 8

# Visibility ratio of the end-of-grid sentinel that triggers paging.
# 0.0 means any overlap with the viewport.
threshold = 0.0

# ---------------------------------------------------------------------------
# Downloads
# ---------------------------------------------------------------------------
[download]
# Extension of the saved file; the name is derived from the artwork title.
extension = "jpg"

# MIME type attached to the local object reference.
mime = "image/jpeg"
"##
}
