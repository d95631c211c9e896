//! Display strings and the active locale.
//!
//! The gallery never hard-codes user-visible text: every string is looked up
//! by key through a [`Localizer`], with an English default supplied inline at
//! the call site. A missing key is not an error, it simply shows the default.
//!
//! ## Locale
//!
//! The locale configured in `gallery.toml` is the only source of truth for
//! locale-dependent behavior. It drives the scripture excerpt choice on
//! annotated artworks (see [`Scriptures::for_locale`](crate::types::Scriptures::for_locale)).
//!
//! ## String tables
//!
//! [`StringTable`] is a flat TOML file of `key = "value"` pairs:
//!
//! ```toml
//! "toast.linkCopied.title" = "Link copied"
//! "donate.title" = "支持艺术家"
//! ```

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum I18nError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// A language tag such as `en`, `en-US` or `zh-Hant-TW`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when any `-`-separated subtag is `zh`.
    pub fn is_chinese(&self) -> bool {
        self.0.split('-').any(|part| part.eq_ignore_ascii_case("zh"))
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::new("en")
    }
}

/// Lookup service for display strings.
pub trait Localizer {
    fn translate(&self, key: &str) -> Option<String>;
}

/// Translate `key`, falling back to the inline English `default`.
pub fn text(localizer: &dyn Localizer, key: &str, default: &str) -> String {
    localizer
        .translate(key)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Localizer with no strings; every lookup falls back to the default.
#[derive(Debug, Default, Clone, Copy)]
pub struct English;

impl Localizer for English {
    fn translate(&self, _key: &str) -> Option<String> {
        None
    }
}

/// Key/value strings loaded from a TOML file.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(transparent)]
pub struct StringTable {
    strings: HashMap<String, String>,
}

impl StringTable {
    pub fn from_toml(content: &str) -> Result<Self, I18nError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, I18nError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.strings.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl Localizer for StringTable {
    fn translate(&self, key: &str) -> Option<String> {
        self.strings.get(key).cloned()
    }
}
