//! Artwork records shared by every component of the gallery.
//!
//! Records are supplied by the caller (usually deserialized from a JSON
//! catalog) and never mutated for the lifetime of a gallery session.

use crate::i18n::Locale;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Identifier of an artwork, unique within a [`Catalog`](crate::catalog::Catalog).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtworkId(String);

impl ArtworkId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Lets id-keyed maps be queried with a plain `&str`.
impl Borrow<str> for ArtworkId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ArtworkId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl PartialEq<str> for ArtworkId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ArtworkId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A single artwork as shown in the grid and the lightbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArtworkRecord {
    pub id: ArtworkId,
    #[serde(default)]
    pub title: String,
    /// Display year, kept as text ("1998", "c. 1650", "2019–2021").
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub medium: String,
    #[serde(default)]
    pub dimensions: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Image resource reference (URL or site-relative path).
    pub image: String,
    #[serde(default, skip_serializing_if = "Annotation::is_plain")]
    pub annotation: Annotation,
}

/// Domain-specific annotation attached to an artwork.
///
/// A closed set: plain artworks carry nothing extra, scripture artworks carry
/// the excerpt in each supported language plus its citation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Annotation {
    #[default]
    Plain,
    Scripture {
        /// Book the passage belongs to, used for canonical grouping.
        book: String,
        #[serde(default)]
        section: String,
        scriptures: Scriptures,
        /// Citation shown under the excerpt, e.g. "John 1:1".
        #[serde(default, skip_serializing_if = "Option::is_none")]
        citation: Option<String>,
    },
}

impl Annotation {
    pub fn is_plain(&self) -> bool {
        matches!(self, Annotation::Plain)
    }
}

/// Scripture excerpt per language.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scriptures {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zh: Option<String>,
}

impl Scriptures {
    /// Pick the excerpt for `locale`: Chinese locales read `zh`, everything
    /// else reads `en`. A missing translation yields the empty string.
    pub fn for_locale(&self, locale: &Locale) -> &str {
        let text = if locale.is_chinese() {
            self.zh.as_deref()
        } else {
            self.en.as_deref()
        };
        text.unwrap_or("")
    }
}

/// Scripture excerpt and citation resolved for one locale.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalizedScripture<'a> {
    pub excerpt: &'a str,
    pub citation: Option<&'a str>,
}

impl ArtworkRecord {
    /// The scripture block to display for this artwork, if it has one and the
    /// excerpt for `locale` is non-empty.
    pub fn scripture(&self, locale: &Locale) -> Option<LocalizedScripture<'_>> {
        match &self.annotation {
            Annotation::Plain => None,
            Annotation::Scripture {
                scriptures,
                citation,
                ..
            } => {
                let excerpt = scriptures.for_locale(locale);
                (!excerpt.is_empty()).then(|| LocalizedScripture {
                    excerpt,
                    citation: citation.as_deref(),
                })
            }
        }
    }

    /// Book name for scripture artworks.
    pub fn book(&self) -> Option<&str> {
        match &self.annotation {
            Annotation::Scripture { book, .. } => Some(book),
            Annotation::Plain => None,
        }
    }
}
