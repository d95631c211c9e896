//! Gallery URLs: a path plus ordered query parameters.
//!
//! The deep link lives in a single query parameter, [`SELECTION_PARAM`]
//! (`?image=<artworkId>`). Other parameters are carried through untouched and
//! keep their order, so removing the selection from `/gallery?lang=zh&image=a`
//! yields `/gallery?lang=zh`, and from `/gallery?image=a` yields `/gallery`.
//!
//! Locations are resolved with the `url` crate against a placeholder origin,
//! so relative input and dot segments normalize the way a browser would.
//! Query pairs are read with form decoding (`+` is a space, `%XX` is UTF-8)
//! and written with everything outside the unreserved set percent-encoded.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::fmt;
use url::{Url, form_urlencoded};

/// Characters escaped in query keys and values: all but RFC 3986 unreserved.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Origin that site-relative locations are resolved against.
const PLACEHOLDER_ORIGIN: &str = "http://gallery.invalid/";

/// Query parameter carrying the selected artwork id.
pub const SELECTION_PARAM: &str = "image";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GalleryUrl {
    path: String,
    query: Vec<(String, String)>,
}

impl GalleryUrl {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    /// Parse a site-relative location such as `/gallery?image=a#top`.
    /// The fragment, if any, is discarded.
    pub fn parse(input: &str) -> Self {
        let resolved = Url::parse(PLACEHOLDER_ORIGIN).and_then(|origin| origin.join(input));
        let url = match resolved {
            Ok(url) => url,
            Err(err) => {
                tracing::debug!(input, error = %err, "Unparseable location; using it as a path");
                return Self::new(input);
            }
        };
        let query = url
            .query()
            .map(|query| {
                form_urlencoded::parse(query.as_bytes())
                    .map(|(k, v)| (k.into_owned(), v.into_owned()))
                    .collect()
            })
            .unwrap_or_default();
        Self {
            path: url.path().to_string(),
            query,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// First value of `key`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_param(&self, key: &str) -> bool {
        self.query.iter().any(|(k, _)| k == key)
    }

    /// Set `key` to `value`, replacing the first occurrence in place and
    /// dropping any later duplicates. Appends if absent.
    pub fn with_param(&self, key: &str, value: &str) -> Self {
        let mut query = Vec::with_capacity(self.query.len() + 1);
        let mut placed = false;
        for (k, v) in &self.query {
            if k == key {
                if !placed {
                    query.push((k.clone(), value.to_string()));
                    placed = true;
                }
            } else {
                query.push((k.clone(), v.clone()));
            }
        }
        if !placed {
            query.push((key.to_string(), value.to_string()));
        }
        Self {
            path: self.path.clone(),
            query,
        }
    }

    /// Remove every occurrence of `key`.
    pub fn without_param(&self, key: &str) -> Self {
        Self {
            path: self.path.clone(),
            query: self
                .query
                .iter()
                .filter(|(k, _)| k != key)
                .cloned()
                .collect(),
        }
    }

    /// The raw selection parameter, if present and non-empty.
    pub fn selection(&self) -> Option<&str> {
        self.param(SELECTION_PARAM).filter(|v| !v.is_empty())
    }

    pub fn with_selection(&self, id: &str) -> Self {
        self.with_param(SELECTION_PARAM, id)
    }

    pub fn without_selection(&self) -> Self {
        self.without_param(SELECTION_PARAM)
    }
}

impl fmt::Display for GalleryUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        for (i, (k, v)) in self.query.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(
                f,
                "{sep}{}={}",
                utf8_percent_encode(k, QUERY_COMPONENT),
                utf8_percent_encode(v, QUERY_COMPONENT)
            )?;
        }
        Ok(())
    }
}

/// Canonical share link for an artwork: `{origin}{base_path}?image=<id>`.
pub fn share_link(origin: &str, base_path: &str, id: &str) -> String {
    let url = GalleryUrl::new(base_path).with_selection(id);
    format!("{}{url}", origin.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_path_only() {
        let url = GalleryUrl::parse("/gallery");
        assert_eq!(url.path(), "/gallery");
        assert!(url.selection().is_none());
        assert_eq!(url.to_string(), "/gallery");
    }

    #[test]
    fn parse_selection() {
        let url = GalleryUrl::parse("/gallery?image=abc");
        assert_eq!(url.selection(), Some("abc"));
    }

    #[test]
    fn empty_selection_is_absent() {
        let url = GalleryUrl::parse("/gallery?image=");
        assert!(url.has_param("image"));
        assert!(url.selection().is_none());
    }

    #[test]
    fn fragment_discarded() {
        let url = GalleryUrl::parse("/gallery?image=a#top");
        assert_eq!(url.selection(), Some("a"));
    }

    #[test]
    fn with_selection_replaces_in_place() {
        let url = GalleryUrl::parse("/gallery?image=a&lang=zh&image=b");
        assert_eq!(url.with_selection("c").to_string(), "/gallery?image=c&lang=zh");
    }

    #[test]
    fn with_selection_appends() {
        let url = GalleryUrl::parse("/gallery?lang=zh");
        assert_eq!(url.with_selection("c").to_string(), "/gallery?lang=zh&image=c");
    }

    #[test]
    fn removing_last_param_leaves_bare_path() {
        let url = GalleryUrl::parse("/gallery?image=a");
        assert_eq!(url.without_selection().to_string(), "/gallery");
    }

    #[test]
    fn removing_keeps_other_params() {
        let url = GalleryUrl::parse("/gallery?lang=zh&image=a");
        assert_eq!(url.without_selection().to_string(), "/gallery?lang=zh");
    }

    #[test]
    fn encoding_and_decoding() {
        let url = GalleryUrl::new("/gallery").with_selection("a b/ü");
        let text = url.to_string();
        assert_eq!(text, "/gallery?image=a%20b%2F%C3%BC");
        assert_eq!(GalleryUrl::parse(&text).selection(), Some("a b/ü"));
        assert_eq!(GalleryUrl::parse("/g?image=a+b").selection(), Some("a b"));
    }

    #[test]
    fn malformed_escape_kept_literally() {
        assert_eq!(GalleryUrl::parse("/g?image=50%").selection(), Some("50%"));
        assert_eq!(GalleryUrl::parse("/g?image=%zz").selection(), Some("%zz"));
    }

    #[test]
    fn location_resolves_like_a_browser() {
        let url = GalleryUrl::parse("/studio/../gallery?image=a%2Bb&lang=zh#top");
        assert_eq!(url.path(), "/gallery");
        assert_eq!(url.selection(), Some("a+b"));
        assert_eq!(url.to_string(), "/gallery?image=a%2Bb&lang=zh");
    }

    #[test]
    fn share_link_shape() {
        assert_eq!(share_link("", "/gallery", "p1"), "/gallery?image=p1");
        assert_eq!(
            share_link("https://studio.example/", "/gallery", "p1"),
            "https://studio.example/gallery?image=p1"
        );
    }
}
