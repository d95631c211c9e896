//! The artwork catalog: a fixed, ordered collection for one gallery session.
//!
//! Order is significant (it is the grid order and the carousel order) and
//! identifiers are unique. The catalog is immutable once built; replacing it
//! means building a new one and handing it to
//! [`Gallery::replace_catalog`](crate::gallery::Gallery::replace_catalog).
//!
//! ## Source format
//!
//! A JSON array of artwork records:
//!
//! ```json
//! [
//!   { "id": "dawn", "title": "Dawn", "year": "2021", "image": "/art/dawn.jpg" },
//!   { "id": "creation", "title": "Creation", "image": "/art/creation.jpg",
//!     "annotation": { "kind": "scripture", "book": "Genesis",
//!                     "scriptures": { "en": "In the beginning", "zh": "起初" },
//!                     "citation": "Genesis 1:1" } }
//! ]
//! ```

use crate::types::{ArtworkId, ArtworkRecord};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Duplicate artwork id: {0}")]
    DuplicateId(ArtworkId),
    #[error("Artwork at position {0} has an empty id")]
    EmptyId(usize),
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<ArtworkRecord>,
    index: HashMap<ArtworkId, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting empty and duplicate ids.
    pub fn new(records: Vec<ArtworkRecord>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(records.len());
        for (pos, record) in records.iter().enumerate() {
            if record.id.as_str().trim().is_empty() {
                return Err(CatalogError::EmptyId(pos));
            }
            if index.insert(record.id.clone(), pos).is_some() {
                return Err(CatalogError::DuplicateId(record.id.clone()));
            }
        }
        Ok(Self { records, index })
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<ArtworkRecord> = serde_json::from_str(json)?;
        Self::new(records)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ArtworkRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&ArtworkRecord> {
        self.records.get(index)
    }

    /// Zero-based position of `id`, if it resolves.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Resolve `id` to its record and position.
    pub fn find(&self, id: &str) -> Option<(&ArtworkRecord, usize)> {
        let pos = self.position(id)?;
        Some((&self.records[pos], pos))
    }

    /// The first `count` records (clamped to the catalog length).
    pub fn prefix(&self, count: usize) -> &[ArtworkRecord] {
        &self.records[..count.min(self.records.len())]
    }

    /// Scripture artworks grouped by book, groups ordered by `book_order`.
    ///
    /// Books missing from `book_order` are left out, as are plain artworks.
    /// Within a group, catalog order is kept.
    pub fn grouped_by_book<'a>(
        &'a self,
        book_order: &[&'a str],
    ) -> Vec<(&'a str, Vec<&'a ArtworkRecord>)> {
        let mut groups: HashMap<&str, Vec<&ArtworkRecord>> = HashMap::new();
        for record in &self.records {
            if let Some(book) = record.book() {
                groups.entry(book).or_default().push(record);
            }
        }
        book_order
            .iter()
            .filter_map(|book| groups.remove(book).map(|records| (*book, records)))
            .collect()
    }
}

/// The 66 books in canonical order, Genesis to Revelation.
pub const BOOK_ORDER: &[&str] = &[
    "Genesis", "Exodus", "Leviticus", "Numbers", "Deuteronomy", "Joshua", "Judges", "Ruth",
    "1 Samuel", "2 Samuel", "1 Kings", "2 Kings", "1 Chronicles", "2 Chronicles", "Ezra",
    "Nehemiah", "Esther", "Job", "Psalms", "Proverbs", "Ecclesiastes", "Song of Solomon", "Isaiah",
    "Jeremiah", "Lamentations", "Ezekiel", "Daniel", "Hosea", "Joel", "Amos", "Obadiah", "Jonah",
    "Micah", "Nahum", "Habakkuk", "Zephaniah", "Haggai", "Zechariah", "Malachi", "Matthew", "Mark",
    "Luke", "John", "Acts", "Romans", "1 Corinthians", "2 Corinthians", "Galatians", "Ephesians",
    "Philippians", "Colossians", "1 Thessalonians", "2 Thessalonians", "1 Timothy", "2 Timothy",
    "Titus", "Philemon", "Hebrews", "James", "1 Peter", "2 Peter", "1 John", "2 John", "3 John",
    "Jude", "Revelation",
];

/// Load a catalog from a JSON file.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let content = fs::read_to_string(path)?;
    let catalog = Catalog::from_json(&content)?;
    tracing::info!(count = catalog.len(), path = %path.display(), "Loaded artwork catalog");
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{artwork, catalog_of, scripture_artwork};
    use tempfile::TempDir;

    #[test]
    fn find_returns_record_and_position() {
        let catalog = catalog_of(&["a", "b", "c"]);
        let (record, pos) = catalog.find("b").unwrap();
        assert_eq!(record.id, "b");
        assert_eq!(pos, 1);
    }

    #[test]
    fn unknown_id_does_not_resolve() {
        let catalog = catalog_of(&["a"]);
        assert!(catalog.find("zzz").is_none());
        assert!(!catalog.contains("zzz"));
    }

    #[test]
    fn duplicate_id_rejected() {
        let result = Catalog::new(vec![artwork("a"), artwork("b"), artwork("a")]);
        assert!(matches!(result, Err(CatalogError::DuplicateId(id)) if id == "a"));
    }

    #[test]
    fn empty_id_rejected() {
        let result = Catalog::new(vec![artwork("a"), artwork(" ")]);
        assert!(matches!(result, Err(CatalogError::EmptyId(1))));
    }

    #[test]
    fn prefix_is_clamped() {
        let catalog = catalog_of(&["a", "b", "c"]);
        assert_eq!(catalog.prefix(2).len(), 2);
        assert_eq!(catalog.prefix(10).len(), 3);
        assert!(Catalog::default().prefix(4).is_empty());
    }

    #[test]
    fn grouped_by_book_follows_canonical_order() {
        let catalog = Catalog::new(vec![
            scripture_artwork("j1", "John", "In the beginning was the Word", "太初有道"),
            artwork("plain"),
            scripture_artwork("g1", "Genesis", "In the beginning", "起初"),
            scripture_artwork("j2", "John", "Jesus wept", "耶穌哭了"),
            scripture_artwork("x1", "Apocrypha", "", ""),
        ])
        .unwrap();

        let groups = catalog.grouped_by_book(&["Genesis", "Exodus", "John"]);
        let books: Vec<&str> = groups.iter().map(|(b, _)| *b).collect();
        assert_eq!(books, vec!["Genesis", "John"]);
        let john: Vec<&str> = groups[1].1.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(john, vec!["j1", "j2"]);
    }

    #[test]
    fn load_catalog_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("catalog.json");
        fs::write(
            &path,
            r#"[
                { "id": "dawn", "title": "Dawn", "image": "/art/dawn.jpg" },
                { "id": "dusk", "title": "Dusk", "image": "/art/dusk.jpg", "location": "Taipei" }
            ]"#,
        )
        .unwrap();
        let catalog = load_catalog(&path).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(1).unwrap().location.as_deref(), Some("Taipei"));
    }

    #[test]
    fn load_catalog_invalid_json_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("catalog.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_catalog(&path), Err(CatalogError::Json(_))));
    }
}
