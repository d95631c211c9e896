//! The currently selected artwork.
//!
//! Selection holds an id, never a record, so it stays valid across renders.
//! An id is only ever stored if it resolves in the catalog; everything else is
//! silently ignored. "Nothing selected" is an ordinary state.

use crate::catalog::Catalog;
use crate::types::{ArtworkId, ArtworkRecord};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<ArtworkId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `id` if it resolves in `catalog`. Returns whether the selection
    /// changed.
    pub fn select(&mut self, catalog: &Catalog, id: &str) -> bool {
        if !catalog.contains(id) || self.is(id) {
            return false;
        }
        self.selected = Some(ArtworkId::new(id));
        true
    }

    /// Clear the selection. Returns whether something was selected.
    pub fn clear(&mut self) -> bool {
        self.selected.take().is_some()
    }

    pub fn id(&self) -> Option<&ArtworkId> {
        self.selected.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_none()
    }

    pub fn is(&self, id: &str) -> bool {
        self.selected.as_ref().is_some_and(|s| s == id)
    }

    /// The selected record and its zero-based catalog position.
    pub fn current<'a>(&self, catalog: &'a Catalog) -> Option<(&'a ArtworkRecord, usize)> {
        catalog.find(self.selected.as_ref()?.as_str())
    }

    /// Drop the selection if it no longer resolves in `catalog`. Returns
    /// whether it was dropped.
    pub fn retain_valid(&mut self, catalog: &Catalog) -> bool {
        match &self.selected {
            Some(id) if !catalog.contains(id.as_str()) => {
                self.selected = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{catalog_of, numbered_catalog};
    use proptest::prelude::*;

    #[test]
    fn select_then_current() {
        let catalog = catalog_of(&["a", "abc", "c", "d"]);
        let mut selection = Selection::new();
        assert!(selection.select(&catalog, "d"));
        let (record, index) = selection.current(&catalog).unwrap();
        assert_eq!(record.id, "d");
        assert_eq!(index, 3);
    }

    #[test]
    fn unknown_id_leaves_selection_unchanged() {
        let catalog = catalog_of(&["a", "b"]);
        let mut selection = Selection::new();
        selection.select(&catalog, "a");
        assert!(!selection.select(&catalog, "zzz"));
        assert!(selection.is("a"));
    }

    #[test]
    fn reselecting_same_id_is_not_a_change() {
        let catalog = catalog_of(&["a"]);
        let mut selection = Selection::new();
        assert!(selection.select(&catalog, "a"));
        assert!(!selection.select(&catalog, "a"));
    }

    #[test]
    fn clear_empties() {
        let catalog = catalog_of(&["a"]);
        let mut selection = Selection::new();
        assert!(!selection.clear());
        selection.select(&catalog, "a");
        assert!(selection.clear());
        assert!(selection.is_empty());
        assert!(selection.current(&catalog).is_none());
    }

    #[test]
    fn retain_valid_drops_lost_reference() {
        let mut selection = Selection::new();
        selection.select(&catalog_of(&["a", "b"]), "b");
        assert!(!selection.retain_valid(&catalog_of(&["b"])));
        assert!(selection.retain_valid(&catalog_of(&["a"])));
        assert!(selection.is_empty());
    }

    proptest! {
        #[test]
        fn select_resolves_to_catalog_position(len in 1usize..60, pick in 0usize..60) {
            let catalog = numbered_catalog(len);
            let index = pick % len;
            let id = format!("art-{index}");
            let mut selection = Selection::new();
            selection.select(&catalog, &id);
            let (record, position) = selection.current(&catalog).unwrap();
            prop_assert_eq!(record.id.as_str(), id.as_str());
            prop_assert_eq!(position, index);
        }

        #[test]
        fn unknown_select_is_noop(len in 1usize..30, pick in 0usize..30) {
            let catalog = numbered_catalog(len);
            let mut selection = Selection::new();
            selection.select(&catalog, &format!("art-{}", pick % len));
            let before = selection.clone();
            selection.select(&catalog, "missing");
            prop_assert_eq!(selection, before);
        }
    }
}
