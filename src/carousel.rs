//! Lightbox carousel: which artwork is in focus while the lightbox is open.
//!
//! The carousel runs over the full catalog, not just the revealed grid, and
//! loops at both ends. It is seeded at the selected artwork's position and
//! exists only while something is selected; closing the lightbox drops it.
//!
//! `initialized` distinguishes "about to show the seeded artwork" from "the
//! seeded artwork is on screen". It flips once, when the renderer reports the
//! seeded slide as presented or its image as loaded.

use crate::catalog::Catalog;
use crate::types::{ArtworkId, ArtworkRecord};

#[derive(Debug, Clone, PartialEq)]
pub struct Carousel {
    len: usize,
    seed: usize,
    position: usize,
    focused: ArtworkId,
    initialized: bool,
}

impl Carousel {
    /// Open a carousel seeded at the artwork with `id`. `None` if the id does
    /// not resolve.
    pub fn open(catalog: &Catalog, id: &str) -> Option<Self> {
        let (record, position) = catalog.find(id)?;
        Some(Self {
            len: catalog.len(),
            seed: position,
            position,
            focused: record.id.clone(),
            initialized: false,
        })
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn seed(&self) -> usize {
        self.seed
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn focused_id(&self) -> &ArtworkId {
        &self.focused
    }

    pub fn focused<'a>(&self, catalog: &'a Catalog) -> Option<&'a ArtworkRecord> {
        catalog.get(self.position)
    }

    pub fn initialized(&self) -> bool {
        self.initialized
    }

    pub fn next(&mut self, catalog: &Catalog) {
        let next = if self.position + 1 >= self.len { 0 } else { self.position + 1 };
        self.move_to(catalog, next);
    }

    pub fn prev(&mut self, catalog: &Catalog) {
        let prev = if self.position == 0 { self.len - 1 } else { self.position - 1 };
        self.move_to(catalog, prev);
    }

    /// Jump to `index`. Out-of-range indices are ignored.
    pub fn seek(&mut self, catalog: &Catalog, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        self.move_to(catalog, index);
        true
    }

    /// The renderer presented the slide at `index`.
    pub fn presented(&mut self, index: usize) {
        if index == self.seed {
            self.initialized = true;
        }
    }

    /// The image for `id` finished loading.
    pub fn image_loaded(&mut self, catalog: &Catalog, id: &str) {
        if catalog.position(id) == Some(self.seed) {
            self.initialized = true;
        }
    }

    fn move_to(&mut self, catalog: &Catalog, index: usize) {
        if let Some(record) = catalog.get(index) {
            self.position = index;
            self.focused = record.id.clone();
        }
    }
}
