//! Incremental reveal: how many catalog items the grid currently shows.
//!
//! The visible set is always a prefix of the catalog. It grows by whole pages,
//! never shrinks within a session, and saturates at the catalog length.
//!
//! Each controller runs in exactly one trigger mode:
//!
//! - [`RevealMode::Button`]: an explicit load-more intent advances one page.
//! - [`RevealMode::Scroll`]: a sentinel below the grid reports its visibility
//!   ratio; crossing the threshold advances one page. The controller arms
//!   itself only while the sentinel is out of view, so a sentinel that stays
//!   visible after an advance does not keep firing.
//!
//! Intents for the inactive mode are ignored.

use crate::catalog::Catalog;
use crate::config::{RevealConfig, RevealMode};
use crate::types::ArtworkRecord;

#[derive(Debug, Clone)]
pub struct RevealController {
    visible: usize,
    len: usize,
    initial_limit: usize,
    page_size: usize,
    mode: RevealMode,
    threshold: f64,
    /// Scroll mode only: true while the sentinel is out of view, so the next
    /// crossing may advance.
    armed: bool,
}

impl RevealController {
    pub fn new(config: &RevealConfig, catalog_len: usize) -> Self {
        Self {
            visible: config.initial_limit.min(catalog_len),
            len: catalog_len,
            initial_limit: config.initial_limit,
            page_size: config.page_size,
            mode: config.mode,
            threshold: config.threshold,
            armed: true,
        }
    }

    pub fn visible_count(&self) -> usize {
        self.visible
    }

    pub fn mode(&self) -> RevealMode {
        self.mode
    }

    pub fn has_more(&self) -> bool {
        self.visible < self.len
    }

    /// Reveal `page_size` more items, clamped to the catalog length.
    ///
    /// Returns whether anything new became visible; once saturated this is a
    /// no-op.
    pub fn advance(&mut self, page_size: usize) -> bool {
        let next = self.visible.saturating_add(page_size).min(self.len);
        let grew = next > self.visible;
        self.visible = next;
        grew
    }

    /// The visible prefix of `catalog`.
    pub fn visible<'a>(&self, catalog: &'a Catalog) -> &'a [ArtworkRecord] {
        catalog.prefix(self.visible)
    }

    /// Explicit load-more intent. Only honored in button mode.
    pub fn load_more(&mut self) -> bool {
        if self.mode != RevealMode::Button {
            return false;
        }
        self.advance(self.page_size)
    }

    /// Sentinel visibility report, `ratio` in `0.0..=1.0`. Only honored in
    /// scroll mode. Returns whether the report advanced the grid.
    pub fn sentinel(&mut self, ratio: f64) -> bool {
        if self.mode != RevealMode::Scroll {
            return false;
        }
        if ratio <= self.threshold {
            self.armed = true;
            return false;
        }
        if !self.armed || !self.has_more() {
            return false;
        }
        self.armed = false;
        self.advance(self.page_size)
    }

    /// Start over for a replaced catalog.
    pub fn reset(&mut self, catalog_len: usize) {
        self.len = catalog_len;
        self.visible = self.initial_limit.min(catalog_len);
        self.armed = true;
    }
}
