//! CLI output formatting.
//!
//! # Entity Display Contract
//!
//! Every artwork is displayed the same way across commands:
//!
//! 1. **Header line**: 1-based catalog position + title (or the id in
//!    parentheses when untitled)
//! 2. **Context lines**: indented `Id:`, `Year:`, `Scripture:` and so on
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Catalog (3 artworks)
//! 001 Dawn
//!     Id: dawn
//!     Year: 2021
//! 002 Creation
//!     Id: creation
//!     Scripture: Genesis 1:1
//! 003 (untitled-7)
//!     Id: untitled-7
//!
//! Books
//!     Genesis (1 artwork)
//!
//! Config
//!     Base path: /gallery
//!     Locale: en
//!     Reveal: scroll, 8 initial, 8 per page
//! ```
//!
//! ## Grid
//!
//! ```text
//! 001 Dawn
//! 002 Creation
//! Showing 2 of 3 (scroll to load more)
//! ```
//!
//! ## State
//!
//! ```text
//! URL: /gallery?image=creation
//! Lightbox: 002 Creation
//!     Carousel: 2 / 3
//!     Details: hidden
//! Sync: idle
//! ```
//!
//! # Architecture
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure.

use crate::catalog::{BOOK_ORDER, Catalog};
use crate::config::{GalleryConfig, RevealMode};
use crate::gallery::Gallery;
use crate::sync::SyncPhase;
use crate::types::{Annotation, ArtworkRecord};

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 0-based catalog position as a 3-digit, 1-based index.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos + 1)
}

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Header line for an artwork: titled artworks show their title, untitled
/// ones show the id in parentheses.
///
/// ```text
/// 001 Dawn
/// 003 (untitled-7)
/// ```
fn artwork_line(pos: usize, record: &ArtworkRecord) -> String {
    if record.title.is_empty() {
        format!("{} ({})", format_index(pos), record.id)
    } else {
        format!("{} {}", format_index(pos), record.title)
    }
}

fn mode_name(mode: RevealMode) -> &'static str {
    match mode {
        RevealMode::Button => "button",
        RevealMode::Scroll => "scroll",
    }
}

fn plural(n: usize, one: &str) -> String {
    if n == 1 { format!("1 {one}") } else { format!("{n} {one}s") }
}

// ============================================================================
// Check
// ============================================================================

pub fn format_check_output(catalog: &Catalog, config: &GalleryConfig) -> Vec<String> {
    let mut lines = vec![format!("Catalog ({})", plural(catalog.len(), "artwork"))];

    for (pos, record) in catalog.records().iter().enumerate() {
        lines.push(artwork_line(pos, record));
        lines.push(format!("{}Id: {}", indent(1), record.id));
        if !record.year.is_empty() {
            lines.push(format!("{}Year: {}", indent(1), record.year));
        }
        if let Annotation::Scripture { book, citation, .. } = &record.annotation {
            let cited = citation.as_deref().unwrap_or(book);
            lines.push(format!("{}Scripture: {}", indent(1), cited));
        }
    }

    let books = catalog.grouped_by_book(BOOK_ORDER);
    if !books.is_empty() {
        lines.push(String::new());
        lines.push("Books".to_string());
        for (book, records) in books {
            lines.push(format!("{}{} ({})", indent(1), book, plural(records.len(), "artwork")));
        }
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    lines.push(format!("{}Base path: {}", indent(1), config.base_path));
    if !config.origin.is_empty() {
        lines.push(format!("{}Origin: {}", indent(1), config.origin));
    }
    lines.push(format!("{}Locale: {}", indent(1), config.locale.as_str()));
    lines.push(format!(
        "{}Reveal: {}, {} initial, {} per page",
        indent(1),
        mode_name(config.reveal.mode),
        config.reveal.initial_limit,
        config.reveal.page_size
    ));
    lines
}

pub fn print_check_output(catalog: &Catalog, config: &GalleryConfig) {
    for line in format_check_output(catalog, config) {
        println!("{}", line);
    }
}

// ============================================================================
// Grid
// ============================================================================

pub fn format_grid_output(gallery: &Gallery) -> Vec<String> {
    let mut lines: Vec<String> = gallery
        .visible()
        .iter()
        .enumerate()
        .map(|(pos, record)| artwork_line(pos, record))
        .collect();

    let reveal = gallery.reveal();
    let total = gallery.catalog().len();
    let summary = format!("Showing {} of {}", reveal.visible_count(), total);
    lines.push(if reveal.has_more() {
        let hint = match reveal.mode() {
            RevealMode::Button => "press load more",
            RevealMode::Scroll => "scroll to load more",
        };
        format!("{summary} ({hint})")
    } else {
        summary
    });
    lines
}

pub fn print_grid_output(gallery: &Gallery) {
    for line in format_grid_output(gallery) {
        println!("{}", line);
    }
}

// ============================================================================
// State
// ============================================================================

pub fn format_state_output(gallery: &Gallery) -> Vec<String> {
    let mut lines = vec![format!("URL: {}", gallery.location())];

    match (gallery.current(), gallery.carousel()) {
        (Some((record, pos)), Some(carousel)) => {
            lines.push(format!("Lightbox: {}", artwork_line(pos, record)));
            lines.push(format!(
                "{}Carousel: {} / {}",
                indent(1),
                carousel.position() + 1,
                carousel.len()
            ));
            if let Some(scripture) = record.scripture(gallery.locale()) {
                lines.push(format!("{}Scripture: {}", indent(1), scripture.excerpt));
            }
            let details = if gallery.show_details() { "shown" } else { "hidden" };
            lines.push(format!("{}Details: {}", indent(1), details));
        }
        _ => lines.push("Lightbox: closed".to_string()),
    }

    let sync = match gallery.sync_phase() {
        SyncPhase::Idle => "idle".to_string(),
        SyncPhase::Propagating { target, step } => format!("propagating {target} ({step:?})"),
        SyncPhase::Closing { step } => format!("closing ({step:?})"),
    };
    lines.push(format!("Sync: {sync}"));
    lines
}

pub fn print_state_output(gallery: &Gallery) {
    for line in format_state_output(gallery) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::Event;
    use crate::test_helpers::{
        artwork, artwork_titled, gallery_at, numbered_catalog, scripture_artwork,
    };

    // =========================================================================
    // Helpers
    // =========================================================================

    #[test]
    fn format_index_is_one_based() {
        assert_eq!(format_index(0), "001");
        assert_eq!(format_index(41), "042");
    }

    #[test]
    fn untitled_artwork_shows_id() {
        assert_eq!(artwork_line(2, &artwork_titled("x7", "")), "003 (x7)");
        assert_eq!(artwork_line(0, &artwork_titled("d", "Dawn")), "001 Dawn");
    }

    // =========================================================================
    // Check
    // =========================================================================

    #[test]
    fn check_lists_catalog_and_config() {
        let catalog = Catalog::new(vec![
            artwork_titled("dawn", "Dawn"),
            scripture_artwork("g1", "Genesis", "In the beginning", "起初"),
        ])
        .unwrap();
        let lines = format_check_output(&catalog, &GalleryConfig::default());
        assert_eq!(lines[0], "Catalog (2 artworks)");
        assert_eq!(lines[1], "001 Dawn");
        assert_eq!(lines[2], "    Id: dawn");
        assert!(lines.contains(&"    Scripture: Genesis 1:1".to_string()));
        assert!(lines.contains(&"    Reveal: scroll, 8 initial, 8 per page".to_string()));
    }

    #[test]
    fn check_groups_scripture_by_book_in_canonical_order() {
        let catalog = Catalog::new(vec![
            scripture_artwork("j1", "John", "In the beginning was the Word", "太初有道"),
            artwork("plain"),
            scripture_artwork("g1", "Genesis", "In the beginning", "起初"),
            scripture_artwork("j2", "John", "Jesus wept", "耶穌哭了"),
        ])
        .unwrap();
        let lines = format_check_output(&catalog, &GalleryConfig::default());
        let books = lines.iter().position(|l| l == "Books").unwrap();
        assert_eq!(lines[books + 1], "    Genesis (1 artwork)");
        assert_eq!(lines[books + 2], "    John (2 artworks)");
        assert_eq!(lines[books + 3], "");
    }

    #[test]
    fn check_omits_books_for_plain_catalog() {
        let catalog = Catalog::new(vec![artwork("a")]).unwrap();
        let lines = format_check_output(&catalog, &GalleryConfig::default());
        assert!(!lines.contains(&"Books".to_string()));
    }

    #[test]
    fn check_singular_count() {
        let catalog = Catalog::new(vec![artwork("a")]).unwrap();
        assert_eq!(
            format_check_output(&catalog, &GalleryConfig::default())[0],
            "Catalog (1 artwork)"
        );
    }

    // =========================================================================
    // Grid
    // =========================================================================

    #[test]
    fn grid_summary_mentions_remaining() {
        let (gallery, _host) = gallery_at("/gallery", numbered_catalog(10));
        let lines = format_grid_output(&gallery);
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[8], "Showing 8 of 10 (scroll to load more)");
    }

    #[test]
    fn grid_summary_when_complete() {
        let (mut gallery, _host) = gallery_at("/gallery", numbered_catalog(10));
        gallery.dispatch(Event::SentinelVisibility(1.0));
        assert_eq!(format_grid_output(&gallery).last().unwrap(), "Showing 10 of 10");
    }

    // =========================================================================
    // State
    // =========================================================================

    #[test]
    fn state_for_closed_gallery() {
        let (gallery, _host) = gallery_at("/gallery", numbered_catalog(2));
        assert_eq!(
            format_state_output(&gallery),
            vec!["URL: /gallery", "Lightbox: closed", "Sync: idle"]
        );
    }

    #[test]
    fn state_for_open_lightbox() {
        let (gallery, _host) = gallery_at("/gallery?image=art-1", numbered_catalog(3));
        let lines = format_state_output(&gallery);
        assert_eq!(lines[1], "Lightbox: 002 art-1");
        assert_eq!(lines[2], "    Carousel: 2 / 3");
        assert_eq!(lines[3], "    Details: hidden");
    }

    #[test]
    fn state_shows_pending_write() {
        let (mut gallery, _host) = gallery_at("/gallery", numbered_catalog(3));
        gallery.dispatch(Event::SelectArtwork("art-0".into()));
        let lines = format_state_output(&gallery);
        assert_eq!(lines.last().unwrap(), "Sync: propagating art-0 (AwaitingWrite)");
    }
}
