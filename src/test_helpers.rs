//! Shared test utilities: record builders, catalogs, and a mounted gallery
//! on an in-memory platform.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let (mut gallery, host) = gallery_at("/gallery?image=art-2", numbered_catalog(5));
//! assert_eq!(gallery.current().unwrap().1, 2);
//! assert!(host.document.is_locked());
//! ```

use crate::catalog::Catalog;
use crate::config::GalleryConfig;
use crate::gallery::Gallery;
use crate::host::{MemoryHost, Platform};
use crate::types::{Annotation, ArtworkId, ArtworkRecord, Scriptures};

// =========================================================================
// Records
// =========================================================================

/// Plain artwork titled after its id.
pub fn artwork(id: &str) -> ArtworkRecord {
    artwork_titled(id, id)
}

pub fn artwork_titled(id: &str, title: &str) -> ArtworkRecord {
    ArtworkRecord {
        id: ArtworkId::new(id),
        title: title.to_string(),
        year: "2020".to_string(),
        description: format!("About {title}"),
        medium: "Oil on canvas".to_string(),
        dimensions: "60 x 80 cm".to_string(),
        location: None,
        image: format!("/art/{id}.jpg"),
        annotation: Annotation::Plain,
    }
}

/// Scripture artwork cited as `"{book} 1:1"`.
pub fn scripture_artwork(id: &str, book: &str, en: &str, zh: &str) -> ArtworkRecord {
    ArtworkRecord {
        annotation: Annotation::Scripture {
            book: book.to_string(),
            section: String::new(),
            scriptures: Scriptures {
                en: Some(en.to_string()),
                zh: Some(zh.to_string()),
            },
            citation: Some(format!("{book} 1:1")),
        },
        ..artwork(id)
    }
}

// =========================================================================
// Catalogs
// =========================================================================

pub fn catalog_of(ids: &[&str]) -> Catalog {
    Catalog::new(ids.iter().map(|id| artwork(id)).collect()).unwrap()
}

/// Catalog with ids `art-0` .. `art-{n-1}`.
pub fn numbered_catalog(n: usize) -> Catalog {
    Catalog::new((0..n).map(|i| artwork(&format!("art-{i}"))).collect()).unwrap()
}

// =========================================================================
// Gallery
// =========================================================================

/// A mounted gallery with default config, starting at `location`.
pub fn gallery_at(location: &str, catalog: Catalog) -> (Gallery, MemoryHost) {
    gallery_with(location, catalog, GalleryConfig::default())
}

pub fn gallery_with(
    location: &str,
    catalog: Catalog,
    config: GalleryConfig,
) -> (Gallery, MemoryHost) {
    let (platform, host) = Platform::in_memory(location);
    let mut gallery = Gallery::new(catalog, config, platform);
    gallery.mount();
    (gallery, host)
}
