//! # Studio Gallery
//!
//! The browsing and deep-linking engine behind an art studio's gallery page.
//! A fixed catalog of artworks is shown as a grid that grows page by page;
//! choosing an artwork opens a lightbox carousel, and the selection is kept
//! in the page URL (`?image=<id>`) so every artwork has a shareable link that
//! reopens it.
//!
//! # Architecture: Deterministic Core, Pluggable Host
//!
//! ```text
//! catalog ─► reveal ─► visible grid            (render: external view)
//!    │
//!    └─► selection ⇄ deep-link sync ⇄ router   (URL is shared state)
//!           │
//!           └─► carousel ─► effects ─► clipboard / fetch / object store
//! ```
//!
//! All state lives in a single-threaded [`gallery::Gallery`] driven by
//! discrete events. Everything the core needs from a browser is a trait in
//! [`host`], and everything asynchronous leaves as a
//! [`gallery::Command`] and comes back as an event. The same core runs in
//! the CLI and in tests against in-memory hosts.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | Artwork records, ids, and the closed annotation variant |
//! | [`catalog`] | Ordered, id-unique artwork collection; JSON loading |
//! | [`naming`] | Download filenames derived from artwork titles |
//! | [`i18n`] | Locale, string lookup with inline defaults, TOML string tables |
//! | [`config`] | `gallery.toml` loading, merging over stock defaults, validation |
//! | [`reveal`] | How many catalog items the grid shows; button and scroll modes |
//! | [`selection`] | The single selected artwork |
//! | [`url`] | Gallery URLs and the `image` query parameter |
//! | [`host`] | Router, document and object-store traits; in-memory hosts |
//! | [`sync`] | Deep-link state machine and the turn-based scheduler |
//! | [`carousel`] | Lightbox focus over the full catalog, looping |
//! | [`effects`] | Share, gated download, donation prompt, notifications |
//! | [`gallery`] | Event dispatch tying all of the above together |
//! | [`render`] | Maud HTML snapshot of the current state |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## The URL Is Shared State
//!
//! Selection and URL can each change independently: the user clicks a
//! thumbnail, or the browser navigates back. The [`sync`] state machine holds
//! a guard from the moment it decides to write the URL until one turn after
//! the write, so the echo of its own write is never mistaken for navigation.
//! Navigation that arrives while the guard is held is reconciled when it is
//! released.
//!
//! ## Turns, Not Timers
//!
//! Deferred work is a value ([`sync::Continuation`]) queued on a
//! [`sync::Scheduler`] and run by [`gallery::Gallery::tick`]. Tests step
//! through the deep-link protocol one turn at a time and can assert exactly
//! what the URL and guard look like in between.
//!
//! ## Scoped Resources
//!
//! The page scroll lock and every local object reference created for a
//! download are RAII values. Closing the lightbox by any path drops the lock;
//! a failed save still revokes its object.
//!
//! ## One Locale
//!
//! The configured locale decides both the display strings and which language
//! of a scripture annotation is shown. There is no second setting to drift.

pub mod carousel;
pub mod catalog;
pub mod config;
pub mod effects;
pub mod gallery;
pub mod host;
pub mod i18n;
pub mod naming;
pub mod output;
pub mod render;
pub mod reveal;
pub mod selection;
pub mod sync;
pub mod types;
pub mod url;

#[cfg(test)]
pub(crate) mod test_helpers;
