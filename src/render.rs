//! HTML snapshot of a gallery: the grid, the lightbox, the donation prompt
//! and pending notifications, rendered with Maud from the gallery's state.
//!
//! Rendering is read-only. Interactive elements carry `data-intent`
//! attributes naming the [`Event`](crate::gallery::Event) a host script
//! would dispatch, so the snapshot documents the intents the state accepts
//! without embedding any behavior.

use crate::config::RevealMode;
use crate::effects::{Notification, NotificationKind};
use crate::gallery::Gallery;
use crate::i18n::{Localizer, text};
use crate::types::ArtworkRecord;
use crate::url::share_link;
use maud::{DOCTYPE, Markup, html};

const CSS: &str = include_str!("../static/gallery.css");

/// Render the full page for the gallery's current state.
pub fn render_page(gallery: &Gallery) -> Markup {
    let strings = gallery.strings();
    let title = text(strings, "gallery.title", "Gallery");
    let locked = gallery.lightbox_open();
    html! {
        (DOCTYPE)
        html lang=(gallery.locale().as_str()) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (CSS) }
            }
            body class=[locked.then_some("scroll-locked")] {
                main {
                    h1 { (title) }
                    (render_grid(gallery))
                }
                @if locked {
                    (render_lightbox(gallery))
                }
                @if gallery.prompt_visible() {
                    (render_donation(strings))
                }
                (render_notifications(gallery.notifications()))
            }
        }
    }
}

// ============================================================================
// Grid
// ============================================================================

pub fn render_grid(gallery: &Gallery) -> Markup {
    let strings = gallery.strings();
    let config = gallery.config();
    let reveal = gallery.reveal();
    html! {
        section.grid data-visible=(reveal.visible_count()) data-total=(gallery.catalog().len()) {
            @for record in gallery.visible() {
                (render_grid_item(record, &share_link("", &config.base_path, record.id.as_str())))
            }
        }
        @if reveal.has_more() {
            @match reveal.mode() {
                RevealMode::Button => {
                    button.load-more type="button" data-intent="load-more" {
                        (text(strings, "gallery.loadMore", "Load more"))
                    }
                }
                RevealMode::Scroll => {
                    div.sentinel data-intent="sentinel" data-threshold=(config.reveal.threshold) {}
                }
            }
        }
    }
}

fn render_grid_item(record: &ArtworkRecord, href: &str) -> Markup {
    html! {
        figure.grid-item data-id=(record.id.as_str()) {
            a href=(href) data-intent="select" {
                img src=(record.image) alt=(record.title) loading="lazy";
            }
            figcaption {
                (record.title)
                @if !record.year.is_empty() {
                    ", " (record.year)
                }
            }
        }
    }
}

// ============================================================================
// Lightbox
// ============================================================================

/// The lightbox for the selected artwork. Empty when closed.
///
/// Only the slide follows the carousel; the header, scripture and details
/// describe the selection, which is what share and download act on.
pub fn render_lightbox(gallery: &Gallery) -> Markup {
    let (Some(carousel), Some((selected, _))) = (gallery.carousel(), gallery.current()) else {
        return html! {};
    };
    let Some(slide) = carousel.focused(gallery.catalog()) else {
        return html! {};
    };
    let strings = gallery.strings();
    let scripture = selected.scripture(gallery.locale());
    let counter = format!("{} / {}", carousel.position() + 1, carousel.len());
    let details_open = gallery.show_details().to_string();

    html! {
        div.lightbox role="dialog" aria-modal="true"
            data-id=(selected.id.as_str())
            data-initialized=(carousel.initialized().to_string()) {
            button.close type="button" data-intent="close" {
                (text(strings, "lightbox.close", "Close"))
            }
            button.prev type="button" data-intent="prev" {
                (text(strings, "lightbox.previous", "Previous"))
            }
            figure data-slide=(slide.id.as_str()) {
                img src=(slide.image) alt=(slide.title);
                figcaption {
                    h2 { (selected.title) }
                    @if !selected.year.is_empty() {
                        p.year { (selected.year) }
                    }
                    span.counter { (counter) }
                }
            }
            button.next type="button" data-intent="next" {
                (text(strings, "lightbox.next", "Next"))
            }
            @if let Some(scripture) = scripture {
                section.scripture {
                    h3 { (text(strings, "lightbox.scripture", "Scripture")) }
                    blockquote { (scripture.excerpt) }
                    @if let Some(citation) = scripture.citation {
                        cite { (citation) }
                    }
                }
            }
            div.actions {
                button type="button" data-intent="toggle-details" aria-expanded=(details_open) {
                    (text(strings, "lightbox.details", "Artwork Details"))
                }
                button type="button" data-intent="share" {
                    (text(strings, "lightbox.share", "Share"))
                }
                button type="button" data-intent="download" {
                    (text(strings, "lightbox.download", "Download"))
                }
            }
            @if gallery.show_details() {
                (render_details(selected, strings))
            }
        }
    }
}

fn render_details(record: &ArtworkRecord, strings: &dyn Localizer) -> Markup {
    html! {
        dl.details {
            @if !record.description.is_empty() {
                dt { (text(strings, "details.description", "Description")) }
                dd { (record.description) }
            }
            @if !record.medium.is_empty() {
                dt { (text(strings, "details.medium", "Medium")) }
                dd { (record.medium) }
            }
            @if !record.dimensions.is_empty() {
                dt { (text(strings, "details.dimensions", "Dimensions")) }
                dd { (record.dimensions) }
            }
            @if let Some(location) = &record.location {
                dt { (text(strings, "details.location", "Location")) }
                dd { (location) }
            }
        }
    }
}

// ============================================================================
// Donation prompt and notifications
// ============================================================================

pub fn render_donation(strings: &dyn Localizer) -> Markup {
    html! {
        aside.donation role="dialog" {
            h2 { (text(strings, "donate.title", "Support the Artist")) }
            p {
                (text(
                    strings,
                    "donate.description",
                    "Your download has started. \
                     If this work speaks to you, consider supporting the studio.",
                ))
            }
            a.donate href="#donate" { (text(strings, "donate.action", "Donate")) }
            button type="button" data-intent="dismiss-prompt" {
                (text(strings, "donate.dismiss", "Maybe Later"))
            }
        }
    }
}

fn render_notifications(notifications: &[Notification]) -> Markup {
    html! {
        @if !notifications.is_empty() {
            div.toasts role="status" {
                @for n in notifications {
                    div class={ "toast " (kind_class(n.kind)) } {
                        strong { (n.title) }
                        p { (n.description) }
                    }
                }
            }
        }
    }
}

fn kind_class(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Info => "info",
        NotificationKind::Error => "error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::config::GalleryConfig;
    use crate::gallery::Event;
    use crate::i18n::StringTable;
    use crate::host::Platform;
    use crate::test_helpers::{
        artwork, artwork_titled, gallery_at, gallery_with, numbered_catalog, scripture_artwork,
    };

    // =========================================================================
    // Grid
    // =========================================================================

    #[test]
    fn grid_shows_initial_page_and_sentinel() {
        let (gallery, _host) = gallery_at("/gallery", numbered_catalog(12));
        let html = render_page(&gallery).into_string();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert_eq!(html.matches("class=\"grid-item\"").count(), 8);
        assert!(html.contains("class=\"sentinel\""));
        assert!(!html.contains("data-intent=\"load-more\""));
    }

    #[test]
    fn button_mode_renders_load_more() {
        let mut config = GalleryConfig::default();
        config.reveal.mode = RevealMode::Button;
        let (gallery, _host) = gallery_with("/gallery", numbered_catalog(12), config);
        let html = render_grid(&gallery).into_string();
        assert!(html.contains("Load more"));
        assert!(!html.contains("sentinel"));
    }

    #[test]
    fn exhausted_grid_has_no_trigger() {
        let (gallery, _host) = gallery_at("/gallery", numbered_catalog(3));
        let html = render_grid(&gallery).into_string();
        assert!(!html.contains("sentinel"));
        assert!(!html.contains("load-more"));
    }

    #[test]
    fn grid_links_are_deep_links() {
        let (gallery, _host) = gallery_at("/gallery", numbered_catalog(1));
        let html = render_grid(&gallery).into_string();
        assert!(html.contains("href=\"/gallery?image=art-0\""));
    }

    // =========================================================================
    // Lightbox
    // =========================================================================

    #[test]
    fn closed_gallery_has_no_lightbox() {
        let (gallery, _host) = gallery_at("/gallery", numbered_catalog(3));
        let html = render_page(&gallery).into_string();
        assert!(!html.contains("class=\"lightbox\""));
        assert!(!html.contains("class=\"scroll-locked\""));
    }

    #[test]
    fn slide_follows_focus_while_header_shows_selection() {
        let (mut gallery, _host) = gallery_at("/gallery?image=art-1", numbered_catalog(3));
        gallery.dispatch(Event::CarouselNext);
        let html = render_lightbox(&gallery).into_string();
        assert!(html.contains("data-slide=\"art-2\""));
        assert!(html.contains("src=\"/art/art-2.jpg\""));
        assert!(html.contains("3 / 3"));
        assert!(html.contains("data-id=\"art-1\""));
        assert!(html.contains("<h2>art-1</h2>"));
    }

    #[test]
    fn details_describe_selection_not_focus() {
        let catalog = Catalog::new(vec![
            artwork_titled("a", "Harbor"),
            artwork_titled("b", "Orchard"),
        ])
        .unwrap();
        let (mut gallery, _host) = gallery_at("/gallery?image=a", catalog);
        gallery.dispatch(Event::ToggleDetails);
        gallery.dispatch(Event::CarouselNext);
        let html = render_lightbox(&gallery).into_string();
        assert!(html.contains("About Harbor"));
        assert!(!html.contains("About Orchard"));
    }

    #[test]
    fn scripture_block_uses_locale() {
        let catalog = Catalog::new(vec![
            artwork("plain"),
            scripture_artwork("g1", "Genesis", "In the beginning", "起初"),
        ])
        .unwrap();
        let mut config = GalleryConfig::default();
        config.locale = crate::i18n::Locale::new("zh-TW");
        let (gallery, _host) = gallery_with("/gallery?image=g1", catalog, config);
        let html = render_lightbox(&gallery).into_string();
        assert!(html.contains("起初"));
        assert!(html.contains("Genesis 1:1"));
        assert!(!html.contains("In the beginning"));
    }

    #[test]
    fn details_render_only_when_toggled() {
        let (mut gallery, _host) = gallery_at("/gallery?image=art-0", numbered_catalog(1));
        assert!(!render_lightbox(&gallery).into_string().contains("Oil on canvas"));
        gallery.dispatch(Event::ToggleDetails);
        let html = render_lightbox(&gallery).into_string();
        assert!(html.contains("Medium"));
        assert!(html.contains("Oil on canvas"));
    }

    // =========================================================================
    // Prompt and notifications
    // =========================================================================

    #[test]
    fn donation_prompt_after_download() {
        let (mut gallery, _host) = gallery_at("/gallery?image=art-0", numbered_catalog(1));
        gallery.dispatch(Event::Download);
        let html = render_page(&gallery).into_string();
        assert!(html.contains("Support the Artist"));
        assert!(html.contains("Maybe Later"));
    }

    #[test]
    fn prompt_text_is_localized() {
        let mut strings = StringTable::default();
        strings.insert("donate.title", "支持艺术家");
        let (platform, _host) = Platform::in_memory("/gallery?image=art-0");
        let mut gallery = Gallery::new(
            numbered_catalog(1),
            GalleryConfig::default(),
            platform.with_strings(strings),
        );
        gallery.mount();
        gallery.dispatch(Event::Download);
        assert!(render_page(&gallery).into_string().contains("支持艺术家"));
    }

    #[test]
    fn notifications_render_as_toasts() {
        let (mut gallery, _host) = gallery_at("/gallery?image=art-0", numbered_catalog(1));
        gallery.dispatch(Event::ClipboardWritten(Ok(())));
        let html = render_page(&gallery).into_string();
        assert!(html.contains("toast info"));
        assert!(html.contains("Link copied"));
    }
}
