//! The gallery: catalog, grid paging, selection, deep links, lightbox and
//! side effects wired together behind one event entry point.
//!
//! # Event model
//!
//! Everything is single-threaded and event-driven. The host delivers discrete
//! [`Event`]s (user intents, URL changes, sentinel visibility, I/O
//! completions) through [`Gallery::dispatch`], and drives deferred work with
//! [`Gallery::tick`], one scheduling turn per call. Asynchronous I/O leaves the
//! gallery as [`Command`]s and comes back as completion events.
//!
//! ```text
//!   host ── Event ──► dispatch ──► selection / reveal / carousel / effects
//!                         │
//!                         └─► deep-link sync ── Continuation ──► scheduler
//!   host ── tick() ─────────────────────────────────────────────────┘
//!   host ◄── Command (clipboard, fetch) ── drain_commands()
//! ```
//!
//! # Lightbox lifecycle
//!
//! The lightbox is open exactly when something is selected. Opening creates a
//! [`Carousel`] seeded at the selection and takes the page
//! [`InteractionLock`]; every path that empties the selection (explicit close,
//! URL navigation, catalog replacement) drops both.

use crate::carousel::Carousel;
use crate::catalog::Catalog;
use crate::config::GalleryConfig;
use crate::effects::{ClipboardError, DownloadRequest, Effects, FetchError, Notification};
use crate::host::{Document, InteractionLock, ObjectStore, Platform, Router};
use crate::i18n::{Locale, Localizer};
use crate::reveal::RevealController;
use crate::selection::Selection;
use crate::sync::{
    CloseOutcome, Continuation, DeepLinkSync, Hydration, Resumed, Scheduler, SyncPhase,
};
use crate::types::{ArtworkId, ArtworkRecord};
use crate::url::GalleryUrl;
use std::rc::Rc;
use tracing::debug;

/// Input to the gallery.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A grid item was chosen.
    SelectArtwork(ArtworkId),
    /// Explicit lightbox close (close button, backdrop, Escape).
    Close,
    /// Load-more control (button mode).
    LoadMore,
    /// Sentinel visibility ratio (scroll mode).
    SentinelVisibility(f64),
    /// The URL changed for a reason other than our own replace.
    UrlChanged(GalleryUrl),
    CarouselNext,
    CarouselPrev,
    CarouselSeek(usize),
    /// The carousel presented the slide at this index.
    SlidePresented(usize),
    /// The lightbox image for this artwork finished loading.
    ImageLoaded(ArtworkId),
    ToggleDetails,
    Share,
    ClipboardWritten(Result<(), ClipboardError>),
    Download,
    FetchCompleted {
        request: DownloadRequest,
        result: Result<Vec<u8>, FetchError>,
    },
    DismissPrompt,
}

/// Asynchronous work for the host. Completions come back as events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Write text to the clipboard; reply with [`Event::ClipboardWritten`].
    WriteClipboard(String),
    /// Retrieve `request.source`; reply with [`Event::FetchCompleted`].
    Fetch(DownloadRequest),
}

pub struct Gallery {
    catalog: Catalog,
    config: GalleryConfig,
    reveal: RevealController,
    selection: Selection,
    sync: DeepLinkSync,
    scheduler: Scheduler<Continuation>,
    carousel: Option<Carousel>,
    lock: Option<InteractionLock>,
    show_details: bool,
    effects: Effects,
    commands: Vec<Command>,
    router: Box<dyn Router>,
    document: Rc<dyn Document>,
    objects: Box<dyn ObjectStore>,
    strings: Box<dyn Localizer>,
}

impl Gallery {
    pub fn new(catalog: Catalog, config: GalleryConfig, platform: Platform) -> Self {
        let reveal = RevealController::new(&config.reveal, catalog.len());
        Self {
            catalog,
            config,
            reveal,
            selection: Selection::new(),
            sync: DeepLinkSync::new(),
            scheduler: Scheduler::default(),
            carousel: None,
            lock: None,
            show_details: false,
            effects: Effects::new(),
            commands: Vec::new(),
            router: platform.router,
            document: platform.document,
            objects: platform.objects,
            strings: platform.strings,
        }
    }

    /// Initial hydration from the current location.
    pub fn mount(&mut self) {
        let location = self.router.location();
        self.url_changed(&location);
    }

    pub fn dispatch(&mut self, event: Event) {
        match event {
            Event::SelectArtwork(id) => self.select(&id),
            Event::Close => self.close(),
            Event::LoadMore => {
                self.reveal.load_more();
            }
            Event::SentinelVisibility(ratio) => {
                self.reveal.sentinel(ratio);
            }
            Event::UrlChanged(url) => self.url_changed(&url),
            Event::CarouselNext => {
                if let Some(carousel) = &mut self.carousel {
                    carousel.next(&self.catalog);
                }
            }
            Event::CarouselPrev => {
                if let Some(carousel) = &mut self.carousel {
                    carousel.prev(&self.catalog);
                }
            }
            Event::CarouselSeek(index) => {
                if let Some(carousel) = &mut self.carousel {
                    carousel.seek(&self.catalog, index);
                }
            }
            Event::SlidePresented(index) => {
                if let Some(carousel) = &mut self.carousel {
                    carousel.presented(index);
                }
            }
            Event::ImageLoaded(id) => {
                if let Some(carousel) = &mut self.carousel {
                    carousel.image_loaded(&self.catalog, id.as_str());
                }
            }
            Event::ToggleDetails => {
                if self.carousel.is_some() {
                    self.show_details = !self.show_details;
                }
            }
            Event::Share => self.share(),
            Event::ClipboardWritten(result) => {
                self.effects.clipboard_written(result, self.strings.as_ref());
            }
            Event::Download => self.download(),
            Event::FetchCompleted { request, result } => {
                let still_selected = self.selection.is(request.artwork.as_str());
                self.effects.finish_download(
                    &request,
                    result,
                    still_selected,
                    self.objects.as_mut(),
                    &self.config.download.mime,
                    self.strings.as_ref(),
                );
            }
            Event::DismissPrompt => self.effects.dismiss_prompt(),
        }
    }

    /// Run one scheduling turn of deferred work.
    pub fn tick(&mut self) {
        let due = self.scheduler.take_turn();
        debug!(turn = self.scheduler.turn(), due = due.len(), "Scheduler turn");
        for continuation in due {
            match self.sync.resume(continuation, self.router.as_mut()) {
                Resumed::Next(next) => self.scheduler.defer(next),
                Resumed::Released => {
                    // Navigation suppressed while the guard was held may have
                    // left the URL ahead of the selection.
                    let location = self.router.location();
                    self.url_changed(&location);
                }
                Resumed::WriteFailed => {}
            }
        }
    }

    /// Tick until no deferred work remains. Returns the number of turns run.
    pub fn run_until_idle(&mut self) -> usize {
        let mut turns = 0;
        while !self.scheduler.is_idle() {
            self.tick();
            turns += 1;
        }
        turns
    }

    /// Swap in a new catalog. The grid restarts at the initial limit and a
    /// selection that no longer resolves is dropped.
    pub fn replace_catalog(&mut self, catalog: Catalog) {
        self.catalog = catalog;
        self.reveal.reset(self.catalog.len());
        if self.selection.retain_valid(&self.catalog) {
            debug!("Selection lost in catalog replacement");
        }
        // Positions may have moved; reseed.
        self.carousel = None;
        self.sync_lightbox();
        // An id that was unknown to the old catalog may resolve now.
        let location = self.router.location();
        self.url_changed(&location);
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    pub fn locale(&self) -> &Locale {
        &self.config.locale
    }

    pub fn strings(&self) -> &dyn Localizer {
        self.strings.as_ref()
    }

    pub fn visible(&self) -> &[ArtworkRecord] {
        self.reveal.visible(&self.catalog)
    }

    pub fn reveal(&self) -> &RevealController {
        &self.reveal
    }

    pub fn selected_id(&self) -> Option<&ArtworkId> {
        self.selection.id()
    }

    /// Selected record and its catalog position.
    pub fn current(&self) -> Option<(&ArtworkRecord, usize)> {
        self.selection.current(&self.catalog)
    }

    pub fn carousel(&self) -> Option<&Carousel> {
        self.carousel.as_ref()
    }

    pub fn lightbox_open(&self) -> bool {
        self.carousel.is_some()
    }

    pub fn show_details(&self) -> bool {
        self.show_details
    }

    pub fn prompt_visible(&self) -> bool {
        self.effects.prompt_visible()
    }

    pub fn sync_phase(&self) -> &SyncPhase {
        self.sync.phase()
    }

    pub fn guarded(&self) -> bool {
        self.sync.guarded()
    }

    pub fn location(&self) -> GalleryUrl {
        self.router.location()
    }

    pub fn share_link(&self) -> Option<String> {
        let (record, _) = self.current()?;
        Some(self.effects.share_text(record, &self.config))
    }

    pub fn notifications(&self) -> &[Notification] {
        self.effects.notifications()
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.effects.drain_notifications()
    }

    pub fn drain_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    // ------------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------------

    fn select(&mut self, id: &ArtworkId) {
        if self.sync.guarded() {
            debug!(%id, "Selection ignored while URL update is pending");
            return;
        }
        if !self.selection.select(&self.catalog, id.as_str()) {
            return;
        }
        self.sync_lightbox();
        let location = self.router.location();
        if let Some(write) = self.sync.propagate(&location, &self.selection) {
            self.scheduler.defer(write);
        }
    }

    fn close(&mut self) {
        let location = self.router.location();
        match self.sync.close(&location, &mut self.selection) {
            CloseOutcome::Ignored => {}
            CloseOutcome::Closed(write) => {
                self.sync_lightbox();
                if let Some(write) = write {
                    self.scheduler.defer(write);
                }
            }
        }
    }

    fn url_changed(&mut self, url: &GalleryUrl) {
        match self.sync.hydrate(url, &self.catalog, &mut self.selection) {
            Hydration::Selected(_) | Hydration::Cleared => self.sync_lightbox(),
            Hydration::Suppressed | Hydration::Unchanged => {}
        }
    }

    fn share(&mut self) {
        if let Some(link) = self.share_link() {
            self.commands.push(Command::WriteClipboard(link));
        }
    }

    fn download(&mut self) {
        let Some((record, _)) = self.selection.current(&self.catalog) else {
            return;
        };
        let request = self.effects.begin_download(record, &self.config);
        self.commands.push(Command::Fetch(request));
    }

    /// Open or tear down the lightbox to match the selection.
    fn sync_lightbox(&mut self) {
        match self.selection.id() {
            Some(id) => {
                let seed = self.catalog.position(id.as_str());
                let stale = self.carousel.as_ref().is_none_or(|c| Some(c.seed()) != seed);
                if stale {
                    self.carousel = Carousel::open(&self.catalog, id.as_str());
                }
                if self.lock.is_none() {
                    self.lock = Some(InteractionLock::acquire(Rc::clone(&self.document)));
                }
            }
            None => {
                self.carousel = None;
                self.lock = None;
                self.show_details = false;
            }
        }
    }
}
