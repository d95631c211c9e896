//! Deep-link synchronizer: keeps the selection and the `image` URL parameter
//! in agreement without feedback loops.
//!
//! Two independent signals feed the gallery: selection changes (user picks an
//! artwork, user closes the lightbox) and URL changes (initial load,
//! back/forward). Writing the URL from a selection change produces a URL
//! change of its own, and reading that echo back as navigation would loop.
//! The synchronizer breaks the cycle with a guard that is held from the
//! moment it decides to write until the write has been observed.
//!
//! # State machine
//!
//! ```text
//!                 select(id), URL differs
//!        ┌──────────────────────────────────────────┐
//!        │                                          ▼
//!      Idle ──── close() ───► Closing        Propagating
//!       ▲ ▲                  │                      │
//!       │ │   (no param)     │ WriteUrl (turn +1)   │ WriteUrl (turn +1)
//!       │ └──────────────────┤                      │
//!       │                    ▼                      ▼
//!       │              awaiting echo          awaiting echo
//!       │                    │ ReleaseGuard (turn +2)│
//!       └────────────────────┴──────────────────────┘
//! ```
//!
//! Hydration is a transition from `Idle` back to `Idle`: it runs only while
//! no guard is held, and sets or clears the selection from the URL.
//!
//! The guard is observable as [`DeepLinkSync::guarded`]. It is true for the
//! whole span between the triggering change and the completion of the URL
//! write, and it is always released: a rejected write is logged and drops
//! straight back to `Idle`.
//!
//! # Continuations
//!
//! Deferred work is expressed as [`Continuation`] values rather than timers.
//! The owner queues each returned continuation for the next scheduling turn
//! (see [`Scheduler`]) and feeds it back through [`DeepLinkSync::resume`].
//! The URL write therefore lands one turn after the selection change, and the
//! guard release one turn after that, which absorbs any synchronous echo of
//! the write.

use crate::catalog::Catalog;
use crate::host::Router;
use crate::selection::Selection;
use crate::types::ArtworkId;
use crate::url::GalleryUrl;
use std::collections::VecDeque;
use tracing::{debug, warn};

/// Where a held guard is in its transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The URL write is queued.
    AwaitingWrite,
    /// The URL write happened; the guard is released next turn.
    AwaitingEcho,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SyncPhase {
    #[default]
    Idle,
    Propagating { target: ArtworkId, step: Step },
    Closing { step: Step },
}

/// Deferred synchronizer work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Continuation {
    /// Write the URL. The exact URL is computed from the router's location
    /// when the write runs, so unrelated parameters are preserved.
    WriteUrl(UrlWrite),
    ReleaseGuard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlWrite {
    Select(ArtworkId),
    RemoveSelection,
}

/// Result of a hydration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hydration {
    /// A guard is held; the URL change is our own write (or races it).
    Suppressed,
    /// Selection already matches the URL.
    Unchanged,
    Selected(ArtworkId),
    /// The URL carries no resolvable selection, so the selection was cleared.
    Cleared,
}

/// Result of a close request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseOutcome {
    /// A guard is already held; the close was dropped.
    Ignored,
    /// Selection cleared. Queue the continuation, if any.
    Closed(Option<Continuation>),
}

/// Result of resuming a continuation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resumed {
    /// Queue this for the next turn.
    Next(Continuation),
    /// Guard released after a successful write.
    Released,
    /// The URL write was rejected; the guard was released anyway.
    WriteFailed,
}

#[derive(Debug, Clone, Default)]
pub struct DeepLinkSync {
    phase: SyncPhase,
}

impl DeepLinkSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &SyncPhase {
        &self.phase
    }

    /// True while a URL mutation initiated here is in flight.
    pub fn guarded(&self) -> bool {
        self.phase != SyncPhase::Idle
    }

    /// Bring the selection in line with an externally changed URL.
    ///
    /// An id that does not resolve in the catalog counts as no id at all.
    pub fn hydrate(
        &mut self,
        url: &GalleryUrl,
        catalog: &Catalog,
        selection: &mut Selection,
    ) -> Hydration {
        if self.guarded() {
            debug!(url = %url, phase = ?self.phase, "Hydration suppressed by guard");
            return Hydration::Suppressed;
        }
        let wanted = url.selection().filter(|id| catalog.contains(id));
        match wanted {
            Some(id) if selection.is(id) => Hydration::Unchanged,
            Some(id) => {
                selection.select(catalog, id);
                debug!(id, "Hydrated selection from URL");
                Hydration::Selected(ArtworkId::new(id))
            }
            None if selection.is_empty() => {
                if let Some(stale) = url.selection() {
                    debug!(id = stale, "URL names an unknown artwork; ignoring");
                }
                Hydration::Unchanged
            }
            None => {
                selection.clear();
                debug!(url = %url, "URL has no selection; cleared");
                Hydration::Cleared
            }
        }
    }

    /// React to a selection change. If the URL does not already carry the
    /// selected id, take the guard and return the write to defer.
    pub fn propagate(&mut self, url: &GalleryUrl, selection: &Selection) -> Option<Continuation> {
        if self.guarded() {
            return None;
        }
        let id = selection.id()?;
        if url.selection() == Some(id.as_str()) {
            return None;
        }
        debug!(%id, "Propagating selection to URL");
        self.phase = SyncPhase::Propagating {
            target: id.clone(),
            step: Step::AwaitingWrite,
        };
        Some(Continuation::WriteUrl(UrlWrite::Select(id.clone())))
    }

    /// Explicit close: take the guard, clear the selection, and remove the
    /// selection parameter from the URL if present.
    pub fn close(&mut self, url: &GalleryUrl, selection: &mut Selection) -> CloseOutcome {
        if self.guarded() {
            debug!(phase = ?self.phase, "Close ignored while guard is held");
            return CloseOutcome::Ignored;
        }
        selection.clear();
        if url.has_param(crate::url::SELECTION_PARAM) {
            self.phase = SyncPhase::Closing {
                step: Step::AwaitingWrite,
            };
            CloseOutcome::Closed(Some(Continuation::WriteUrl(UrlWrite::RemoveSelection)))
        } else {
            CloseOutcome::Closed(None)
        }
    }

    /// Run a continuation that was deferred to this turn.
    pub fn resume(&mut self, continuation: Continuation, router: &mut dyn Router) -> Resumed {
        match continuation {
            Continuation::WriteUrl(write) => {
                let location = router.location();
                let next = match &write {
                    UrlWrite::Select(id) => location.with_selection(id.as_str()),
                    UrlWrite::RemoveSelection => location.without_selection(),
                };
                match router.replace(&next) {
                    Ok(()) => {
                        self.set_step(Step::AwaitingEcho);
                        Resumed::Next(Continuation::ReleaseGuard)
                    }
                    Err(err) => {
                        warn!(error = %err, write = ?write, "URL update failed; releasing guard");
                        self.phase = SyncPhase::Idle;
                        Resumed::WriteFailed
                    }
                }
            }
            Continuation::ReleaseGuard => {
                debug!(phase = ?self.phase, "Releasing guard");
                self.phase = SyncPhase::Idle;
                Resumed::Released
            }
        }
    }

    fn set_step(&mut self, next: Step) {
        match &mut self.phase {
            SyncPhase::Propagating { step, .. } | SyncPhase::Closing { step } => *step = next,
            SyncPhase::Idle => {}
        }
    }
}

/// Cooperative turn-based queue.
///
/// Work deferred during a turn runs in the next one, never in the current one,
/// so a continuation chain of length *n* completes in exactly *n* turns.
#[derive(Debug)]
pub struct Scheduler<T> {
    queue: VecDeque<T>,
    turn: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            queue: VecDeque::new(),
            turn: 0,
        }
    }
}

impl<T> Scheduler<T> {
    pub fn defer(&mut self, task: T) {
        self.queue.push_back(task);
    }

    /// Take everything due this turn and advance the turn counter.
    pub fn take_turn(&mut self) -> Vec<T> {
        self.turn += 1;
        self.queue.drain(..).collect()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Number of turns run so far.
    pub fn turn(&self) -> u64 {
        self.turn
    }
}
