//! Collaborators the gallery core talks to, and in-memory implementations.
//!
//! | Trait | Role |
//! |-------|------|
//! | [`Router`] | Reads the current URL and replaces it without a history entry |
//! | [`Document`] | Page-level interaction lock (scroll lock while the lightbox is open) |
//! | [`ObjectStore`] | Local, revocable object references for file saves |
//!
//! Clipboard writes and file retrieval are asynchronous; they leave the core
//! as [`Command`](crate::gallery::Command)s and come back as events, so they
//! have no trait here.
//!
//! The `Memory*` implementations share their state between clones, which lets
//! a caller hand one clone to the gallery and keep another to inspect or drive
//! it (simulating back/forward navigation, rejected URL writes, and so on).
//! They back the CLI and the test suite.

use crate::i18n::{English, Localizer};
use crate::url::GalleryUrl;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("URL replace rejected: {0}")]
pub struct NavigationError(pub String);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SaveError {
    #[error("could not create object reference: {0}")]
    Create(String),
    #[error("could not save {filename}: {reason}")]
    Save { filename: String, reason: String },
}

pub trait Router {
    /// Current location, path and query.
    fn location(&self) -> GalleryUrl;
    /// Replace the current location without creating a history entry.
    fn replace(&mut self, url: &GalleryUrl) -> Result<(), NavigationError>;
}

pub trait Document {
    fn set_scroll_locked(&self, locked: bool);
}

/// Handle to a local object created from a downloaded payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectUrl(pub String);

pub trait ObjectStore {
    fn create(&mut self, payload: Vec<u8>, mime: &str) -> Result<ObjectUrl, SaveError>;
    fn save_as(&mut self, object: &ObjectUrl, filename: &str) -> Result<(), SaveError>;
    fn revoke(&mut self, object: &ObjectUrl);
}

/// Scoped interaction lock. The document stays locked for as long as this
/// value lives.
pub struct InteractionLock {
    document: Rc<dyn Document>,
}

impl InteractionLock {
    pub fn acquire(document: Rc<dyn Document>) -> Self {
        document.set_scroll_locked(true);
        Self { document }
    }
}

impl Drop for InteractionLock {
    fn drop(&mut self) {
        self.document.set_scroll_locked(false);
    }
}

impl std::fmt::Debug for InteractionLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("InteractionLock")
    }
}

/// Everything the gallery needs from its environment.
pub struct Platform {
    pub router: Box<dyn Router>,
    pub document: Rc<dyn Document>,
    pub objects: Box<dyn ObjectStore>,
    pub strings: Box<dyn Localizer>,
}

impl Platform {
    /// An in-memory platform starting at `location`, plus handles for
    /// inspecting it.
    pub fn in_memory(location: &str) -> (Self, MemoryHost) {
        let host = MemoryHost {
            router: MemoryRouter::new(location),
            document: MemoryDocument::default(),
            objects: MemoryObjectStore::default(),
        };
        let platform = Platform {
            router: Box::new(host.router.clone()),
            document: Rc::new(host.document.clone()),
            objects: Box::new(host.objects.clone()),
            strings: Box::new(English),
        };
        (platform, host)
    }

    pub fn with_strings(mut self, strings: impl Localizer + 'static) -> Self {
        self.strings = Box::new(strings);
        self
    }
}

/// Inspection handles for an in-memory [`Platform`].
#[derive(Clone)]
pub struct MemoryHost {
    pub router: MemoryRouter,
    pub document: MemoryDocument,
    pub objects: MemoryObjectStore,
}

// ============================================================================
// Router
// ============================================================================

#[derive(Debug, Default)]
struct RouterState {
    current: GalleryUrl,
    back: Vec<GalleryUrl>,
    forward: Vec<GalleryUrl>,
    replaced: Vec<GalleryUrl>,
    reject_replace: bool,
}

/// Browser-like history: `navigate` pushes, `back`/`forward` move, and
/// `replace` overwrites the current entry.
#[derive(Debug, Clone, Default)]
pub struct MemoryRouter {
    state: Rc<RefCell<RouterState>>,
}

impl MemoryRouter {
    pub fn new(location: &str) -> Self {
        let router = Self::default();
        router.state.borrow_mut().current = GalleryUrl::parse(location);
        router
    }

    /// Simulate a user navigation that creates a history entry. Returns the
    /// new location, to be delivered to the gallery as a URL change.
    pub fn navigate(&self, location: &str) -> GalleryUrl {
        let mut state = self.state.borrow_mut();
        let next = GalleryUrl::parse(location);
        let previous = std::mem::replace(&mut state.current, next.clone());
        state.back.push(previous);
        state.forward.clear();
        next
    }

    /// Simulate the back button. `None` if there is no earlier entry.
    pub fn back(&self) -> Option<GalleryUrl> {
        let mut state = self.state.borrow_mut();
        let previous = state.back.pop()?;
        let current = std::mem::replace(&mut state.current, previous.clone());
        state.forward.push(current);
        Some(previous)
    }

    /// Simulate the forward button. `None` if there is no later entry.
    pub fn forward(&self) -> Option<GalleryUrl> {
        let mut state = self.state.borrow_mut();
        let next = state.forward.pop()?;
        let current = std::mem::replace(&mut state.current, next.clone());
        state.back.push(current);
        Some(next)
    }

    /// Make subsequent `replace` calls fail.
    pub fn reject_replace(&self, reject: bool) {
        self.state.borrow_mut().reject_replace = reject;
    }

    /// Every URL successfully written through `replace`, oldest first.
    pub fn replaced(&self) -> Vec<GalleryUrl> {
        self.state.borrow().replaced.clone()
    }

    pub fn history_len(&self) -> usize {
        self.state.borrow().back.len() + 1
    }

    pub fn current(&self) -> GalleryUrl {
        self.state.borrow().current.clone()
    }
}

impl Router for MemoryRouter {
    fn location(&self) -> GalleryUrl {
        self.current()
    }

    fn replace(&mut self, url: &GalleryUrl) -> Result<(), NavigationError> {
        let mut state = self.state.borrow_mut();
        if state.reject_replace {
            return Err(NavigationError(url.to_string()));
        }
        state.current = url.clone();
        state.replaced.push(url.clone());
        Ok(())
    }
}

// ============================================================================
// Document
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    locked: Rc<Cell<bool>>,
    acquisitions: Rc<Cell<usize>>,
}

impl MemoryDocument {
    pub fn is_locked(&self) -> bool {
        self.locked.get()
    }

    /// How many times the lock has been taken.
    pub fn acquisitions(&self) -> usize {
        self.acquisitions.get()
    }
}

impl Document for MemoryDocument {
    fn set_scroll_locked(&self, locked: bool) {
        if locked && !self.locked.get() {
            self.acquisitions.set(self.acquisitions.get() + 1);
        }
        self.locked.set(locked);
    }
}

// ============================================================================
// Object store
// ============================================================================

#[derive(Debug, Default)]
struct ObjectState {
    next: u64,
    live: Vec<(ObjectUrl, Vec<u8>)>,
    saved: Vec<(String, Vec<u8>)>,
    fail_save: bool,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryObjectStore {
    state: Rc<RefCell<ObjectState>>,
}

impl MemoryObjectStore {
    /// Files saved so far, as `(filename, payload)`.
    pub fn saved(&self) -> Vec<(String, Vec<u8>)> {
        self.state.borrow().saved.clone()
    }

    /// Objects created and not yet revoked.
    pub fn live_objects(&self) -> usize {
        self.state.borrow().live.len()
    }

    pub fn fail_saves(&self, fail: bool) {
        self.state.borrow_mut().fail_save = fail;
    }
}

impl ObjectStore for MemoryObjectStore {
    fn create(&mut self, payload: Vec<u8>, _mime: &str) -> Result<ObjectUrl, SaveError> {
        let mut state = self.state.borrow_mut();
        state.next += 1;
        let url = ObjectUrl(format!("blob:memory/{}", state.next));
        state.live.push((url.clone(), payload));
        Ok(url)
    }

    fn save_as(&mut self, object: &ObjectUrl, filename: &str) -> Result<(), SaveError> {
        let mut state = self.state.borrow_mut();
        if state.fail_save {
            return Err(SaveError::Save {
                filename: filename.to_string(),
                reason: "save disabled".into(),
            });
        }
        let payload = state
            .live
            .iter()
            .find(|(url, _)| url == object)
            .map(|(_, payload)| payload.clone())
            .ok_or_else(|| SaveError::Save {
                filename: filename.to_string(),
                reason: format!("{} was revoked", object.0),
            })?;
        state.saved.push((filename.to_string(), payload));
        Ok(())
    }

    fn revoke(&mut self, object: &ObjectUrl) {
        self.state.borrow_mut().live.retain(|(url, _)| url != object);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_does_not_add_history() {
        let mut router = MemoryRouter::new("/gallery");
        router.replace(&GalleryUrl::parse("/gallery?image=a")).unwrap();
        assert_eq!(router.history_len(), 1);
        assert_eq!(router.location().selection(), Some("a"));
        assert_eq!(router.replaced().len(), 1);
    }

    #[test]
    fn back_and_forward() {
        let router = MemoryRouter::new("/gallery");
        router.navigate("/gallery?image=a");
        assert_eq!(router.history_len(), 2);
        assert_eq!(router.back().unwrap().to_string(), "/gallery");
        assert_eq!(router.forward().unwrap().selection(), Some("a"));
        assert!(router.forward().is_none());
    }

    #[test]
    fn rejected_replace_keeps_location() {
        let mut router = MemoryRouter::new("/gallery?image=a");
        router.reject_replace(true);
        assert!(router.replace(&GalleryUrl::parse("/gallery")).is_err());
        assert_eq!(router.location().selection(), Some("a"));
    }

    #[test]
    fn interaction_lock_releases_on_drop() {
        let document = MemoryDocument::default();
        {
            let _lock = InteractionLock::acquire(Rc::new(document.clone()));
            assert!(document.is_locked());
        }
        assert!(!document.is_locked());
        assert_eq!(document.acquisitions(), 1);
    }

    #[test]
    fn revoked_object_cannot_be_saved() {
        let mut store = MemoryObjectStore::default();
        let url = store.create(vec![1, 2, 3], "image/jpeg").unwrap();
        store.revoke(&url);
        assert!(store.save_as(&url, "x.jpg").is_err());
        assert_eq!(store.live_objects(), 0);
    }
}
