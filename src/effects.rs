//! Side effects triggered from the lightbox: share, gated download, and the
//! donation prompt.
//!
//! Each effect is independent and none of them touches the selection or the
//! carousel. Failures become user-visible [`Notification`]s; nothing is
//! retried here.
//!
//! ## Download
//!
//! Downloading opens the donation prompt immediately and, in parallel, asks
//! the host to fetch the image. The two never gate each other: dismissing the
//! prompt does not cancel the fetch, and a failed fetch does not close the
//! prompt. When the payload arrives it is turned into a local object reference
//! and saved under a filename derived from the artwork title, then the
//! reference is revoked. A payload that arrives after the selection moved on
//! is dropped.

use crate::config::GalleryConfig;
use crate::host::{ObjectStore, ObjectUrl, SaveError};
use crate::i18n::{Localizer, text};
use crate::naming::download_filename;
use crate::types::{ArtworkId, ArtworkRecord};
use crate::url::share_link;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("clipboard write failed: {0}")]
pub struct ClipboardError(pub String);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP status {0}")]
    Status(u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Error,
}

/// A transient, dismissible message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

/// A pending image retrieval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub id: u64,
    pub artwork: ArtworkId,
    /// Remote image reference to fetch.
    pub source: String,
    /// Filename to save under.
    pub filename: String,
}

#[derive(Debug, Default)]
pub struct Effects {
    prompt_visible: bool,
    notifications: Vec<Notification>,
    next_request: u64,
}

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prompt_visible(&self) -> bool {
        self.prompt_visible
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// The canonical link to place on the clipboard for `record`.
    pub fn share_text(&self, record: &ArtworkRecord, config: &GalleryConfig) -> String {
        share_link(&config.origin, &config.base_path, record.id.as_str())
    }

    pub fn clipboard_written(
        &mut self,
        result: Result<(), ClipboardError>,
        strings: &dyn Localizer,
    ) {
        let notification = match result {
            Ok(()) => Notification {
                kind: NotificationKind::Info,
                title: text(strings, "toast.linkCopied.title", "Link copied"),
                description: text(
                    strings,
                    "toast.linkCopied.description",
                    "The artwork link has been copied to your clipboard.",
                ),
            },
            Err(err) => {
                info!(error = %err, "Share link could not be copied");
                Notification {
                    kind: NotificationKind::Error,
                    title: text(strings, "toast.copyFailed.title", "Copy failed"),
                    description: text(
                        strings,
                        "toast.copyFailed.description",
                        "Could not copy the link. Please copy it from the address bar.",
                    ),
                }
            }
        };
        self.notifications.push(notification);
    }

    /// Open the donation prompt and build the retrieval request for `record`.
    pub fn begin_download(
        &mut self,
        record: &ArtworkRecord,
        config: &GalleryConfig,
    ) -> DownloadRequest {
        self.prompt_visible = true;
        self.next_request += 1;
        let request = DownloadRequest {
            id: self.next_request,
            artwork: record.id.clone(),
            source: record.image.clone(),
            filename: download_filename(record, &config.download.extension),
        };
        info!(artwork = %request.artwork, filename = %request.filename, "Download requested");
        request
    }

    /// Finish a retrieval. `still_selected` is whether the request's artwork
    /// is still the selected one; if not, the payload is discarded.
    pub fn finish_download(
        &mut self,
        request: &DownloadRequest,
        result: Result<Vec<u8>, FetchError>,
        still_selected: bool,
        store: &mut dyn ObjectStore,
        mime: &str,
        strings: &dyn Localizer,
    ) {
        let payload = match result {
            Ok(payload) => payload,
            Err(err) => {
                warn!(artwork = %request.artwork, error = %err, "Image retrieval failed");
                self.push_download_failed(strings);
                return;
            }
        };
        if !still_selected {
            debug!(
                artwork = %request.artwork,
                "Selection changed during download; dropping payload"
            );
            return;
        }
        if let Err(err) = save_payload(store, payload, mime, &request.filename) {
            warn!(artwork = %request.artwork, error = %err, "Saving download failed");
            self.push_download_failed(strings);
        }
    }

    pub fn dismiss_prompt(&mut self) {
        self.prompt_visible = false;
    }

    fn push_download_failed(&mut self, strings: &dyn Localizer) {
        self.notifications.push(Notification {
            kind: NotificationKind::Error,
            title: text(strings, "toast.downloadFailed.title", "Download failed"),
            description: text(
                strings,
                "toast.downloadFailed.description",
                "The image could not be downloaded. Please try again.",
            ),
        });
    }
}

/// Revokes its object reference when dropped, whatever happened in between.
struct ObjectGuard<'s> {
    store: &'s mut dyn ObjectStore,
    object: ObjectUrl,
}

impl Drop for ObjectGuard<'_> {
    fn drop(&mut self) {
        self.store.revoke(&self.object);
    }
}

fn save_payload(
    store: &mut dyn ObjectStore,
    payload: Vec<u8>,
    mime: &str,
    filename: &str,
) -> Result<(), SaveError> {
    let object = store.create(payload, mime)?;
    let guard = ObjectGuard { store, object };
    guard.store.save_as(&guard.object, filename)
}
