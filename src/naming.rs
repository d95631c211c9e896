//! Filename derivation for downloaded artwork files.
//!
//! A download is saved under a name built from the artwork title rather than
//! the remote resource name, so "The Sower (1888)" becomes
//! `the-sower-1888.jpg`:
//!
//! - letters and digits are kept (any script), lowercased
//! - every other run of characters becomes a single dash
//! - leading and trailing dashes are stripped
//! - the stem is truncated at a dash boundary past [`MAX_STEM_LEN`] characters
//!
//! Titles that normalize to nothing (empty, punctuation only) fall back to the
//! artwork id, and to `artwork` if the id itself normalizes to nothing.

use crate::types::ArtworkRecord;

pub const MAX_STEM_LEN: usize = 80;

const FALLBACK_STEM: &str = "artwork";

/// Normalize a title into a filename stem.
pub fn normalize_stem(title: &str) -> String {
    let mut stem = String::with_capacity(title.len());
    let mut prev_dash = true;
    for c in title.chars() {
        if c.is_alphanumeric() {
            stem.extend(c.to_lowercase());
            prev_dash = false;
        } else if !prev_dash {
            stem.push('-');
            prev_dash = true;
        }
    }
    let trimmed = stem.trim_end_matches('-');

    if trimmed.chars().count() <= MAX_STEM_LEN {
        return trimmed.to_string();
    }
    let cut = trimmed
        .char_indices()
        .nth(MAX_STEM_LEN)
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());
    let truncated = &trimmed[..cut];
    match truncated.rfind('-') {
        Some(pos) if pos > 0 => truncated[..pos].to_string(),
        _ => truncated.to_string(),
    }
}

/// Filename used when saving `record`'s image, e.g. `the-sower-1888.jpg`.
pub fn download_filename(record: &ArtworkRecord, extension: &str) -> String {
    let stem = [record.title.as_str(), record.id.as_str()]
        .into_iter()
        .map(normalize_stem)
        .find(|s| !s.is_empty())
        .unwrap_or_else(|| FALLBACK_STEM.to_string());
    let extension = extension.trim_start_matches('.');
    format!("{stem}.{extension}")
}
