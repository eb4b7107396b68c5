//! Song cache naming and layout.
//!
//! A cached track is identified purely by its sanitized filename; existence
//! of that file is "already cached". There is no expiry and no overwrite —
//! invalidation is deleting the file.

use crate::search::{UNKNOWN_AUTHOR, UNKNOWN_TITLE};
use std::path::{Path, PathBuf};

/// Strip characters that are unsafe in filenames.
///
/// Keeps Unicode alphanumerics plus space, `-`, `_`, `(`, `)` and trims the
/// ends. Applying it twice yields the same string.
pub fn sanitize_component(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_' | '(' | ')'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Filename stem for a track: `"{title} - {author}"`.
///
/// Components that sanitize to nothing are replaced by the fixed
/// placeholders, so the stem is never empty.
pub fn track_stem(title: &str, author: &str) -> String {
    let mut title = sanitize_component(title);
    if title.is_empty() {
        title = UNKNOWN_TITLE.to_string();
    }
    let mut author = sanitize_component(author);
    if author.is_empty() {
        author = UNKNOWN_AUTHOR.to_string();
    }
    format!("{} - {}", title, author)
}

/// Final cache path for a stem.
pub fn target_path(songs_dir: &Path, stem: &str) -> PathBuf {
    songs_dir.join(format!("{stem}.mp3"))
}

/// Staging path for an in-flight download of a stem.
pub fn temp_path(temp_dir: &Path, stem: &str) -> PathBuf {
    temp_dir.join(format!("{stem}.temp"))
}
