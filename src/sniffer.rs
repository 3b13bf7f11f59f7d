use std::fs;
use std::path::Path;

/// Check whether a file looks like editable text
///
/// Unreadable files are reported as not text; this never fails.
pub fn is_probably_text(path: &Path) -> bool {
    match fs::read(path) {
        Ok(bytes) => looks_like_text(&bytes),
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "unreadable, treating as binary");
            false
        }
    }
}

/// Classify raw file contents
///
/// Text means valid UTF-8 without NUL bytes where at least one line carries a
/// non-control character. Empty input is not text.
pub fn looks_like_text(bytes: &[u8]) -> bool {
    if bytes.contains(&0) {
        return false;
    }
    let Ok(content) = std::str::from_utf8(bytes) else {
        return false;
    };
    content
        .lines()
        .any(|line| line.chars().any(|c| !c.is_control()))
}
