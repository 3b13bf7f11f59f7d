use crate::backup;
use crate::console::Console;
use crate::matcher::Matcher;
use crate::sniffer;
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Suffix of the staging file written next to the target before it is committed
pub const STAGING_SUFFIX: &str = ".tmp";

/// Outcome of transforming one file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformResult {
    Unchanged,
    WouldChange,
    Changed,
    WriteFailed,
    SkippedBinary,
    SkippedMissing,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TransformOptions {
    pub backup: bool,
    pub dry_run: bool,
}

/// Apply the replacement to every line of `content`
///
/// Each line keeps its own terminator (`\n`, `\r\n` or none for a last line without
/// one), so the output has exactly as many lines as the input.
pub fn transform_lines(content: &str, matcher: &Matcher, to: &str) -> String {
    let mut staged = String::with_capacity(content.len());

    for line in content.split_inclusive('\n') {
        let (body, ending) = split_ending(line);
        staged.push_str(&matcher.replace_all(body, to));
        staged.push_str(ending);
    }

    staged
}

fn split_ending(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}

/// Replace `matcher`'s token with `to` inside one file
///
/// The original file is only touched by the final rename of the staging file over it.
///
/// # Arguments
/// * `path` - File to transform
/// * `matcher` - Token to replace
/// * `to` - Replacement text
/// * `options` - Backup and dry-run switches
/// * `console` - Output policy for warnings
///
/// # Returns
/// * `TransformResult` - What happened to the file
pub fn transform(
    path: &Path,
    matcher: &Matcher,
    to: &str,
    options: TransformOptions,
    console: &Console,
) -> TransformResult {
    if !path.is_file() {
        tracing::debug!(path = %path.display(), "file vanished before transform");
        return TransformResult::SkippedMissing;
    }

    let original = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "unreadable, skipping");
            return TransformResult::SkippedBinary;
        }
    };
    if !sniffer::looks_like_text(&original) {
        tracing::debug!(path = %path.display(), "not text, skipping");
        return TransformResult::SkippedBinary;
    }
    let Ok(content) = std::str::from_utf8(&original) else {
        return TransformResult::SkippedBinary;
    };

    let staged = transform_lines(content, matcher, to);
    if staged.as_bytes() == original.as_slice() {
        return TransformResult::Unchanged;
    }

    if options.dry_run {
        return TransformResult::WouldChange;
    }

    write_back(path, staged.as_bytes(), options.backup, console)
}

/// Back up `path` when asked, then commit `content` over it
///
/// A failed backup is a warning and the write still goes ahead.
fn write_back(path: &Path, content: &[u8], backup: bool, console: &Console) -> TransformResult {
    if backup {
        if let Err(err) = backup::create_backup(path) {
            console.warn(format!("Cannot back up {}: {}", path.display(), err));
        }
    }

    match commit(path, content) {
        Ok(()) => TransformResult::Changed,
        Err(err) => {
            console.warn(format!("{:#}", err));
            TransformResult::WriteFailed
        }
    }
}

/// Write `content` to a uniquely named staging file beside `path`, then rename it over
/// `path`. The staging file is removed on every failure path.
fn commit(path: &Path, content: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut staging = tempfile::Builder::new()
        .prefix(&format!(".{}.", name))
        .suffix(STAGING_SUFFIX)
        .tempfile_in(dir)
        .with_context(|| format!("Failed to create staging file for {}", path.display()))?;

    staging
        .write_all(content)
        .and_then(|()| staging.as_file().sync_all())
        .with_context(|| format!("Failed to write staging file for {}", path.display()))?;

    if let Ok(meta) = fs::metadata(path) {
        if let Err(err) = fs::set_permissions(staging.path(), meta.permissions()) {
            tracing::debug!(path = %path.display(), error = %err, "could not copy permissions");
        }
    }

    tracing::trace!(staging = %staging.path().display(), target = %path.display(), "committing");
    staging
        .persist(path)
        .map_err(|err| err.error)
        .with_context(|| format!("Failed to replace {}", path.display()))?;

    Ok(())
}
