use crate::args::Config;
use crate::console::Console;
use crate::matcher::Matcher;
use crate::scanner::{FileEntry, Scanner};
use crate::stats::RenameSummary;
use anyhow::Result;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Paths taken and vacated by earlier renames in the same run
///
/// A dry-run never touches the disk, so collisions are judged against the disk plus
/// these two sets. A real run records the same paths and reaches the same verdicts.
#[derive(Debug, Default)]
struct Claims {
    taken: HashSet<PathBuf>,
    vacated: HashSet<PathBuf>,
}

impl Claims {
    fn is_occupied(&self, path: &Path) -> bool {
        self.taken.contains(path) || (path.exists() && !self.vacated.contains(path))
    }

    fn record(&mut self, from: &Path, to: &Path) {
        self.taken.remove(from);
        self.vacated.insert(from.to_path_buf());
        self.vacated.remove(to);
        self.taken.insert(to.to_path_buf());
    }
}

/// Rename files, then directories, whose name contains the FROM token
///
/// Every file is renamed before the first directory, and directories go children
/// first, so no rename is attempted on a path an earlier rename has moved.
///
/// # Arguments
/// * `config` - Validated configuration (rename mode)
/// * `console` - Output policy
///
/// # Returns
/// * `Result<RenameSummary>` - Counts of renamed, planned and failed entries
pub fn rename_tree(config: &Config, console: &Console) -> Result<RenameSummary> {
    let matcher = Matcher::new(&config.from, true)?;
    let scanner = Scanner::from_config(config, *console);
    let mut summary = RenameSummary::default();
    let mut claims = Claims::default();

    let files = scanner.files(&config.extensions, |e| matcher.occurs(&e.name));
    for entry in &files {
        rename_entry(entry, &matcher, config, console, &mut claims, &mut summary);
    }

    let dirs = scanner.dirs_deepest_first(|e| matcher.occurs(&e.name));
    for entry in &dirs {
        rename_entry(entry, &matcher, config, console, &mut claims, &mut summary);
    }

    Ok(summary)
}

/// Rename one file or directory in place
fn rename_entry(
    entry: &FileEntry,
    matcher: &Matcher,
    config: &Config,
    console: &Console,
    claims: &mut Claims,
    summary: &mut RenameSummary,
) {
    // Names that are not valid UTF-8 would come back with U+FFFD in them
    let Some(name) = entry.path.file_name().and_then(|n| n.to_str()) else {
        tracing::trace!(path = %entry.path.display(), "skipping name that is not UTF-8");
        return;
    };

    let new_name = matcher.replace_all(name, &config.to);
    if new_name == name {
        return;
    }

    let parent = entry.path.parent().unwrap_or(Path::new(""));
    let new_path = parent.join(&*new_name);

    // Skip if the new path already exists or an earlier rename claimed it
    if claims.is_occupied(&new_path) {
        console.warn(format!(
            "Cannot rename {} to {}: target already exists",
            entry.path.display(),
            new_path.display()
        ));
        summary.failed += 1;
        return;
    }

    if config.options.dry_run {
        console.planned(format!(
            "Rename: {} -> {}",
            entry.path.display(),
            new_path.display()
        ));
        claims.record(&entry.path, &new_path);
        summary.planned += 1;
        return;
    }

    match fs::rename(&entry.path, &new_path) {
        Ok(()) => {
            console.action(format!(
                "Renamed: {} -> {}",
                entry.path.display(),
                new_path.display()
            ));
            claims.record(&entry.path, &new_path);
            summary.renamed += 1;
        }
        Err(err) => {
            console.warn(format!(
                "Cannot rename {} to {}: {}",
                entry.path.display(),
                new_path.display(),
                err
            ));
            summary.failed += 1;
        }
    }
}
