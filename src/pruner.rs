use crate::args::Config;
use crate::console::Console;
use crate::matcher::Matcher;
use crate::scanner::{FileEntry, Scanner};
use crate::stats::{DeleteSummary, ListSummary};
use anyhow::Result;
use std::fs;

/// Files whose name contains FROM, ignoring case
fn matching_files(config: &Config, console: &Console) -> Result<Vec<FileEntry>> {
    let matcher = Matcher::new(&config.from, false)?;
    let scanner = Scanner::from_config(config, *console);
    Ok(scanner.files(&config.extensions, |e| matcher.occurs(&e.name)))
}

/// Print every file whose name contains FROM
pub fn list_tree(config: &Config, console: &Console) -> Result<ListSummary> {
    let files = matching_files(config, console)?;
    for entry in &files {
        console.result(entry.path.display());
    }

    Ok(ListSummary {
        matched: files.len() as u64,
    })
}

/// Remove every file whose name contains FROM
///
/// Nothing is removed unless `force` is set, and `dry_run` wins over `force`.
///
/// # Arguments
/// * `config` - Validated configuration (delete mode)
/// * `console` - Output policy
///
/// # Returns
/// * `Result<DeleteSummary>` - Matched, deleted and failed counts
pub fn delete_tree(config: &Config, console: &Console) -> Result<DeleteSummary> {
    let files = matching_files(config, console)?;
    let remove = config.options.force && !config.options.dry_run;
    let mut summary = DeleteSummary {
        matched: files.len() as u64,
        ..DeleteSummary::default()
    };

    for entry in &files {
        if !remove {
            console.planned(format!("Delete: {}", entry.path.display()));
            continue;
        }

        match fs::remove_file(&entry.path) {
            Ok(()) => {
                console.action(format!("Deleted: {}", entry.path.display()));
                summary.deleted += 1;
            }
            Err(err) => {
                console.warn(format!("Cannot delete {}: {}", entry.path.display(), err));
                summary.failed += 1;
            }
        }
    }

    if !remove && summary.matched > 0 {
        console.detail("Use --force to delete the files listed above");
    }

    Ok(summary)
}
