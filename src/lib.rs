//! Recursive rename, replace, search, list, undo and delete rooted at one directory.
//!
//! Content replacement is line based and commits each file with an atomic rename of
//! a staging file, optionally keeping a `.bak` copy that `undo` moves back later.

pub mod args;
pub mod backup;
pub mod console;
pub mod matcher;
pub mod pruner;
pub mod renamer;
pub mod replacer;
pub mod scanner;
pub mod search;
pub mod sniffer;
pub mod stats;
pub mod transform;

use anyhow::Result;
use args::{Config, Mode};
use console::Console;

/// Run the operation selected by `config` and print its summary
///
/// # Arguments
/// * `config` - Validated configuration
///
/// # Returns
/// * `Result<()>` - Errors only for failures detected before the walk starts
pub fn run(config: &Config) -> Result<()> {
    let console = Console::new(config.options.quiet, config.options.verbose);
    tracing::debug!(mode = %config.mode, root = %config.root.display(), "starting");

    match config.mode {
        Mode::Rename => {
            let summary = renamer::rename_tree(config, &console)?;
            console.summary(summary);
        }
        Mode::Replace => {
            let summary = replacer::replace_tree(config, &console)?;
            console.summary(summary);
        }
        Mode::Search => {
            let pattern = search::SearchPattern::from_config(config)?;
            let stats = search::search_tree(config, &pattern, &console);
            console.summary(stats);
        }
        Mode::List => {
            let summary = pruner::list_tree(config, &console)?;
            console.summary(summary);
        }
        Mode::Undo => {
            let summary = backup::undo_tree(config, &console);
            console.summary(summary);
        }
        Mode::Delete => {
            let summary = pruner::delete_tree(config, &console)?;
            console.summary(summary);
        }
    }

    Ok(())
}
