use crate::args::Config;
use crate::console::Console;
use crate::matcher::Matcher;
use crate::scanner::Scanner;
use crate::stats::ReplaceSummary;
use crate::transform::{self, TransformOptions, TransformResult};
use anyhow::Result;

/// Replace content in every extension-matching file under the root
///
/// # Arguments
/// * `config` - Validated configuration (replace mode)
/// * `console` - Output policy
///
/// # Returns
/// * `Result<ReplaceSummary>` - Per-result counts; only fails if the matcher cannot be built
pub fn replace_tree(config: &Config, console: &Console) -> Result<ReplaceSummary> {
    let matcher = Matcher::new(&config.from, !config.options.ignore_case_replace)?;
    let options = TransformOptions {
        backup: config.options.backup,
        dry_run: config.options.dry_run,
    };

    let files = Scanner::from_config(config, *console).files(&config.extensions, |_| true);
    let mut summary = ReplaceSummary::default();

    for entry in files {
        summary.scanned += 1;
        let path = entry.path.display();

        match transform::transform(&entry.path, &matcher, &config.to, options, console) {
            TransformResult::Changed => {
                summary.changed += 1;
                console.action(format!("Modified: {}", path));
            }
            TransformResult::WouldChange => {
                summary.would_change += 1;
                console.planned(format!("Would modify: {}", path));
            }
            TransformResult::Unchanged => {
                summary.unchanged += 1;
                console.detail(format!("Unchanged: {}", path));
            }
            TransformResult::SkippedBinary | TransformResult::SkippedMissing => {
                summary.skipped += 1;
                console.detail(format!("Skipped: {}", path));
            }
            TransformResult::WriteFailed => summary.failed += 1,
        }
    }

    if summary.touched() == 0 && summary.failed == 0 {
        console.detail(format!(
            "No replacements were made. Check if {:?} exists in the files.",
            config.from
        ));
    }

    Ok(summary)
}
