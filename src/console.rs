use std::fmt::Display;

pub const DRY_RUN_PREFIX: &str = "[dry-run] ";

/// User-facing output policy
///
/// `quiet` hides per-item actions and details. Results, warnings and summaries
/// are always printed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Console {
    quiet: bool,
    verbose: bool,
}

impl Console {
    pub fn new(quiet: bool, verbose: bool) -> Self {
        Self { quiet, verbose }
    }

    /// A console that only prints warnings, results and summaries
    pub fn silent() -> Self {
        Self::new(true, false)
    }

    /// Something was changed on disk
    pub fn action(&self, message: impl Display) {
        if !self.quiet {
            println!("{}", message);
        }
    }

    /// Something would have been changed on disk
    pub fn planned(&self, message: impl Display) {
        if !self.quiet {
            println!("{}{}", DRY_RUN_PREFIX, message);
        }
    }

    pub fn detail(&self, message: impl Display) {
        if self.verbose && !self.quiet {
            println!("{}", message);
        }
    }

    /// A search hit or listed path
    pub fn result(&self, message: impl Display) {
        println!("{}", message);
    }

    pub fn warn(&self, message: impl Display) {
        eprintln!("Warning: {}", message);
    }

    pub fn summary(&self, message: impl Display) {
        println!("{}", message);
    }
}
