use crate::scanner::ExtensionFilter;
use anyhow::{anyhow, bail, Result};
use clap::{Parser, ValueEnum};
use std::fmt;
use std::path::PathBuf;

/// Operation selected by the first positional argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Rename,  // rename files, then folders deepest-first
    Replace, // substitute inside file contents
    Search,  // report matching lines or files
    List,    // report files whose name matches
    Undo,    // restore .bak backups
    Delete,  // report or remove files whose name matches
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Rename => "rename",
            Mode::Replace => "replace",
            Mode::Search => "search",
            Mode::List => "list",
            Mode::Undo => "undo",
            Mode::Delete => "delete",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Command line arguments parser
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Recursive rename, replace, search, list, undo and delete rooted at a directory"
)]
#[command(name = "treesub", arg_required_else_help = true)]
#[command(after_help = "Positional arguments per mode:\n  \
    rename  FROM TO DIR [EXT...]\n  \
    replace FROM TO DIR EXT...\n  \
    search  FROM DIR [EXT...]\n  \
    list    FROM DIR [EXT...]\n  \
    undo    DIR [EXT...]\n  \
    delete  FROM DIR [EXT...]")]
pub struct Args {
    /// Operation to perform
    #[arg(value_enum)]
    pub mode: Mode,

    /// FROM, TO, DIR and extensions, depending on MODE
    #[arg(value_name = "ARGS")]
    pub values: Vec<String>,

    /// Only report what would change (rename, replace, undo, delete)
    #[arg(short = 'n', long = "dry-run")]
    pub dry_run: bool,

    /// Print per-file details
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Keep a .bak copy of every file changed by replace
    #[arg(short = 'b', long = "backup")]
    pub backup: bool,

    /// Only print results, warnings and the summary
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Print matching file names instead of matching lines (search)
    #[arg(short = 'l', long = "filenames-only")]
    pub filenames_only: bool,

    /// Match letter case exactly (search)
    #[arg(short = 's', long = "case-sensitive")]
    pub case_sensitive: bool,

    /// Treat FROM as a regular expression (search)
    #[arg(short = 'e', long = "regex")]
    pub regex: bool,

    /// Actually remove matched files (delete)
    #[arg(short = 'f', long = "force")]
    pub force: bool,

    /// Ignore letter case when replacing (replace)
    #[arg(short = 'i', long = "ignore-case")]
    pub ignore_case: bool,

    /// Print a diagnostic trace to stderr (filter with RUST_LOG)
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,

    /// Skip files matched by .gitignore and hidden entries while walking
    #[arg(long = "git-ignore")]
    pub git_ignore: bool,
}

/// Boolean switches shared by every operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    pub dry_run: bool,
    pub verbose: bool,
    pub backup: bool,
    pub quiet: bool,
    pub filenames_only: bool,
    pub case_sensitive_search: bool,
    pub regex_search: bool,
    pub force: bool,
    pub ignore_case_replace: bool,
    pub debug: bool,
    pub git_ignore: bool,
}

/// Validated, immutable run configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    pub from: String,
    pub to: String,
    pub root: PathBuf,
    pub extensions: ExtensionFilter,
    pub options: Options,
}

impl Config {
    /// Build a configuration for `mode` without going through the command line
    pub fn new(mode: Mode, from: &str, to: &str, root: impl Into<PathBuf>) -> Self {
        Self {
            mode,
            from: from.to_string(),
            to: to.to_string(),
            root: root.into(),
            extensions: ExtensionFilter::default(),
            options: Options::default(),
        }
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = ExtensionFilter::new(extensions);
        self
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Interpret the positional arguments for the selected mode and validate them
    ///
    /// # Arguments
    /// * `args` - Parsed command line arguments
    ///
    /// # Returns
    /// * `Result<Config>` - The configuration, or the first validation error
    pub fn from_args(args: Args) -> Result<Self> {
        let mode = args.mode;
        let mut values = args.values.into_iter();
        let mut next = |name: &str| {
            values
                .next()
                .ok_or_else(|| anyhow!("Missing {} argument for {} mode", name, mode))
        };

        let (from, to, dir) = match mode {
            Mode::Rename | Mode::Replace => {
                let from = next("FROM")?;
                let to = next("TO")?;
                let dir = next("DIR")?;
                (from, to, dir)
            }
            Mode::Search | Mode::List | Mode::Delete => {
                let from = next("FROM")?;
                let dir = next("DIR")?;
                (from, String::new(), dir)
            }
            Mode::Undo => (String::new(), String::new(), next("DIR")?),
        };

        let options = Options {
            dry_run: args.dry_run,
            verbose: args.verbose,
            backup: args.backup,
            quiet: args.quiet,
            filenames_only: args.filenames_only,
            case_sensitive_search: args.case_sensitive,
            regex_search: args.regex,
            force: args.force,
            ignore_case_replace: args.ignore_case,
            debug: args.debug,
            git_ignore: args.git_ignore,
        };
        note_ignored_flags(mode, &options);

        let config = Config {
            mode,
            from,
            to,
            root: PathBuf::from(dir),
            extensions: ExtensionFilter::new(values),
            options,
        };
        config.validate()?;

        Ok(config)
    }

    /// Check the invariants every operation relies on
    pub fn validate(&self) -> Result<()> {
        if matches!(self.mode, Mode::Rename | Mode::Replace) && self.from.is_empty() {
            bail!("Empty FROM string is not allowed in {} mode", self.mode);
        }

        if self.mode == Mode::Replace && self.extensions.is_empty() {
            bail!("Replace mode requires at least one file extension, e.g. `txt` or `.rs`");
        }

        if !self.root.is_dir() {
            bail!("Directory does not exist: {}", self.root.display());
        }

        Ok(())
    }
}

/// Flags that only apply to other modes are accepted and ignored
fn note_ignored_flags(mode: Mode, options: &Options) {
    let dry_run_applies = matches!(mode, Mode::Rename | Mode::Replace | Mode::Undo | Mode::Delete);
    let scoped = [
        ("dry-run", options.dry_run, dry_run_applies),
        ("backup", options.backup, mode == Mode::Replace),
        ("ignore-case", options.ignore_case_replace, mode == Mode::Replace),
        ("filenames-only", options.filenames_only, mode == Mode::Search),
        ("case-sensitive", options.case_sensitive_search, mode == Mode::Search),
        ("regex", options.regex_search, mode == Mode::Search),
        ("force", options.force, mode == Mode::Delete),
    ];

    for (flag, set, applies) in scoped {
        if set && !applies {
            tracing::debug!(flag, %mode, "flag has no effect in this mode");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(dir: &TempDir, argv: &[&str]) -> Result<Config> {
        let root = dir.path().to_string_lossy().to_string();
        let argv: Vec<String> = std::iter::once("treesub".to_string())
            .chain(argv.iter().map(|a| a.replace("{dir}", &root)))
            .collect();
        Config::from_args(Args::try_parse_from(argv)?)
    }

    #[test]
    fn test_replace_positionals_and_flags() {
        let dir = TempDir::new().unwrap();
        let argv = ["replace", "old", "new", "{dir}", "txt", ".md", "-b", "--dry-run"];
        let config = parse(&dir, &argv).unwrap();

        assert_eq!(config.mode, Mode::Replace);
        assert_eq!(config.from, "old");
        assert_eq!(config.to, "new");
        assert_eq!(config.root, dir.path());
        assert!(config.extensions.allows(std::path::Path::new("a.md")));
        assert!(config.options.backup);
        assert!(config.options.dry_run);
        assert!(!config.options.force);
    }

    #[test]
    fn test_search_and_undo_positionals() {
        let dir = TempDir::new().unwrap();
        let search = parse(&dir, &["search", "needle", "{dir}", "-l", "-s"]).unwrap();
        assert_eq!(search.from, "needle");
        assert!(search.to.is_empty());
        assert!(search.extensions.is_empty());
        assert!(search.options.filenames_only);
        assert!(search.options.case_sensitive_search);

        let undo = parse(&dir, &["undo", "{dir}"]).unwrap();
        assert!(undo.from.is_empty());
        assert_eq!(undo.root, dir.path());
    }

    #[test]
    fn test_replace_requires_extension() {
        let dir = TempDir::new().unwrap();
        let err = parse(&dir, &["replace", "a", "b", "{dir}"]).unwrap_err();
        assert!(err.to_string().contains("extension"));
    }

    #[test]
    fn test_rename_requires_to_and_dir() {
        let dir = TempDir::new().unwrap();
        let err = parse(&dir, &["rename", "a", "b"]).unwrap_err();
        assert!(err.to_string().contains("Missing DIR"));
    }

    #[test]
    fn test_empty_from_rejected_for_rename() {
        let dir = TempDir::new().unwrap();
        assert!(parse(&dir, &["rename", "", "b", "{dir}"]).is_err());
        assert!(parse(&dir, &["list", "", "{dir}"]).is_ok());
    }

    #[test]
    fn test_missing_directory_rejected() {
        let dir = TempDir::new().unwrap();
        let err = parse(&dir, &["list", "x", "{dir}/nope"]).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_unknown_mode_rejected_by_parser() {
        assert!(Args::try_parse_from(["treesub", "explode", "x", "."]).is_err());
    }
}
