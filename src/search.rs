use crate::args::Config;
use crate::console::Console;
use crate::matcher::Matcher;
use crate::scanner::Scanner;
use crate::sniffer;
use crate::stats::SearchStats;
use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// What a line is tested against
#[derive(Debug, Clone)]
pub enum SearchPattern {
    Literal(Matcher),
    Regex(Regex),
}

impl SearchPattern {
    /// Build the pattern; fails on an invalid regular expression
    pub fn new(pattern: &str, regex: bool, case_sensitive: bool) -> Result<Self> {
        if regex {
            let re = RegexBuilder::new(pattern)
                .case_insensitive(!case_sensitive)
                .build()
                .with_context(|| format!("Invalid regular expression: {}", pattern))?;
            Ok(SearchPattern::Regex(re))
        } else {
            Ok(SearchPattern::Literal(Matcher::new(pattern, case_sensitive)?))
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.from,
            config.options.regex_search,
            config.options.case_sensitive_search,
        )
    }

    pub fn is_match(&self, line: &str) -> bool {
        match self {
            SearchPattern::Literal(matcher) => matcher.occurs(line),
            SearchPattern::Regex(re) => re.is_match(line),
        }
    }
}

/// One hit: a file, or a line within it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMatch {
    pub path: PathBuf,
    pub line_number: Option<usize>,
    pub line: Option<String>,
}

impl fmt::Display for SearchMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.line_number, &self.line) {
            (Some(number), Some(line)) => write!(f, "{}:{}:{}", self.path.display(), number, line),
            _ => write!(f, "{}", self.path.display()),
        }
    }
}

/// Collect the matching lines of one file (1-based line numbers)
pub fn search_file(path: &Path, pattern: &SearchPattern) -> Result<Vec<SearchMatch>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    Ok(search_text(path, &content, pattern))
}

/// Match `content`, already read from `path`, line by line
pub fn search_text(path: &Path, content: &str, pattern: &SearchPattern) -> Vec<SearchMatch> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| pattern.is_match(line))
        .map(|(index, line)| SearchMatch {
            path: path.to_path_buf(),
            line_number: Some(index + 1),
            line: Some(line.to_string()),
        })
        .collect()
}

/// Search every candidate file under the root and print the hits
///
/// Every candidate counts towards `files_scanned`. `matches_total` counts matching
/// files in filenames-only mode and matching lines otherwise.
///
/// # Arguments
/// * `config` - Validated configuration (search mode)
/// * `pattern` - Compiled search pattern
/// * `console` - Output policy
///
/// # Returns
/// * `SearchStats` - Counters for this run
pub fn search_tree(config: &Config, pattern: &SearchPattern, console: &Console) -> SearchStats {
    let files = Scanner::from_config(config, *console).files(&config.extensions, |_| true);
    let mut stats = SearchStats::default();

    for entry in files {
        stats.files_scanned += 1;

        // One read per file: the bytes are sniffed, then searched as text
        let bytes = match fs::read(&entry.path) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::debug!(path = %entry.path.display(), error = %err, "search skipped file");
                continue;
            }
        };
        let content = match std::str::from_utf8(&bytes) {
            Ok(content) if sniffer::looks_like_text(&bytes) => content,
            _ => {
                console.detail(format!("Skipped: {}", entry.path.display()));
                continue;
            }
        };

        let matches = search_text(&entry.path, content, pattern);
        if matches.is_empty() {
            continue;
        }

        if config.options.filenames_only {
            stats.matches_total += 1;
            console.result(entry.path.display());
        } else {
            stats.matches_total += matches.len() as u64;
            for hit in &matches {
                console.result(hit);
            }
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::{Mode, Options};
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("one.txt"), "Apple pie\napple tart\nbanana\n").unwrap();
        fs::write(dir.path().join("two.txt"), "no fruit here\n").unwrap();
        fs::write(dir.path().join("three.md"), "apple\n").unwrap();
        fs::write(dir.path().join("blob.bin"), b"apple\0").unwrap();
        dir
    }

    fn config(dir: &TempDir, from: &str, options: Options) -> Config {
        Config::new(Mode::Search, from, "", dir.path()).with_options(options)
    }

    #[test]
    fn test_search_file_reports_line_numbers() {
        let dir = fixture();
        let pattern = SearchPattern::new("apple", false, true).unwrap();
        let hits = search_file(&dir.path().join("one.txt"), &pattern).unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].line_number, Some(2));
        assert_eq!(
            hits[0].to_string(),
            format!("{}:2:apple tart", dir.path().join("one.txt").display())
        );
    }

    #[test]
    fn test_search_text_matches_in_memory_content() {
        let pattern = SearchPattern::new("needle", false, false).unwrap();
        let path = Path::new("virtual.txt");

        let hits = search_text(path, "hay\r\nNEEDLE here\nhay\nneedle\n", &pattern);
        let lines: Vec<usize> = hits.iter().filter_map(|h| h.line_number).collect();
        assert_eq!(lines, vec![2, 4]);
        assert_eq!(hits[0].line.as_deref(), Some("NEEDLE here"));
        assert_eq!(hits[0].path, path);
    }

    #[test]
    fn test_unreadable_and_binary_files_are_scanned_not_searched() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("latin1.txt"), b"apple \xe9\n").unwrap();
        fs::write(dir.path().join("blank.txt"), b"\n\n").unwrap();
        fs::write(dir.path().join("good.txt"), "apple\n").unwrap();
        let config = config(&dir, "apple", Options::default());
        let pattern = SearchPattern::from_config(&config).unwrap();

        let stats = search_tree(&config, &pattern, &Console::silent());
        assert_eq!(stats, SearchStats { files_scanned: 3, matches_total: 1 });
    }

    #[test]
    fn test_full_mode_counts_lines() {
        let dir = fixture();
        let config = config(&dir, "apple", Options::default());
        let pattern = SearchPattern::from_config(&config).unwrap();

        let stats = search_tree(&config, &pattern, &Console::silent());
        assert_eq!(stats, SearchStats { files_scanned: 4, matches_total: 3 });
    }

    #[test]
    fn test_filenames_only_counts_files() {
        let dir = fixture();
        let config = config(&dir, "apple", Options {
            filenames_only: true,
            ..Options::default()
        });
        let pattern = SearchPattern::from_config(&config).unwrap();

        let stats = search_tree(&config, &pattern, &Console::silent());
        assert_eq!(stats, SearchStats { files_scanned: 4, matches_total: 2 });
    }

    #[test]
    fn test_regex_and_extension_filter() {
        let dir = fixture();
        let config = config(&dir, "^(apple|banana)$", Options {
            regex_search: true,
            ..Options::default()
        })
        .with_extensions(["txt"]);
        let pattern = SearchPattern::from_config(&config).unwrap();

        let stats = search_tree(&config, &pattern, &Console::silent());
        assert_eq!(stats, SearchStats { files_scanned: 2, matches_total: 1 });
    }

    #[test]
    fn test_invalid_regex_is_rejected() {
        assert!(SearchPattern::new("(unclosed", true, false).is_err());
    }
}
