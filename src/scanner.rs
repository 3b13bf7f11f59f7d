use crate::args::Config;
use crate::console::Console;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Set of file extensions to restrict a walk to. Empty means every file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionFilter {
    extensions: Vec<String>,
}

impl ExtensionFilter {
    /// Build a filter from user input; `rs`, `.rs` and `RS` are the same extension
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut extensions: Vec<String> = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim_start_matches('.').to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
        extensions.sort();
        extensions.dedup();
        Self { extensions }
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Whether `path` passes the filter
    pub fn allows(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
}

/// A path discovered during a walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub name: String,
    pub kind: EntryKind,
    /// Distance from the walk root; direct children are at depth 1
    pub depth: usize,
}

/// Directory walker rooted at one directory
///
/// Every listing is collected up front, so renames and staging files created while
/// processing never show up in the same walk.
#[derive(Debug, Clone)]
pub struct Scanner {
    root: PathBuf,
    git_ignore: bool,
    console: Console,
}

impl Scanner {
    pub fn new(root: impl Into<PathBuf>, git_ignore: bool, console: Console) -> Self {
        Self {
            root: root.into(),
            git_ignore,
            console,
        }
    }

    pub fn from_config(config: &Config, console: Console) -> Self {
        Self::new(&config.root, config.options.git_ignore, console)
    }

    /// Walk the tree and collect every file and directory below the root
    ///
    /// # Returns
    /// * `Vec<FileEntry>` - Entries in walk order, excluding the root itself
    pub fn entries(&self) -> Vec<FileEntry> {
        let walker = if self.git_ignore {
            WalkBuilder::new(&self.root).build()
        } else {
            WalkBuilder::new(&self.root)
                .standard_filters(false) // Visit hidden and ignored files too
                .build()
        };

        let mut entries = Vec::new();

        for result in walker {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    self.console.warn(format!("Error walking directory: {}", err));
                    continue;
                }
            };

            if entry.depth() == 0 {
                continue;
            }

            let kind = match entry.file_type() {
                Some(ft) if ft.is_file() => EntryKind::File,
                Some(ft) if ft.is_dir() => EntryKind::Dir,
                _ => {
                    tracing::trace!(path = %entry.path().display(), "skipping non-regular entry");
                    continue;
                }
            };

            entries.push(FileEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                depth: entry.depth(),
                path: entry.into_path(),
                kind,
            });
        }

        tracing::debug!(root = %self.root.display(), count = entries.len(), "walk finished");
        entries
    }

    /// Files that pass the extension filter and the given name predicate
    pub fn files<F>(&self, filter: &ExtensionFilter, mut keep: F) -> Vec<FileEntry>
    where
        F: FnMut(&FileEntry) -> bool,
    {
        self.entries()
            .into_iter()
            .filter(|e| e.kind == EntryKind::File && filter.allows(&e.path) && keep(e))
            .collect()
    }

    /// Directories that pass the predicate, children before their parents
    pub fn dirs_deepest_first<F>(&self, mut keep: F) -> Vec<FileEntry>
    where
        F: FnMut(&FileEntry) -> bool,
    {
        let mut dirs: Vec<FileEntry> = self
            .entries()
            .into_iter()
            .filter(|e| e.kind == EntryKind::Dir && keep(e))
            .collect();
        dirs.sort_by(|a, b| b.depth.cmp(&a.depth).then_with(|| a.path.cmp(&b.path)));
        dirs
    }
}
