//! Per-run counters. Each operation returns one of these by value.

use std::fmt;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenameSummary {
    pub renamed: u64,
    pub planned: u64,
    pub failed: u64,
}

impl fmt::Display for RenameSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Renamed: {}, would rename: {}, failed: {}",
            self.renamed, self.planned, self.failed
        )
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplaceSummary {
    pub scanned: u64,
    pub changed: u64,
    pub would_change: u64,
    pub unchanged: u64,
    pub skipped: u64,
    pub failed: u64,
}

impl ReplaceSummary {
    /// Files whose content differs (or would differ) after the replacement
    pub fn touched(&self) -> u64 {
        self.changed + self.would_change
    }
}

impl fmt::Display for ReplaceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Scanned: {}, changed: {}, would change: {}, unchanged: {}, skipped: {}, failed: {}",
            self.scanned, self.changed, self.would_change, self.unchanged, self.skipped, self.failed
        )
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    pub files_scanned: u64,
    pub matches_total: u64,
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Files scanned: {}, matches: {}",
            self.files_scanned, self.matches_total
        )
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ListSummary {
    pub matched: u64,
}

impl fmt::Display for ListSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Files found: {}", self.matched)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeleteSummary {
    pub matched: u64,
    pub deleted: u64,
    pub failed: u64,
}

impl fmt::Display for DeleteSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.deleted == 0 && self.failed == 0 {
            write!(f, "Files matched: {} (nothing deleted)", self.matched)
        } else {
            write!(
                f,
                "Files matched: {}, deleted: {}, failed: {}",
                self.matched, self.deleted, self.failed
            )
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UndoSummary {
    pub restored: u64,
    pub planned: u64,
    pub failed: u64,
}

impl fmt::Display for UndoSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Restored: {}, would restore: {}, failed: {}",
            self.restored, self.planned, self.failed
        )
    }
}
