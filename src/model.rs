use crate::error::RepoStatError;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::fmt;

/// Sentinel extension token for tracked files without an extension.
pub const NO_EXTENSION: &str = "<noext>";

/// Added/removed line totals for one path across history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LineChurn {
    pub added: u64,
    pub removed: u64,
    pub commits: u64,
}

impl LineChurn {
    pub fn new(added: u64, removed: u64, commits: u64) -> Self {
        Self {
            added,
            removed,
            commits,
        }
    }

    pub fn total(&self) -> u64 {
        self.added + self.removed
    }
}

/// Path-keyed entries in descending rank order.
///
/// Serializes as a map whose iteration order is the rank order. Entries with
/// equal rank keep the order in which their paths were first seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranked<T> {
    entries: Vec<(String, T)>,
}

impl<T> Ranked<T> {
    /// Stable-sort `entries` (given in first-seen order) descending by `key`.
    pub fn rank_by<K, F>(mut entries: Vec<(String, T)>, key: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K,
    {
        // sort_by_key is a stable sort; ties stay in first-seen order
        entries.sort_by_key(|(_, value)| Reverse(key(value)));
        Self { entries }
    }

    pub fn get(&self, path: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> + '_ {
        self.entries.iter().map(|(p, value)| (p.as_str(), value))
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(p, _)| p.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for Ranked<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: Serialize> Serialize for Ranked<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (path, value) in &self.entries {
            map.serialize_entry(path, value)?;
        }
        map.end()
    }
}

/// Cross-producer disagreement. Each producer runs its own command, so a
/// repository mutated mid-analysis can leave them out of step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inconsistency {
    CommitCountMismatch { counted: u64, listed: usize },
    DateHistogramMismatch { counted: u64, dated: u64 },
}

impl Inconsistency {
    pub fn into_error(self) -> RepoStatError {
        match self {
            Inconsistency::CommitCountMismatch { counted, listed } => {
                RepoStatError::CommitCountMismatch { counted, listed }
            }
            Inconsistency::DateHistogramMismatch { counted, dated } => {
                RepoStatError::DateHistogramMismatch { counted, dated }
            }
        }
    }
}

impl fmt::Display for Inconsistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inconsistency::CommitCountMismatch { counted, listed } => write!(
                f,
                "total commit count {counted} differs from {listed} listed hashes"
            ),
            Inconsistency::DateHistogramMismatch { counted, dated } => write!(
                f,
                "total commit count {counted} differs from {dated} dated commits"
            ),
        }
    }
}

/// Irregularities tolerated while building a report. Never serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    pub skipped_stat_lines: usize,
    pub inconsistencies: Vec<Inconsistency>,
}

impl Diagnostics {
    pub fn is_clean(&self) -> bool {
        self.skipped_stat_lines == 0 && self.inconsistencies.is_empty()
    }
}

/// The statistics for one repository, built once by [`crate::report::analyze`].
///
/// Field order is the serialization order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    total_commits: u64,
    commit_hashes: Vec<String>,
    commits_by_date: BTreeMap<String, u64>,
    top_changed_files: Ranked<u64>,
    extension_stats: BTreeMap<String, u64>,
    file_line_changes: Ranked<LineChurn>,
    #[serde(skip)]
    diagnostics: Diagnostics,
}

impl AnalysisReport {
    pub(crate) fn new(
        total_commits: u64,
        commit_hashes: Vec<String>,
        commits_by_date: BTreeMap<String, u64>,
        top_changed_files: Ranked<u64>,
        extension_stats: BTreeMap<String, u64>,
        file_line_changes: Ranked<LineChurn>,
        diagnostics: Diagnostics,
    ) -> Self {
        Self {
            total_commits,
            commit_hashes,
            commits_by_date,
            top_changed_files,
            extension_stats,
            file_line_changes,
            diagnostics,
        }
    }

    pub fn total_commits(&self) -> u64 {
        self.total_commits
    }

    pub fn commit_hashes(&self) -> &[String] {
        &self.commit_hashes
    }

    pub fn commits_by_date(&self) -> &BTreeMap<String, u64> {
        &self.commits_by_date
    }

    pub fn top_changed_files(&self) -> &Ranked<u64> {
        &self.top_changed_files
    }

    pub fn extension_stats(&self) -> &BTreeMap<String, u64> {
        &self.extension_stats
    }

    pub fn file_line_changes(&self) -> &Ranked<LineChurn> {
        &self.file_line_changes
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }
}
