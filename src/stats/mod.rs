//! Producers: each asks the runner one query and folds its output into a
//! single statistic. Parsing is split from collection so the parsers can be
//! exercised on plain text.

pub mod churn;
pub mod commits;
pub mod dates;
pub mod extensions;
pub mod frequency;

pub use churn::{collect_line_churn, parse_numstat, ChurnTable};
pub use commits::{collect_commit_count, collect_commit_hashes, parse_commit_count, parse_commit_hashes};
pub use dates::{collect_commits_by_date, parse_commit_dates};
pub use extensions::{collect_extension_stats, extension_token, parse_tracked_files};
pub use frequency::{collect_change_frequency, parse_name_only_log};

use std::collections::HashMap;

/// Split path listings into records. Accepts both newline-terminated output
/// and the NUL-terminated `-z` form; blank records separate commits and are
/// dropped.
pub(crate) fn records(output: &str) -> impl Iterator<Item = &str> + '_ {
    output
        .split(|c: char| c == '\0' || c == '\n')
        .filter(|record| !record.trim().is_empty())
}

/// Per-path accumulator that remembers the order paths were first seen, so
/// ranking can break ties by it.
#[derive(Debug)]
pub(crate) struct FirstSeen<T> {
    index: HashMap<String, usize>,
    entries: Vec<(String, T)>,
}

impl<T: Default> FirstSeen<T> {
    pub(crate) fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    pub(crate) fn entry(&mut self, path: &str) -> &mut T {
        let slot = match self.index.get(path) {
            Some(&slot) => slot,
            None => {
                let slot = self.entries.len();
                self.index.insert(path.to_string(), slot);
                self.entries.push((path.to_string(), T::default()));
                slot
            }
        };
        &mut self.entries[slot].1
    }

    pub(crate) fn into_entries(self) -> Vec<(String, T)> {
        self.entries
    }
}
