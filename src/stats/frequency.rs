use super::{records, FirstSeen};
use crate::error::Result;
use crate::git::{CommandRunner, GitQuery};
use crate::model::Ranked;
use std::path::Path;

/// Count how often each path appears in a name-only log.
///
/// Blank lines separate commits and are skipped. Every occurrence counts, so
/// a path listed twice in one commit is counted twice. Renamed files are
/// tracked under each name they had.
pub fn parse_name_only_log(output: &str) -> Ranked<u64> {
    let mut counts: FirstSeen<u64> = FirstSeen::new();
    for path in records(output).map(str::trim) {
        *counts.entry(path) += 1;
    }
    Ranked::rank_by(counts.into_entries(), |n| *n)
}

pub fn collect_change_frequency<R: CommandRunner + ?Sized>(
    runner: &R,
    repo: &Path,
) -> Result<Ranked<u64>> {
    Ok(parse_name_only_log(&runner.run(repo, GitQuery::NameOnlyLog)?))
}
