use crate::error::Result;
use crate::git::{CommandRunner, GitQuery};
use std::collections::BTreeMap;
use std::path::Path;

/// Day-granularity histogram: one `YYYY-MM-DD` line per commit.
pub fn parse_commit_dates(output: &str) -> BTreeMap<String, u64> {
    let mut histogram = BTreeMap::new();
    for day in output.lines().map(str::trim).filter(|l| !l.is_empty()) {
        *histogram.entry(day.to_string()).or_insert(0) += 1;
    }
    histogram
}

pub fn collect_commits_by_date<R: CommandRunner + ?Sized>(
    runner: &R,
    repo: &Path,
) -> Result<BTreeMap<String, u64>> {
    Ok(parse_commit_dates(&runner.run(repo, GitQuery::CommitDates)?))
}
