use super::records;
use crate::error::Result;
use crate::git::{CommandRunner, GitQuery};
use crate::model::NO_EXTENSION;
use std::collections::BTreeMap;
use std::path::Path;

/// Extension bucket for a tracked path: `.` plus whatever follows the last
/// dot of the file name. Leading dots belong to the name, so `.gitignore`
/// has no extension.
pub fn extension_token(path: &str) -> String {
    let name = path.rsplit('/').next().unwrap_or(path);
    let stem = name.trim_start_matches('.');
    match stem.rfind('.') {
        Some(dot) => stem[dot..].to_string(),
        None => NO_EXTENSION.to_string(),
    }
}

/// Bucket every currently tracked file exactly once.
pub fn parse_tracked_files(output: &str) -> BTreeMap<String, u64> {
    let mut stats = BTreeMap::new();
    for path in records(output) {
        *stats.entry(extension_token(path)).or_insert(0) += 1;
    }
    stats
}

pub fn collect_extension_stats<R: CommandRunner + ?Sized>(
    runner: &R,
    repo: &Path,
) -> Result<BTreeMap<String, u64>> {
    Ok(parse_tracked_files(&runner.run(repo, GitQuery::TrackedFiles)?))
}
