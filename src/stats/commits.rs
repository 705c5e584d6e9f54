use crate::error::{RepoStatError, Result};
use crate::git::{CommandRunner, GitQuery};
use std::path::Path;

pub fn parse_commit_count(output: &str) -> Result<u64> {
    let trimmed = output.trim();
    trimmed
        .parse::<u64>()
        .map_err(|e| RepoStatError::Parse(format!("Invalid commit count '{trimmed}': {e}")))
}

/// Full hashes, newest first, one per non-blank line.
pub fn parse_commit_hashes(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn collect_commit_count<R: CommandRunner + ?Sized>(runner: &R, repo: &Path) -> Result<u64> {
    parse_commit_count(&runner.run(repo, GitQuery::CommitCount)?)
}

pub fn collect_commit_hashes<R: CommandRunner + ?Sized>(
    runner: &R,
    repo: &Path,
) -> Result<Vec<String>> {
    Ok(parse_commit_hashes(&runner.run(repo, GitQuery::CommitHashes)?))
}
