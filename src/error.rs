use crate::git::GitQuery;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RepoStatError>;

#[derive(Error, Debug)]
pub enum RepoStatError {
    #[error("Not a git repository: {}", .path.display())]
    NotARepository { path: PathBuf },
    #[error("git {query} failed ({status}): {stderr}")]
    CommandFailed {
        query: GitQuery,
        status: String,
        stderr: String,
    },
    #[error("git {query} timed out after {}", humantime::format_duration(.elapsed.to_owned()))]
    Timeout { query: GitQuery, elapsed: Duration },
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Commit count mismatch: rev-list counted {counted}, log listed {listed}")]
    CommitCountMismatch { counted: u64, listed: usize },
    #[error("Date histogram mismatch: rev-list counted {counted}, log dated {dated}")]
    DateHistogramMismatch { counted: u64, dated: u64 },
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
