use super::{CommandRunner, GitQuery};
use crate::error::{RepoStatError, Result};
use log::debug;
use std::path::{Path, PathBuf};

/// The outcome of asking git whether `path` is a usable working tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySnapshot {
    pub path: PathBuf,
    pub valid: bool,
}

impl RepositorySnapshot {
    pub fn probe<R: CommandRunner + ?Sized>(runner: &R, path: &Path) -> Result<Self> {
        let out = runner.run(path, GitQuery::IsInsideWorkTree)?;
        // Exactly "true": "True", "1" or a fatal message all count as invalid
        let valid = out.trim() == "true";
        debug!("{} is inside a work tree: {valid}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            valid,
        })
    }

    pub fn into_valid(self) -> Result<Self> {
        if self.valid {
            Ok(self)
        } else {
            Err(RepoStatError::NotARepository { path: self.path })
        }
    }
}

/// Confirm `path` is inside a git working tree before anything else runs.
pub fn validate_repository<R: CommandRunner + ?Sized>(
    runner: &R,
    path: &Path,
) -> Result<RepositorySnapshot> {
    RepositorySnapshot::probe(runner, path)?.into_valid()
}
