use crate::error::Result;
use crate::git::{validate_repository, CommandRunner};
use crate::model::{AnalysisReport, Diagnostics, Inconsistency, LineChurn, Ranked};
use crate::stats::{
    collect_change_frequency, collect_commit_count, collect_commit_hashes, collect_commits_by_date,
    collect_extension_stats, collect_line_churn, ChurnTable,
};
use log::{info, warn};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub repo: PathBuf,
    /// Run the five producers on the rayon pool instead of one after another.
    pub parallel: bool,
    /// Fail on cross-producer inconsistencies instead of recording them.
    pub strict: bool,
}

impl AnalysisConfig {
    pub fn new(repo: impl Into<PathBuf>) -> Self {
        Self {
            repo: repo.into(),
            parallel: true,
            strict: false,
        }
    }

    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

struct Collected {
    total_commits: u64,
    commit_hashes: Vec<String>,
    commits_by_date: BTreeMap<String, u64>,
    top_changed_files: Ranked<u64>,
    extension_stats: BTreeMap<String, u64>,
    churn: ChurnTable,
}

/// Validate the repository, run every producer and compose the report.
///
/// Nothing but the validity check runs against a path that is not a work tree.
pub fn analyze<R: CommandRunner + ?Sized>(runner: &R, config: &AnalysisConfig) -> Result<AnalysisReport> {
    let snapshot = validate_repository(runner, &config.repo)?;
    let repo = snapshot.path.as_path();

    let collected = if config.parallel {
        collect_parallel(runner, repo)?
    } else {
        collect_sequential(runner, repo)?
    };

    let inconsistencies = check_consistency(&collected);
    for issue in &inconsistencies {
        warn!("{}: {issue}", repo.display());
    }
    if config.strict {
        if let Some(issue) = inconsistencies.first() {
            return Err(issue.clone().into_error());
        }
    }

    let diagnostics = Diagnostics {
        skipped_stat_lines: collected.churn.skipped_lines,
        inconsistencies,
    };
    if diagnostics.skipped_stat_lines > 0 {
        warn!(
            "{}: skipped {} malformed numstat lines",
            repo.display(),
            diagnostics.skipped_stat_lines
        );
    }

    info!(
        "{}: {} commits, {} files changed, {} tracked extensions",
        repo.display(),
        collected.total_commits,
        collected.top_changed_files.len(),
        collected.extension_stats.len()
    );

    Ok(AnalysisReport::new(
        collected.total_commits,
        collected.commit_hashes,
        collected.commits_by_date,
        collected.top_changed_files,
        collected.extension_stats,
        collected.churn.files,
        diagnostics,
    ))
}

fn collect_sequential<R: CommandRunner + ?Sized>(runner: &R, repo: &Path) -> Result<Collected> {
    Ok(Collected {
        total_commits: collect_commit_count(runner, repo)?,
        commit_hashes: collect_commit_hashes(runner, repo)?,
        commits_by_date: collect_commits_by_date(runner, repo)?,
        top_changed_files: collect_change_frequency(runner, repo)?,
        extension_stats: collect_extension_stats(runner, repo)?,
        churn: collect_line_churn(runner, repo)?,
    })
}

fn collect_parallel<R: CommandRunner + ?Sized>(runner: &R, repo: &Path) -> Result<Collected> {
    let ((count, hashes), ((dates, frequency), (extensions, churn))) = rayon::join(
        || {
            rayon::join(
                || collect_commit_count(runner, repo),
                || collect_commit_hashes(runner, repo),
            )
        },
        || {
            rayon::join(
                || {
                    rayon::join(
                        || collect_commits_by_date(runner, repo),
                        || collect_change_frequency(runner, repo),
                    )
                },
                || {
                    rayon::join(
                        || collect_extension_stats(runner, repo),
                        || collect_line_churn(runner, repo),
                    )
                },
            )
        },
    );

    Ok(Collected {
        total_commits: count?,
        commit_hashes: hashes?,
        commits_by_date: dates?,
        top_changed_files: frequency?,
        extension_stats: extensions?,
        churn: churn?,
    })
}

fn check_consistency(collected: &Collected) -> Vec<Inconsistency> {
    let mut issues = Vec::new();

    let listed = collected.commit_hashes.len();
    if collected.total_commits != listed as u64 {
        issues.push(Inconsistency::CommitCountMismatch {
            counted: collected.total_commits,
            listed,
        });
    }

    let dated: u64 = collected.commits_by_date.values().sum();
    if collected.total_commits != dated {
        issues.push(Inconsistency::DateHistogramMismatch {
            counted: collected.total_commits,
            dated,
        });
    }

    issues
}

/// Sum of line churn across every path in a report.
pub fn total_churn(files: &Ranked<LineChurn>) -> LineChurn {
    files.iter().fold(LineChurn::default(), |acc, (_, c)| LineChurn {
        added: acc.added + c.added,
        removed: acc.removed + c.removed,
        commits: acc.commits + c.commits,
    })
}
