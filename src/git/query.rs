use std::fmt;

/// The logical questions the aggregation engine asks of a repository.
///
/// Each variant maps to a fixed argument list for `git`; nothing is ever
/// interpolated into a shell string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GitQuery {
    IsInsideWorkTree,
    CommitCount,
    CommitHashes,
    CommitDates,
    NameOnlyLog,
    TrackedFiles,
    NumstatLog,
}

impl GitQuery {
    pub const ALL: [GitQuery; 7] = [
        GitQuery::IsInsideWorkTree,
        GitQuery::CommitCount,
        GitQuery::CommitHashes,
        GitQuery::CommitDates,
        GitQuery::NameOnlyLog,
        GitQuery::TrackedFiles,
        GitQuery::NumstatLog,
    ];

    pub fn args(self) -> &'static [&'static str] {
        match self {
            GitQuery::IsInsideWorkTree => &["rev-parse", "--is-inside-work-tree"],
            GitQuery::CommitCount => &["rev-list", "--all", "--count"],
            GitQuery::CommitHashes => &["log", "--all", "--pretty=format:%H"],
            GitQuery::CommitDates => &["log", "--all", "--date=short", "--pretty=format:%ad"],
            GitQuery::NameOnlyLog => &[
                "-c",
                "core.quotepath=off",
                "log",
                "--all",
                "-z",
                "--name-only",
                "--pretty=format:",
            ],
            GitQuery::TrackedFiles => &["-c", "core.quotepath=off", "ls-files", "-z"],
            // Empty pretty format keeps commit headers and messages out of the stat lines.
            // -z stops git from C-quoting paths with tabs, quotes or backslashes.
            GitQuery::NumstatLog => &[
                "-c",
                "core.quotepath=off",
                "log",
                "--all",
                "-z",
                "--numstat",
                "--pretty=format:",
            ],
        }
    }

    /// Whether a non-zero exit is itself the answer rather than a failure.
    pub fn tolerates_failure(self) -> bool {
        matches!(self, GitQuery::IsInsideWorkTree)
    }
}

impl fmt::Display for GitQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args = self
            .args()
            .iter()
            .skip_while(|a| **a == "-c" || a.contains('='))
            .copied()
            .collect::<Vec<_>>();
        write!(f, "{}", args.join(" "))
    }
}
