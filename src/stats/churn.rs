use super::{records, FirstSeen};
use crate::error::Result;
use crate::git::{CommandRunner, GitQuery};
use crate::model::{LineChurn, Ranked};
use log::trace;
use std::path::Path;

/// Per-path churn ranked by `added + removed`, plus how many stat lines were
/// too short to use.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChurnTable {
    pub files: Ranked<LineChurn>,
    pub skipped_lines: usize,
}

/// Fold a numeric-stat log (`added\tremoved\tpath` per record) into per-path totals.
///
/// Binary files report `-` instead of counts: they add nothing to the line
/// totals but still count as a commit touching the path. Records with fewer
/// than three fields touch nothing and are only tallied in `skipped_lines`.
///
/// In `-z` output a rename leaves the path field empty and lists the old and
/// new paths as the next two records; it is keyed `old => new`, the same name
/// git prints without `-z`.
pub fn parse_numstat(output: &str) -> ChurnTable {
    let mut churn: FirstSeen<LineChurn> = FirstSeen::new();
    let mut skipped_lines = 0;
    let mut lines = records(output);

    while let Some(line) = lines.next() {
        let mut fields = line.splitn(3, '\t');
        let (Some(added), Some(removed), Some(path)) = (fields.next(), fields.next(), fields.next())
        else {
            trace!("skipping malformed stat line {line:?}");
            skipped_lines += 1;
            continue;
        };

        let renamed;
        let path = if path.is_empty() {
            let (Some(from), Some(to)) = (lines.next(), lines.next()) else {
                trace!("skipping rename without paths {line:?}");
                skipped_lines += 1;
                continue;
            };
            renamed = format!("{from} => {to}");
            renamed.as_str()
        } else {
            path
        };

        let entry = churn.entry(path);
        entry.added += line_count(added);
        entry.removed += line_count(removed);
        entry.commits += 1;
    }

    ChurnTable {
        files: Ranked::rank_by(churn.into_entries(), LineChurn::total),
        skipped_lines,
    }
}

fn line_count(field: &str) -> u64 {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return 0;
    }
    field.parse().unwrap_or(0)
}

pub fn collect_line_churn<R: CommandRunner + ?Sized>(runner: &R, repo: &Path) -> Result<ChurnTable> {
    Ok(parse_numstat(&runner.run(repo, GitQuery::NumstatLog)?))
}
