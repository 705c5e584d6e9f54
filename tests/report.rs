use pretty_assertions::assert_eq;
use repostat::git::{CannedRunner, GitQuery};
use repostat::{analyze, AnalysisConfig, Inconsistency, LineChurn, RepoStatError};
use std::collections::BTreeMap;

fn scenario_runner() -> CannedRunner {
    CannedRunner::new()
        .with(GitQuery::IsInsideWorkTree, "true\n")
        .with(GitQuery::CommitCount, "2\n")
        .with(GitQuery::CommitHashes, "h2\nh1")
        .with(GitQuery::CommitDates, "2024-01-02\n2024-01-01")
        .with(GitQuery::NameOnlyLog, "a.txt\n\nb.py\na.txt\n")
        .with(GitQuery::TrackedFiles, "a.txt\nb.py\nMakefile")
        .with(GitQuery::NumstatLog, "3\t1\ta.txt\n0\t0\tb.py\n5\t2\ta.txt\n")
}

fn counts(pairs: &[(&str, u64)]) -> BTreeMap<String, u64> {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

#[test]
fn end_to_end_report_from_canned_output() {
    for config in [
        AnalysisConfig::new("/repo"),
        AnalysisConfig::new("/repo").sequential(),
    ] {
        let report = analyze(&scenario_runner(), &config).unwrap();

        assert_eq!(report.total_commits(), 2);
        assert_eq!(report.commit_hashes(), ["h2", "h1"]);
        assert_eq!(
            report.commits_by_date(),
            &counts(&[("2024-01-02", 1), ("2024-01-01", 1)])
        );

        let top: Vec<(&str, u64)> = report.top_changed_files().iter().map(|(p, n)| (p, *n)).collect();
        assert_eq!(top, [("a.txt", 2), ("b.py", 1)]);

        assert_eq!(
            report.extension_stats(),
            &counts(&[(".txt", 1), (".py", 1), ("<noext>", 1)])
        );

        let churn: Vec<(&str, LineChurn)> =
            report.file_line_changes().iter().map(|(p, c)| (p, *c)).collect();
        assert_eq!(
            churn,
            [
                ("a.txt", LineChurn::new(8, 3, 2)),
                ("b.py", LineChurn::new(0, 0, 1)),
            ]
        );

        assert!(report.diagnostics().is_clean());
    }
}

#[test]
fn json_field_order_follows_report_listing() {
    let report = analyze(&scenario_runner(), &AnalysisConfig::new("/repo")).unwrap();
    let json = serde_json::to_string(&report).unwrap();

    let fields = [
        "\"total_commits\"",
        "\"commit_hashes\"",
        "\"commits_by_date\"",
        "\"top_changed_files\"",
        "\"extension_stats\"",
        "\"file_line_changes\"",
    ];
    let positions: Vec<usize> = fields.iter().map(|f| json.find(f).unwrap()).collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{json}");
    assert!(!json.contains("diagnostics"));

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["file_line_changes"]["a.txt"]["added"], 8);
    assert_eq!(value["file_line_changes"]["a.txt"]["removed"], 3);
    assert_eq!(value["file_line_changes"]["a.txt"]["commits"], 2);
    assert!(json.find("\"a.txt\":{").unwrap() < json.find("\"b.py\":{").unwrap());
}

#[test]
fn invalid_repository_fails_before_any_other_query() {
    for answer in ["", "false", "True", "fatal: not a git repository"] {
        for config in [
            AnalysisConfig::new("/not-a-repo"),
            AnalysisConfig::new("/not-a-repo").sequential(),
        ] {
            let runner = CannedRunner::new()
                .with(GitQuery::IsInsideWorkTree, answer)
                .with(GitQuery::CommitCount, "2");

            let err = analyze(&runner, &config).unwrap_err();

            assert!(matches!(err, RepoStatError::NotARepository { .. }));
            assert_eq!(runner.calls(), vec![GitQuery::IsInsideWorkTree]);
        }
    }
}

#[test]
fn valid_repository_runs_every_query_once() {
    let runner = scenario_runner();
    analyze(&runner, &AnalysisConfig::new("/repo")).unwrap();

    let mut calls = runner.calls();
    assert_eq!(calls.first(), Some(&GitQuery::IsInsideWorkTree));
    calls.sort_by_key(|q| GitQuery::ALL.iter().position(|x| x == q));
    assert_eq!(calls, GitQuery::ALL.to_vec());
}

#[test]
fn counts_satisfy_cross_producer_invariants() {
    let runner = CannedRunner::new()
        .with(GitQuery::IsInsideWorkTree, "true")
        .with(GitQuery::CommitCount, "4")
        .with(GitQuery::CommitHashes, "d\nc\nb\na\n")
        .with(GitQuery::CommitDates, "2024-03-01\n2024-03-01\n2024-02-28\n2024-01-01\n")
        .with(GitQuery::TrackedFiles, "src/lib.rs\nsrc/main.rs\nREADME.md\n.gitignore\nLICENSE\n");

    let report = analyze(&runner, &AnalysisConfig::new("/repo")).unwrap();

    assert_eq!(report.total_commits(), report.commit_hashes().len() as u64);
    assert_eq!(
        report.commits_by_date().values().sum::<u64>(),
        report.total_commits()
    );
    assert_eq!(report.extension_stats().values().sum::<u64>(), 5);
    assert_eq!(report.extension_stats()["<noext>"], 2);
}

#[test]
fn equal_rank_entries_keep_first_seen_order() {
    let runner = scenario_runner()
        .with(GitQuery::NameOnlyLog, "zeta.rs\nalpha.rs\n\nalpha.rs\nzeta.rs\n\nmid.rs\n")
        .with(
            GitQuery::NumstatLog,
            "2\t2\tzeta.rs\n1\t3\talpha.rs\n-\t-\tlogo.png\n0\t1\tmid.rs\n",
        );

    let report = analyze(&runner, &AnalysisConfig::new("/repo")).unwrap();

    let top: Vec<&str> = report.top_changed_files().paths().collect();
    assert_eq!(top, ["zeta.rs", "alpha.rs", "mid.rs"]);

    let churn: Vec<&str> = report.file_line_changes().paths().collect();
    assert_eq!(churn, ["zeta.rs", "alpha.rs", "mid.rs", "logo.png"]);
    assert_eq!(
        report.file_line_changes().get("logo.png"),
        Some(&LineChurn::new(0, 0, 1))
    );
}

#[test]
fn mismatched_counts_are_recorded_not_reconciled() {
    let runner = scenario_runner()
        .with(GitQuery::CommitCount, "3")
        .with(GitQuery::NumstatLog, "1\t1\ta.txt\nbroken line\n");

    let report = analyze(&runner, &AnalysisConfig::new("/repo")).unwrap();

    assert_eq!(report.total_commits(), 3);
    assert_eq!(report.commit_hashes().len(), 2);
    assert_eq!(
        report.diagnostics().inconsistencies,
        vec![
            Inconsistency::CommitCountMismatch {
                counted: 3,
                listed: 2
            },
            Inconsistency::DateHistogramMismatch {
                counted: 3,
                dated: 2
            },
        ]
    );
    assert_eq!(report.diagnostics().skipped_stat_lines, 1);
}

#[test]
fn strict_mode_fails_on_mismatch() {
    let runner = scenario_runner().with(GitQuery::CommitCount, "5");
    let err = analyze(&runner, &AnalysisConfig::new("/repo").strict(true)).unwrap_err();
    assert!(matches!(
        err,
        RepoStatError::CommitCountMismatch {
            counted: 5,
            listed: 2
        }
    ));
}

#[test]
fn empty_history_is_a_valid_empty_report() {
    let runner = CannedRunner::new()
        .with(GitQuery::IsInsideWorkTree, "true")
        .with(GitQuery::CommitCount, "0");

    let report = analyze(&runner, &AnalysisConfig::new("/repo")).unwrap();

    assert_eq!(report.total_commits(), 0);
    assert!(report.commit_hashes().is_empty());
    assert!(report.commits_by_date().is_empty());
    assert!(report.top_changed_files().is_empty());
    assert!(report.extension_stats().is_empty());
    assert!(report.file_line_changes().is_empty());
    assert!(report.diagnostics().is_clean());
}

#[test]
fn unparseable_commit_count_is_an_error() {
    let runner = scenario_runner().with(GitQuery::CommitCount, "");
    let err = analyze(&runner, &AnalysisConfig::new("/repo")).unwrap_err();
    assert!(matches!(err, RepoStatError::Parse(_)));
}
