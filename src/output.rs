use crate::model::AnalysisReport;
use crate::report::total_churn;
use anyhow::Result;
use console::style;

pub fn output_json(report: &AnalysisReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

pub fn output_table(report: &AnalysisReport, top: usize) -> Result<()> {
    println!("{}", style("Repository Activity").bold());
    println!("{}", "─".repeat(60));
    println!("{:<20} {:>10}", "Commits", report.total_commits());
    if let (Some(newest), Some(oldest)) = (
        report.commits_by_date().keys().next_back(),
        report.commits_by_date().keys().next(),
    ) {
        println!(
            "{:<20} {:>10} {}",
            "Active days",
            report.commits_by_date().len(),
            style(format!("({oldest} .. {newest})")).dim()
        );
    }
    let churn = total_churn(report.file_line_changes());
    println!(
        "{:<20} {:>10} {}",
        "Lines changed",
        churn.total(),
        style(format!("(+{} / -{})", churn.added, churn.removed)).dim()
    );

    println!("\n{}", style("Most changed files").bold());
    println!("{:<50} {:>8}", style("Path").bold(), style("Commits").bold());
    println!("{}", "─".repeat(60));
    for (path, count) in report.top_changed_files().iter().take(top) {
        println!("{:<50} {:>8}", path, count);
    }
    more(report.top_changed_files().len(), top);

    println!("\n{}", style("Line churn").bold());
    println!(
        "{:<50} {:>8} {:>8} {:>8} {:>8}",
        style("Path").bold(),
        style("Added").bold(),
        style("Removed").bold(),
        style("Total").bold(),
        style("Commits").bold()
    );
    println!("{}", "─".repeat(86));
    for (path, c) in report.file_line_changes().iter().take(top) {
        println!(
            "{:<50} {:>8} {:>8} {:>8} {:>8}",
            path,
            style(c.added).green(),
            style(c.removed).red(),
            c.total(),
            c.commits
        );
    }
    more(report.file_line_changes().len(), top);

    println!("\n{}", style("Tracked files by extension").bold());
    let mut extensions: Vec<(&String, &u64)> = report.extension_stats().iter().collect();
    extensions.sort_by(|a, b| b.1.cmp(a.1));
    for (ext, count) in extensions.iter().take(top) {
        println!("{:<20} {:>8}", ext, count);
    }
    more(extensions.len(), top);

    let diagnostics = report.diagnostics();
    if !diagnostics.is_clean() {
        println!("\n{}", style("Warnings").yellow().bold());
        for issue in &diagnostics.inconsistencies {
            println!("  {}", issue);
        }
        if diagnostics.skipped_stat_lines > 0 {
            println!("  skipped {} malformed numstat lines", diagnostics.skipped_stat_lines);
        }
    }

    Ok(())
}

fn more(len: usize, shown: usize) {
    if len > shown {
        println!("... and {} more entries", len - shown);
    }
}
