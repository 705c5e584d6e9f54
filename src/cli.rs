use crate::git::GitCli;
use crate::report::{analyze, AnalysisConfig};
use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "repostat")]
#[command(about = "Git repository activity statistics: commits, change frequency, extensions and churn")]
#[command(version)]
pub struct Cli {
    #[arg(long, help = "Path to git repository (defaults to the current directory)")]
    pub repo: Option<PathBuf>,

    #[arg(long, value_parser = humantime::parse_duration, help = "Kill any git command running longer than this (e.g. 30s, 2m)")]
    pub timeout: Option<Duration>,

    #[arg(long, help = "Run git queries one after another instead of in parallel")]
    pub sequential: bool,

    #[arg(long, help = "Fail when commit counts disagree between queries")]
    pub strict: bool,

    #[arg(short, long, action = ArgAction::Count, help = "Increase log verbosity (-v, -vv, -vvv)")]
    pub verbose: u8,

    #[arg(long, help = "Output as JSON")]
    pub json: bool,

    #[arg(long, default_value_t = 20, conflicts_with = "json", help = "Rows to show per table")]
    pub top: usize,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        init_logging(self.verbose);

        let repo = match self.repo {
            Some(path) => path,
            None => std::env::current_dir().context("Failed to resolve current directory")?,
        };

        let mut runner = GitCli::new();
        if let Some(timeout) = self.timeout {
            runner = runner.with_timeout(timeout);
        }

        let mut config = AnalysisConfig::new(repo).strict(self.strict);
        if self.sequential {
            config = config.sequential();
        }

        // Spinner goes to stderr and is skipped for JSON so stdout stays parseable
        let spinner = (!self.json).then(|| {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.set_message("Analyzing repository...");
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        });

        let result = analyze(&runner, &config);
        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }
        let report = result
            .with_context(|| format!("Failed to analyze {}", config.repo.display()))?;

        if self.json {
            crate::output::output_json(&report)
        } else {
            crate::output::output_table(&report, self.top)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(level.as_str()),
    )
    .format_timestamp(None)
    .try_init();
}
