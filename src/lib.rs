pub mod cli;
pub mod error;
pub mod git;
pub mod model;
pub mod output;
pub mod report;
pub mod stats;

pub use error::{RepoStatError, Result};
pub use model::{AnalysisReport, Diagnostics, Inconsistency, LineChurn, Ranked};
pub use report::{analyze, AnalysisConfig};
