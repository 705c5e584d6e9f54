pub mod query;
pub mod repo;
pub mod runner;

pub use query::GitQuery;
pub use repo::{validate_repository, RepositorySnapshot};
pub use runner::{CannedRunner, CommandRunner, GitCli};
