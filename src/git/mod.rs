pub mod branch_source;
pub mod git_cli_repo;
#[cfg(test)]
pub mod mock_git_repo;
pub mod switch_executor;
pub mod types;

pub use branch_source::BranchSource;
pub use git_cli_repo::GitCliRepo;
pub use switch_executor::SwitchExecutor;
pub use types::{BranchEntry, GitRepo};
