use crate::error::Error;

/// A branch as shown in the switcher.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BranchEntry {
  pub name: String,
  pub is_active: bool,
}

impl BranchEntry {
  pub fn new(name: String) -> Self {
    BranchEntry { name, is_active: false }
  }

  pub fn active(name: String) -> Self {
    BranchEntry { name, is_active: true }
  }
}

/// The external version control tool. Both operations return the raw text the tool printed.
#[async_trait::async_trait]
pub trait GitRepo: Send + Sync {
  async fn list_branches(&self) -> Result<String, Error>;
  async fn switch_branch(&self, branch_name: &str) -> Result<String, Error>;
}
