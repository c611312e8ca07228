use std::sync::Mutex;

use async_trait::async_trait;

use super::GitRepo;
use crate::error::Error;

#[derive(Debug, Default)]
pub struct MockGitRepo {
  pub branch_output: String,
  pub list_error: Option<String>,
  pub switch_output: String,
  pub switch_error: Option<String>,
  pub switch_calls: Mutex<Vec<String>>,
}

impl MockGitRepo {
  pub fn with_branches(branch_output: &str) -> Self {
    MockGitRepo { branch_output: branch_output.to_string(), ..Default::default() }
  }

  pub fn switch_output(mut self, output: &str) -> Self {
    self.switch_output = output.to_string();
    self
  }

  pub fn failing_switch(mut self, reason: &str) -> Self {
    self.switch_error = Some(reason.to_string());
    self
  }

  pub fn failing_list(mut self, reason: &str) -> Self {
    self.list_error = Some(reason.to_string());
    self
  }

  pub fn switch_calls(&self) -> Vec<String> {
    self.switch_calls.lock().unwrap().clone()
  }
}

#[async_trait]
impl GitRepo for MockGitRepo {
  async fn list_branches(&self) -> Result<String, Error> {
    match &self.list_error {
      Some(reason) => Err(Error::Git(reason.clone())),
      None => Ok(self.branch_output.clone()),
    }
  }

  async fn switch_branch(&self, branch_name: &str) -> Result<String, Error> {
    self.switch_calls.lock().unwrap().push(branch_name.to_string());
    match &self.switch_error {
      Some(reason) => Err(Error::Git(reason.clone())),
      None => Ok(self.switch_output.clone()),
    }
  }
}
