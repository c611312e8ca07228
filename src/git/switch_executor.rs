use std::sync::Arc;

use tracing::{error, info};

use crate::{error::Error, git::types::GitRepo};

/// Runs the branch switch. Never retries: a failed checkout is reported and left to the user.
pub struct SwitchExecutor {
  repo: Arc<dyn GitRepo>,
}

impl SwitchExecutor {
  pub fn new(repo: Arc<dyn GitRepo>) -> Self {
    SwitchExecutor { repo }
  }

  pub async fn switch_to(&self, branch_name: &str) -> Result<String, Error> {
    info!("Switching to branch {}", branch_name);
    match self.repo.switch_branch(branch_name).await {
      Ok(output) => {
        info!("Switched to branch {}", branch_name);
        Ok(strip_ansi_escapes::strip_str(output).trim().to_string())
      },
      Err(err) => {
        error!("Failed to switch to branch {}: {}", branch_name, err);
        let reason = match err {
          Error::Git(reason) => reason,
          other => other.to_string(),
        };
        Err(Error::SwitchFailed { reason })
      },
    }
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;
  use crate::git::mock_git_repo::MockGitRepo;

  #[tokio::test]
  async fn test_switch_to_returns_trimmed_output() {
    let repo = Arc::new(MockGitRepo::default().switch_output("Switched to branch 'dev'\n"));
    let executor = SwitchExecutor::new(repo.clone());

    let output = executor.switch_to("dev").await.unwrap();

    assert_eq!(output, "Switched to branch 'dev'");
    assert_eq!(repo.switch_calls(), vec!["dev".to_string()]);
  }

  #[tokio::test]
  async fn test_switch_to_failure_is_switch_failed_and_not_retried() {
    let repo = Arc::new(MockGitRepo::default().failing_switch("error: Your local changes would be overwritten"));
    let executor = SwitchExecutor::new(repo.clone());

    match executor.switch_to("dev").await {
      Err(Error::SwitchFailed { reason }) => assert_eq!(reason, "error: Your local changes would be overwritten"),
      other => panic!("expected SwitchFailed, got {other:?}"),
    }
    assert_eq!(repo.switch_calls().len(), 1);
  }
}
