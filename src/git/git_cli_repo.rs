use std::{env::current_dir, path::PathBuf};

use async_trait::async_trait;
use tokio::process::Command as TokioCommand;
use tracing::{error, info};

use crate::{error::Error, git::types::GitRepo};

pub struct GitCliRepo {
  workdir: PathBuf,
}

impl GitCliRepo {
  pub fn from_cwd() -> Result<GitCliRepo, Error> {
    Ok(GitCliRepo::new(current_dir()?))
  }

  pub fn new(workdir: PathBuf) -> GitCliRepo {
    GitCliRepo { workdir }
  }

  async fn run_git_command(&self, args: &[&str]) -> Result<GitOutput, Error> {
    let args_log_command = args.join(" ");
    info!("Running `git {}`", args_log_command);
    let output = TokioCommand::new("git").args(args).current_dir(&self.workdir).output().await.map_err(|err| {
      error!("Failed to run `git {}`, error: {}", args_log_command, err);
      Error::Git(err.to_string())
    })?;

    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    if !output.status.success() {
      error!("`git {}` exited with {}, error: {}", args_log_command, output.status, stderr);
      let reason = if stderr.trim().is_empty() { output.status.to_string() } else { stderr.trim().to_string() };
      return Err(Error::Git(reason));
    }
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    info!("Received git cli reply:\n{}", stdout);
    Ok(GitOutput { stdout, stderr })
  }
}

struct GitOutput {
  stdout: String,
  stderr: String,
}

#[async_trait]
impl GitRepo for GitCliRepo {
  async fn list_branches(&self) -> Result<String, Error> {
    let output = self.run_git_command(&["branch", "--no-color"]).await?;
    Ok(output.stdout)
  }

  async fn switch_branch(&self, branch_name: &str) -> Result<String, Error> {
    let output = self.run_git_command(&["checkout", branch_name]).await?;
    // checkout lists local changes on stdout and the "Switched to branch" line on stderr
    let text: Vec<&str> = [output.stdout.trim(), output.stderr.trim()].into_iter().filter(|s| !s.is_empty()).collect();
    Ok(text.join("\n"))
  }
}
