use std::sync::Arc;

use regex::Regex;
use tracing::{error, info, warn};

use crate::{
  error::Error,
  git::types::{BranchEntry, GitRepo},
};

/// Loads the local branches and works out which one is checked out.
pub struct BranchSource {
  repo: Arc<dyn GitRepo>,
  line_pattern: Regex,
}

impl BranchSource {
  pub fn new(repo: Arc<dyn GitRepo>, active_marker: &str) -> Result<Self, Error> {
    // Captures the following `git branch` lines, where `+` marks a branch checked out in another worktree
    // * main
    //   dev
    // + feature-x
    let line_pattern = Regex::new(&format!(r"^(?:(?<active>{})|\+|\s)\s(?<name>.+)$", regex::escape(active_marker)))?;
    Ok(BranchSource { repo, line_pattern })
  }

  pub async fn list(&self) -> Result<Vec<BranchEntry>, Error> {
    let output = self.repo.list_branches().await.map_err(|err| {
      error!("Failed to list branches: {}", err);
      match err {
        Error::Git(reason) => Error::SourceUnavailable(reason),
        other => Error::SourceUnavailable(other.to_string()),
      }
    })?;
    let branches = self.parse(&output)?;
    info!("Loaded {} branches", branches.len());
    Ok(branches)
  }

  /// Parses listing output into entries in the order they were printed. Only the first marked line is active.
  pub fn parse(&self, output: &str) -> Result<Vec<BranchEntry>, Error> {
    let output = strip_ansi_escapes::strip_str(output);
    let mut has_active = false;
    let branches: Vec<BranchEntry> = output
      .lines()
      .filter(|line| !line.trim().is_empty())
      .map(|line| {
        let Some(captures) = self.line_pattern.captures(line) else {
          warn!("Unrecognised branch line, keeping it as is: {}", line);
          return BranchEntry::new(line.trim().to_string());
        };
        let name = captures["name"].trim().to_string();
        if captures.name("active").is_some() && !has_active {
          has_active = true;
          return BranchEntry::active(name);
        }
        BranchEntry::new(name)
      })
      .collect();

    if branches.is_empty() {
      return Err(Error::EmptyResult);
    }
    Ok(branches)
  }
}
