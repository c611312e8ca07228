use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("git error: {0}")]
  Git(String),
  #[error("unable to list branches: {0}")]
  SourceUnavailable(String),
  #[error("no branches found")]
  EmptyResult,
  #[error("no branches to navigate")]
  EmptyModel,
  #[error("no branch is marked as checked out")]
  NoActiveBranch,
  #[error("branch index {index} is out of range for {len} branches")]
  IndexOutOfRange { index: usize, len: usize },
  #[error("switch failed: {reason}")]
  SwitchFailed { reason: String },
  #[error(transparent)]
  Io(#[from] std::io::Error),
  #[error(transparent)]
  Regex(#[from] regex::Error),
}

impl Error {
  /// Errors that stop the tool before the UI starts.
  pub fn is_fatal_at_startup(&self) -> bool {
    matches!(self, Error::SourceUnavailable(_) | Error::EmptyResult | Error::NoActiveBranch)
  }
}
