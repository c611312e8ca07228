use std::sync::Arc;

use color_eyre::eyre::{Result, eyre};
use ratatui::prelude::Rect;
use tokio::sync::mpsc;
use tracing::info;

use crate::{
  action::Action,
  components::{
    Component,
    branch_switcher::{BranchSwitcher, SelectionModel},
  },
  config::Config,
  git::{BranchSource, GitRepo},
  tui::{self, Tui},
};

pub struct App {
  pub branch_switcher: BranchSwitcher,
  pub should_quit: bool,
}

impl App {
  /// Loads the branches. Fails before any terminal setup when there is nothing to show.
  pub async fn new(config: Config, repo: Arc<dyn GitRepo>) -> Result<Self> {
    let source = BranchSource::new(repo.clone(), &config.active_marker)?;
    let model = SelectionModel::new(source.list().await?)?;
    info!("Starting with {} branches, {} checked out", model.entries().len(), model.active_entry().name);
    let branch_switcher = BranchSwitcher::new(model, repo, &config);
    Ok(Self { branch_switcher, should_quit: false })
  }

  pub async fn run(&mut self) -> Result<()> {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel();

    let mut tui = Tui::new()?;
    tui.enter()?;

    loop {
      match tui.next().await {
        Some(e) => {
          match e {
            tui::Event::Init => action_tx.send(Action::Render)?,
            tui::Event::Resize(x, y) => action_tx.send(Action::Resize(x, y))?,
            tui::Event::Error(ref message) => action_tx.send(Action::Error(message.clone()))?,
            _ => {},
          }
          if let Some(action) = self.branch_switcher.handle_events(Some(e)).await? {
            action_tx.send(action)?;
          }
        },
        None => action_tx.send(Action::Quit)?,
      }

      while let Ok(action) = action_rx.try_recv() {
        if action != Action::Render {
          log::debug!("{action:?}");
        }

        match action {
          Action::Quit => self.should_quit = true,
          Action::Resize(w, h) => {
            tui.resize(Rect::new(0, 0, w, h))?;
            tui.clear()?;
            self.render(&mut tui)?;
          },
          Action::Render => self.render(&mut tui)?,
          Action::Error(ref message) => {
            tui.exit()?;
            return Err(eyre!("Terminal input failed: {}", message));
          },
          _ => {},
        }
        // nothing is handled after a quit
        if self.should_quit {
          break;
        }
        if let Some(action) = self.branch_switcher.update(action.clone()).await? {
          action_tx.send(action)?
        };
      }

      if self.should_quit {
        break;
      }
    }
    tui.exit()?;
    Ok(())
  }

  fn render(&mut self, tui: &mut Tui) -> Result<()> {
    let mut result: Result<()> = Ok(());
    tui.draw(|f| {
      result = self.branch_switcher.draw(f, f.area());
    })?;
    result
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{error::Error, git::mock_git_repo::MockGitRepo};

  async fn startup_error(repo: MockGitRepo) -> color_eyre::Report {
    match App::new(Config::defaults().unwrap(), Arc::new(repo)).await {
      Ok(_) => panic!("expected startup to fail"),
      Err(err) => err,
    }
  }

  #[tokio::test]
  async fn test_new_with_empty_listing_fails_with_empty_result() {
    let err = startup_error(MockGitRepo::with_branches("")).await;

    assert!(matches!(err.downcast_ref::<Error>(), Some(Error::EmptyResult)));
  }

  #[tokio::test]
  async fn test_new_with_failing_listing_fails_with_source_unavailable() {
    let err = startup_error(MockGitRepo::default().failing_list("fatal: not a git repository")).await;

    assert!(matches!(err.downcast_ref::<Error>(), Some(Error::SourceUnavailable(_))));
    assert!(err.downcast_ref::<Error>().unwrap().is_fatal_at_startup());
  }

  #[tokio::test]
  async fn test_new_without_marked_branch_fails() {
    let err = startup_error(MockGitRepo::with_branches("  main\n  dev\n")).await;

    assert!(matches!(err.downcast_ref::<Error>(), Some(Error::NoActiveBranch)));
  }

  #[tokio::test]
  async fn test_new_loads_branches() {
    let app = App::new(Config::defaults().unwrap(), Arc::new(MockGitRepo::with_branches("  dev\n* main\n")))
      .await
      .unwrap_or_else(|err| panic!("startup failed: {err}"));

    assert_eq!(app.branch_switcher.model().active_index(), 1);
    assert_eq!(app.branch_switcher.model().highlighted_index(), 1);
    assert!(!app.should_quit);
  }
}
