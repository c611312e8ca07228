use std::{
  io::{Stderr, stderr},
  ops::{Deref, DerefMut},
};

use color_eyre::eyre::Result;
use crossterm::{
  cursor,
  event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind},
  terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend as Backend;

pub type Frame<'a> = ratatui::Frame<'a>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
  Init,
  Error(String),
  Key(KeyEvent),
  Resize(u16, u16),
}

/// The terminal plus its input stream. Input is read on the caller's task, so handlers never overlap.
pub struct Tui {
  pub terminal: ratatui::Terminal<Backend<Stderr>>,
  events: EventStream,
  initialized: bool,
  entered: bool,
}

impl Tui {
  pub fn new() -> Result<Self> {
    let terminal = ratatui::Terminal::new(Backend::new(stderr()))?;
    Ok(Self { terminal, events: EventStream::new(), initialized: false, entered: false })
  }

  pub fn enter(&mut self) -> Result<()> {
    crossterm::terminal::enable_raw_mode()?;
    // raw mode alone must be undone on exit if the screen switch below fails
    self.entered = true;
    crossterm::execute!(std::io::stderr(), EnterAlternateScreen, cursor::Hide)?;
    Ok(())
  }

  pub fn exit(&mut self) -> Result<()> {
    if self.entered {
      self.flush()?;
      restore()?;
      self.entered = false;
    }
    Ok(())
  }

  /// Waits for the next event worth dispatching. Key releases and mouse input are skipped.
  pub async fn next(&mut self) -> Option<Event> {
    if !self.initialized {
      self.initialized = true;
      return Some(Event::Init);
    }
    loop {
      let event = match self.events.next().await? {
        Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => Event::Key(key),
        Ok(CrosstermEvent::Resize(x, y)) => Event::Resize(x, y),
        Ok(_) => continue,
        Err(err) => Event::Error(err.to_string()),
      };
      return Some(event);
    }
  }
}

/// Leaves the alternate screen and raw mode. Safe to call when the terminal was never entered.
pub fn restore() -> Result<()> {
  if crossterm::terminal::is_raw_mode_enabled()? {
    crossterm::execute!(std::io::stderr(), LeaveAlternateScreen, cursor::Show)?;
    crossterm::terminal::disable_raw_mode()?;
  }
  Ok(())
}

impl Deref for Tui {
  type Target = ratatui::Terminal<Backend<Stderr>>;

  fn deref(&self) -> &Self::Target {
    &self.terminal
  }
}

impl DerefMut for Tui {
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.terminal
  }
}

impl Drop for Tui {
  fn drop(&mut self) {
    if let Err(err) = self.exit() {
      tracing::error!("Failed to restore the terminal: {}", err);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_restore_without_raw_mode_is_noop() {
    if crossterm::terminal::is_raw_mode_enabled().unwrap() {
      return;
    }

    assert!(restore().is_ok());
    assert!(!crossterm::terminal::is_raw_mode_enabled().unwrap());
  }
}
