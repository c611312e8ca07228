use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Display, Deserialize)]
pub enum Action {
  ConfirmSelection,
  Error(String),
  Quit,
  Render,
  Resize(u16, u16),
  SelectNext,
  SelectPrevious,
}

impl Action {
  /// Actions that can be bound to a key, in the order they are listed in the shortcuts legend.
  pub const BINDABLE: [Action; 4] = [Action::Quit, Action::SelectNext, Action::SelectPrevious, Action::ConfirmSelection];

  pub fn description(&self) -> &'static str {
    match self {
      Action::Quit => "Quit",
      Action::SelectNext => "Next branch",
      Action::SelectPrevious => "Previous branch",
      Action::ConfirmSelection => "Switch branch",
      _ => "",
    }
  }
}
