use crate::{error::Error, git::BranchEntry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmResult {
  /// The highlighted branch is already checked out.
  Unchanged,
  PendingSwitch { index: usize, target: String },
}

/// Branch entries with the highlighted (navigated to) index and the active (checked out) index.
///
/// The entries are fixed once constructed. `highlighted` moves on navigation, `active` only moves when a switch
/// has succeeded.
#[derive(Debug, Clone)]
pub struct SelectionModel {
  entries: Vec<BranchEntry>,
  highlighted: usize,
  active: usize,
}

impl SelectionModel {
  /// Builds the model and highlights the active branch. Only the first entry flagged active is kept active.
  pub fn new(mut entries: Vec<BranchEntry>) -> Result<Self, Error> {
    if entries.is_empty() {
      return Err(Error::EmptyModel);
    }
    let active = entries.iter().position(|entry| entry.is_active).ok_or(Error::NoActiveBranch)?;
    for (index, entry) in entries.iter_mut().enumerate() {
      entry.is_active = index == active;
    }
    Ok(SelectionModel { entries, highlighted: active, active })
  }

  pub fn entries(&self) -> &[BranchEntry] {
    &self.entries
  }

  pub fn highlighted_index(&self) -> usize {
    self.highlighted
  }

  pub fn active_index(&self) -> usize {
    self.active
  }

  pub fn active_entry(&self) -> &BranchEntry {
    &self.entries[self.active]
  }

  pub fn move_next(&mut self) -> Result<(), Error> {
    let count = self.entries.len();
    if count == 0 {
      return Err(Error::EmptyModel);
    }
    self.highlighted = (self.highlighted + 1) % count;
    Ok(())
  }

  pub fn move_previous(&mut self) -> Result<(), Error> {
    let count = self.entries.len();
    if count == 0 {
      return Err(Error::EmptyModel);
    }
    self.highlighted = (self.highlighted + count - 1) % count;
    Ok(())
  }

  /// Does not touch the active branch, see [`SelectionModel::apply_switch_success`].
  pub fn confirm_selection(&self) -> ConfirmResult {
    if self.highlighted == self.active {
      return ConfirmResult::Unchanged;
    }
    ConfirmResult::PendingSwitch { index: self.highlighted, target: self.entries[self.highlighted].name.clone() }
  }

  pub fn apply_switch_success(&mut self, index: usize) -> Result<(), Error> {
    let len = self.entries.len();
    if index >= len {
      return Err(Error::IndexOutOfRange { index, len });
    }
    self.entries[self.active].is_active = false;
    self.entries[index].is_active = true;
    self.active = index;
    Ok(())
  }
}
