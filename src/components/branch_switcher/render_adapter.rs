use super::selection_model::SelectionModel;

/// The result of the latest switch attempt, shown in the status panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SwitchOutcome {
  #[default]
  Loaded,
  Switched {
    branch: String,
    output: String,
  },
  Failed {
    branch: String,
    reason: String,
  },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
  pub text: String,
  pub emphasized: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderState {
  pub items: Vec<DisplayItem>,
  pub status_text: String,
}

/// Turns the model into toolkit independent display data. The active branch is prefixed with the marker,
/// emphasis follows the highlighted index only.
#[derive(Debug, Clone)]
pub struct RenderAdapter {
  active_marker: String,
}

impl RenderAdapter {
  pub fn new(active_marker: &str) -> Self {
    RenderAdapter { active_marker: active_marker.to_string() }
  }

  pub fn project(&self, model: &SelectionModel, outcome: &SwitchOutcome) -> RenderState {
    let padding = " ".repeat(self.active_marker.chars().count());
    let items = model
      .entries()
      .iter()
      .enumerate()
      .map(|(index, entry)| {
        let prefix = if entry.is_active { self.active_marker.as_str() } else { padding.as_str() };
        DisplayItem { text: format!("{} {}", prefix, entry.name), emphasized: index == model.highlighted_index() }
      })
      .collect();
    RenderState { items, status_text: status_text(outcome) }
  }
}

fn status_text(outcome: &SwitchOutcome) -> String {
  match outcome {
    SwitchOutcome::Loaded => String::from("Branches loaded."),
    SwitchOutcome::Switched { branch, output } if output.is_empty() => format!("Switched branch to '{branch}'"),
    SwitchOutcome::Switched { branch, output } => format!("Switched branch to '{branch}'\n{output}"),
    SwitchOutcome::Failed { branch, reason } => format!("Failed to switch to '{branch}': {reason}"),
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;
  use crate::git::BranchEntry;

  fn model() -> SelectionModel {
    SelectionModel::new(vec![
      BranchEntry::active("main".to_string()),
      BranchEntry::new("dev".to_string()),
      BranchEntry::new("feature-x".to_string()),
    ])
    .unwrap()
  }

  #[test]
  fn test_project_initial_state() {
    let state = RenderAdapter::new("*").project(&model(), &SwitchOutcome::Loaded);

    assert_eq!(state, RenderState {
      items: vec![
        DisplayItem { text: "* main".to_string(), emphasized: true },
        DisplayItem { text: "  dev".to_string(), emphasized: false },
        DisplayItem { text: "  feature-x".to_string(), emphasized: false },
      ],
      status_text: "Branches loaded.".to_string(),
    });
  }

  #[test]
  fn test_project_highlight_and_active_are_independent() {
    let mut model = model();
    model.move_next().unwrap();

    let state = RenderAdapter::new("*").project(&model, &SwitchOutcome::Loaded);

    assert_eq!(state.items[0], DisplayItem { text: "* main".to_string(), emphasized: false });
    assert_eq!(state.items[1], DisplayItem { text: "  dev".to_string(), emphasized: true });
  }

  #[test]
  fn test_project_uses_configured_marker_width() {
    let state = RenderAdapter::new("->").project(&model(), &SwitchOutcome::Loaded);

    assert_eq!(state.items[0].text, "-> main");
    assert_eq!(state.items[1].text, "   dev");
  }

  #[test]
  fn test_status_after_switch_echoes_output() {
    let outcome =
      SwitchOutcome::Switched { branch: "dev".to_string(), output: "Switched to branch 'dev'".to_string() };

    let state = RenderAdapter::new("*").project(&model(), &outcome);

    assert_eq!(state.status_text, "Switched branch to 'dev'\nSwitched to branch 'dev'");
  }

  #[test]
  fn test_status_after_switch_without_output() {
    let outcome = SwitchOutcome::Switched { branch: "dev".to_string(), output: String::new() };

    assert_eq!(status_text(&outcome), "Switched branch to 'dev'");
  }

  #[test]
  fn test_status_after_failure() {
    let outcome = SwitchOutcome::Failed { branch: "dev".to_string(), reason: "local changes".to_string() };

    assert_eq!(status_text(&outcome), "Failed to switch to 'dev': local changes");
  }
}
