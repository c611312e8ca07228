use std::sync::Arc;

use async_trait::async_trait;
use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::{
  layout::{Constraint, Layout, Rect},
  style::{Color, Modifier, Style},
  text::Span,
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use tracing::{info, warn};

use crate::{
  action::Action,
  components::Component,
  config::{Config, KeyBindings},
  error::Error,
  git::{GitRepo, SwitchExecutor},
  tui::Frame,
};

mod legend;
pub mod render_adapter;
pub mod selection_model;

pub use legend::Legend;
pub use render_adapter::{DisplayItem, RenderAdapter, RenderState, SwitchOutcome};
pub use selection_model::{ConfirmResult, SelectionModel};

/// The interactive branch list. Maps key presses to navigation and switch actions and redraws after each one.
pub struct BranchSwitcher {
  model: SelectionModel,
  renderer: RenderAdapter,
  executor: SwitchExecutor,
  outcome: SwitchOutcome,
  keybindings: KeyBindings,
  show_status_panel: bool,
  legend: Legend,
  list_state: ListState,
}

impl BranchSwitcher {
  pub fn new(model: SelectionModel, repo: Arc<dyn GitRepo>, config: &Config) -> Self {
    let list_state = ListState::default().with_selected(Some(model.highlighted_index()));
    BranchSwitcher {
      model,
      renderer: RenderAdapter::new(&config.active_marker),
      executor: SwitchExecutor::new(repo),
      outcome: SwitchOutcome::default(),
      keybindings: config.keybindings.clone(),
      show_status_panel: config.show_status_panel,
      legend: Legend::new(config.shortcuts()),
      list_state,
    }
  }

  pub fn model(&self) -> &SelectionModel {
    &self.model
  }

  pub fn outcome(&self) -> &SwitchOutcome {
    &self.outcome
  }

  pub fn render_state(&self) -> RenderState {
    self.renderer.project(&self.model, &self.outcome)
  }

  /// Runs the switch at most once per call. The model only changes when the switch succeeded.
  async fn confirm_selection(&mut self) -> Result<()> {
    let (index, target) = match self.model.confirm_selection() {
      ConfirmResult::Unchanged => {
        info!("Branch {} is already checked out", self.model.active_entry().name);
        return Ok(());
      },
      ConfirmResult::PendingSwitch { index, target } => (index, target),
    };

    self.outcome = match self.executor.switch_to(&target).await {
      Ok(output) => {
        self.model.apply_switch_success(index)?;
        SwitchOutcome::Switched { branch: target, output }
      },
      Err(err) => {
        let reason = match err {
          Error::SwitchFailed { reason } => reason,
          other => other.to_string(),
        };
        SwitchOutcome::Failed { branch: target, reason }
      },
    };
    Ok(())
  }

  fn render_list(&mut self, f: &mut Frame<'_>, area: Rect, items: &[DisplayItem]) {
    let list_items: Vec<ListItem> = items
      .iter()
      .map(|item| {
        let style = if item.emphasized {
          Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
          Style::default().fg(Color::White)
        };
        ListItem::new(Span::styled(item.text.clone(), style))
      })
      .collect();
    let list = List::new(list_items).block(Block::default().title("Branches").borders(Borders::ALL));

    // keeps the emphasized item scrolled into view
    self.list_state.select(items.iter().position(|item| item.emphasized));
    f.render_stateful_widget(list, area, &mut self.list_state);
  }

  fn render_status(&self, f: &mut Frame<'_>, area: Rect, status_text: &str) {
    let paragraph =
      Paragraph::new(status_text.to_string()).style(Style::default().fg(Color::White)).wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
  }
}

#[async_trait]
impl Component for BranchSwitcher {
  async fn handle_key_events(&mut self, key: KeyEvent) -> Result<Option<Action>> {
    Ok(self.keybindings.action_for(&key))
  }

  async fn update(&mut self, action: Action) -> Result<Option<Action>> {
    match action {
      Action::SelectNext => {
        self.model.move_next()?;
        Ok(Some(Action::Render))
      },
      Action::SelectPrevious => {
        self.model.move_previous()?;
        Ok(Some(Action::Render))
      },
      Action::ConfirmSelection => {
        self.confirm_selection().await?;
        Ok(Some(Action::Render))
      },
      _ => Ok(None),
    }
  }

  fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
    let state = self.render_state();
    let [body, legend_area] =
      Layout::vertical([Constraint::Fill(1), Constraint::Length(self.legend.height())]).areas(area);

    let list_area = if self.show_status_panel {
      let widest = state.items.iter().map(|item| item.text.chars().count()).max().unwrap_or(0);
      let list_width = (widest.max("Branches".len()) + 2).min(u16::MAX as usize) as u16;
      let [list_area, _, status_area] =
        Layout::horizontal([Constraint::Length(list_width), Constraint::Length(2), Constraint::Fill(1)]).areas(body);
      self.render_status(f, status_area, &state.status_text);
      list_area
    } else {
      body
    };

    if list_area.height < 3 {
      warn!("Terminal too small to draw the branch list: {:?}", area);
    }
    self.render_list(f, list_area, &state.items);
    self.legend.render(f, legend_area);
    Ok(())
  }
}
