use ratatui::{
  layout::Rect,
  style::{Color, Style},
  text::{Line, Span, Text},
  widgets::{Block, Borders, Paragraph},
};

use crate::tui::Frame;

/// The "Shortcuts" box listing every bound key.
#[derive(Debug, Default)]
pub struct Legend {
  shortcuts: Vec<(String, &'static str)>,
}

impl Legend {
  pub fn new(shortcuts: Vec<(String, &'static str)>) -> Self {
    Legend { shortcuts }
  }

  /// Rows plus borders.
  pub fn height(&self) -> u16 {
    self.shortcuts.len() as u16 + 2
  }

  pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
    let key_width = self.shortcuts.iter().map(|(keys, _)| keys.chars().count()).max().unwrap_or(0);
    let lines: Vec<Line> = self
      .shortcuts
      .iter()
      .map(|(keys, description)| {
        Line::from(vec![
          Span::styled(format!("{keys:<key_width$}  "), Style::default().fg(Color::Yellow)),
          Span::raw(*description),
        ])
      })
      .collect();

    let paragraph = Paragraph::new(Text::from(lines))
      .block(Block::default().title("Shortcuts").borders(Borders::ALL))
      .style(Style::default().fg(Color::White));
    frame.render_widget(paragraph, area);
  }
}
