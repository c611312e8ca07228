use std::{collections::HashMap, path::PathBuf};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use derive_deref::{Deref, DerefMut};
use serde::{Deserialize, de::Deserializer};

use crate::{action::Action, utils::get_config_dir};

const CONFIG: &str = r#"{
  "show_status_panel": true,
  "active_marker": "*",
  "keybindings": {
    "q": "Quit",
    "<ctrl-c>": "Quit",
    "<down>": "SelectNext",
    "j": "SelectNext",
    "<up>": "SelectPrevious",
    "k": "SelectPrevious",
    "<enter>": "ConfirmSelection"
  }
}"#;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub keybindings: KeyBindings,
  #[serde(default = "default_show_status_panel")]
  pub show_status_panel: bool,
  #[serde(default = "default_active_marker")]
  pub active_marker: String,
}

fn default_show_status_panel() -> bool {
  true
}

fn default_active_marker() -> String {
  String::from("*")
}

impl Config {
  /// Loads user config files from the config directory over the built in defaults.
  pub fn new() -> Result<Self> {
    let config_dir = get_config_dir();
    let builder = config::Config::builder();
    Self::from_builder(builder, config_dir)
  }

  /// The built in configuration.
  pub fn defaults() -> Result<Self> {
    Ok(json5::from_str(CONFIG)?)
  }

  fn from_builder(mut builder: config::ConfigBuilder<config::builder::DefaultState>, dir: PathBuf) -> Result<Self> {
    let default_config = Self::defaults()?;
    let config_files = [
      ("config.json5", config::FileFormat::Json5),
      ("config.json", config::FileFormat::Json),
      ("config.toml", config::FileFormat::Toml),
    ];
    for (file, format) in &config_files {
      builder = builder.add_source(config::File::from(dir.join(file)).format(*format).required(false));
    }

    let mut cfg: Self = builder.build()?.try_deserialize()?;
    // defaults only fill in actions the user left unbound
    let user_actions: Vec<Action> = cfg.keybindings.values().cloned().collect();
    for (key, action) in default_config.keybindings.iter() {
      if !user_actions.contains(action) {
        cfg.keybindings.entry(*key).or_insert_with(|| action.clone());
      }
    }
    if cfg.active_marker.is_empty() {
      return Err(config::ConfigError::Message("active_marker must not be empty".to_string()).into());
    }
    Ok(cfg)
  }

  /// The keys bound to each bindable action, in legend order.
  pub fn shortcuts(&self) -> Vec<(String, &'static str)> {
    Action::BINDABLE
      .iter()
      .filter_map(|action| {
        let mut keys: Vec<String> = self
          .keybindings
          .iter()
          .filter(|(_, bound)| *bound == action)
          .map(|(key, _)| key_event_to_string(key))
          .collect();
        if keys.is_empty() {
          return None;
        }
        keys.sort();
        Some((keys.join(", "), action.description()))
      })
      .collect()
  }
}

#[derive(Clone, Debug, Default, Deref, DerefMut)]
pub struct KeyBindings(pub HashMap<KeyEvent, Action>);

impl KeyBindings {
  pub fn action_for(&self, key: &KeyEvent) -> Option<Action> {
    self.0.get(&normalize(KeyEvent::new(key.code, key.modifiers))).cloned()
  }
}

/// Shift is already carried by the case of a character key.
fn normalize(key: KeyEvent) -> KeyEvent {
  match key.code {
    KeyCode::Char(_) => KeyEvent::new(key.code, key.modifiers.difference(KeyModifiers::SHIFT)),
    _ => key,
  }
}

impl<'de> Deserialize<'de> for KeyBindings {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    let parsed_map = HashMap::<String, Action>::deserialize(deserializer)?;
    let mut keybindings = HashMap::new();
    for (key_str, action) in parsed_map {
      if !Action::BINDABLE.contains(&action) {
        return Err(serde::de::Error::custom(format!("{action} cannot be bound to a key")));
      }
      let key = parse_key_event(&key_str).map_err(serde::de::Error::custom)?;
      keybindings.insert(key, action);
    }
    Ok(KeyBindings(keybindings))
  }
}

/// Parses `q`, `<enter>`, `<ctrl-c>` style key notation.
pub fn parse_key_event(raw: &str) -> Result<KeyEvent, String> {
  let inner = match raw.strip_prefix('<').and_then(|rest| rest.strip_suffix('>')) {
    Some(inner) => inner,
    None if raw.chars().count() == 1 => raw,
    None => return Err(format!("Unable to parse `{raw}`, wrap named keys in angle brackets like `<enter>`")),
  };

  let mut modifiers = KeyModifiers::empty();
  let mut remaining = inner;
  loop {
    let lower = remaining.to_ascii_lowercase();
    let (modifier, len) = if lower.starts_with("ctrl-") {
      (KeyModifiers::CONTROL, 5)
    } else if lower.starts_with("alt-") {
      (KeyModifiers::ALT, 4)
    } else if lower.starts_with("shift-") {
      (KeyModifiers::SHIFT, 6)
    } else {
      break;
    };
    modifiers.insert(modifier);
    remaining = &remaining[len..];
  }

  let code = match remaining.to_ascii_lowercase().as_str() {
    "enter" => KeyCode::Enter,
    "esc" => KeyCode::Esc,
    "up" => KeyCode::Up,
    "down" => KeyCode::Down,
    "left" => KeyCode::Left,
    "right" => KeyCode::Right,
    "home" => KeyCode::Home,
    "end" => KeyCode::End,
    "pageup" => KeyCode::PageUp,
    "pagedown" => KeyCode::PageDown,
    "tab" => KeyCode::Tab,
    "backspace" => KeyCode::Backspace,
    "space" => KeyCode::Char(' '),
    _ => {
      let mut chars = remaining.chars();
      match (chars.next(), chars.next()) {
        (Some(c), None) if modifiers.contains(KeyModifiers::SHIFT) => KeyCode::Char(c.to_ascii_uppercase()),
        (Some(c), None) => KeyCode::Char(c),
        _ => return Err(format!("Unable to parse `{raw}`")),
      }
    },
  };
  Ok(normalize(KeyEvent::new(code, modifiers)))
}

pub fn key_event_to_string(key_event: &KeyEvent) -> String {
  let code = match key_event.code {
    KeyCode::Char(' ') => String::from("space"),
    KeyCode::Char(c) if key_event.modifiers.is_empty() => return c.to_string(),
    KeyCode::Char(c) => c.to_string(),
    KeyCode::Enter => String::from("enter"),
    KeyCode::Esc => String::from("esc"),
    KeyCode::Up => String::from("up"),
    KeyCode::Down => String::from("down"),
    KeyCode::Left => String::from("left"),
    KeyCode::Right => String::from("right"),
    KeyCode::Home => String::from("home"),
    KeyCode::End => String::from("end"),
    KeyCode::PageUp => String::from("pageup"),
    KeyCode::PageDown => String::from("pagedown"),
    KeyCode::Tab => String::from("tab"),
    KeyCode::Backspace => String::from("backspace"),
    other => format!("{other:?}").to_lowercase(),
  };

  let mut parts: Vec<&str> = vec![];
  if key_event.modifiers.contains(KeyModifiers::CONTROL) {
    parts.push("ctrl");
  }
  if key_event.modifiers.contains(KeyModifiers::ALT) {
    parts.push("alt");
  }
  if key_event.modifiers.contains(KeyModifiers::SHIFT) {
    parts.push("shift");
  }
  parts.push(code.as_str());
  format!("<{}>", parts.join("-"))
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn test_parse_single_char() {
    assert_eq!(parse_key_event("q").unwrap(), KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
  }

  #[test]
  fn test_parse_named_keys() {
    assert_eq!(parse_key_event("<down>").unwrap(), KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
    assert_eq!(parse_key_event("<Enter>").unwrap(), KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
  }

  #[test]
  fn test_parse_with_modifiers() {
    assert_eq!(parse_key_event("<ctrl-c>").unwrap(), KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert_eq!(
      parse_key_event("<ctrl-alt-up>").unwrap(),
      KeyEvent::new(KeyCode::Up, KeyModifiers::CONTROL | KeyModifiers::ALT)
    );
  }

  #[test]
  fn test_parse_shifted_char_matches_uppercase() {
    let upper = KeyEvent::new(KeyCode::Char('Q'), KeyModifiers::NONE);

    assert_eq!(parse_key_event("<shift-q>").unwrap(), upper);
    assert_eq!(parse_key_event("Q").unwrap(), upper);
  }

  #[test]
  fn test_uppercase_binding_fires_for_shifted_key_press() {
    let config = json5::from_str::<Config>(r#"{ "keybindings": { "Q": "Quit", "<shift-j>": "SelectNext" } }"#).unwrap();

    assert_eq!(
      config.keybindings.action_for(&KeyEvent::new(KeyCode::Char('Q'), KeyModifiers::SHIFT)),
      Some(Action::Quit)
    );
    assert_eq!(
      config.keybindings.action_for(&KeyEvent::new(KeyCode::Char('J'), KeyModifiers::SHIFT)),
      Some(Action::SelectNext)
    );
    assert_eq!(config.keybindings.action_for(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)), None);
  }

  #[test]
  fn test_parse_invalid() {
    assert!(parse_key_event("enter").is_err());
    assert!(parse_key_event("<nope>").is_err());
  }

  #[test]
  fn test_key_event_to_string() {
    assert_eq!(key_event_to_string(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)), "q");
    assert_eq!(key_event_to_string(&KeyEvent::new(KeyCode::Down, KeyModifiers::NONE)), "<down>");
    assert_eq!(key_event_to_string(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)), "<ctrl-c>");
  }

  #[test]
  fn test_defaults() {
    let config = Config::defaults().unwrap();

    assert!(config.show_status_panel);
    assert_eq!(config.active_marker, "*");
    assert_eq!(
      config.keybindings.action_for(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)),
      Some(Action::Quit)
    );
    assert_eq!(
      config.keybindings.action_for(&KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
      Some(Action::ConfirmSelection)
    );
  }

  #[test]
  fn test_unbindable_action_is_rejected() {
    let result = json5::from_str::<Config>(r#"{ "keybindings": { "r": "Render" } }"#);

    assert!(result.is_err());
  }

  #[test]
  fn test_shortcuts_lists_keys_per_action() {
    let shortcuts = Config::defaults().unwrap().shortcuts();

    assert_eq!(shortcuts, vec![
      ("<ctrl-c>, q".to_string(), "Quit"),
      ("<down>, j".to_string(), "Next branch"),
      ("<up>, k".to_string(), "Previous branch"),
      ("<enter>".to_string(), "Switch branch"),
    ]);
  }

  #[test]
  fn test_missing_config_files_use_defaults() {
    let dir = std::env::temp_dir().join("git-branch-switcher-missing-config");
    let config = Config::from_builder(config::Config::builder(), dir).unwrap();

    assert!(config.show_status_panel);
    assert_eq!(config.active_marker, "*");
    assert_eq!(config.keybindings.len(), 7);
  }
}
