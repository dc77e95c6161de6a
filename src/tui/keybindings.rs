use crate::tui::action::Action;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;

/// Characters that need Shift on a US layout; terminals disagree on whether
/// they report the modifier, so patterns always carry it.
const SHIFTED_SYMBOLS: &str = "!@#$%^&*()_+{}|:\"<>?~";

/// Maps KeyEvents to Actions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBindings {
    #[serde(rename = "bindings")]
    bindings_list: Vec<KeyBinding>,

    #[serde(skip)]
    bindings_map: HashMap<KeyPattern, Action>,
}

/// Single keybinding entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBinding {
    pub key: String,
    pub action: Action,
}

/// Pattern for matching key events
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPattern {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let bindings_list = vec![
            // Cursor
            KeyBinding::new("Up", Action::MoveUp),
            KeyBinding::new("Down", Action::MoveDown),
            KeyBinding::new("k", Action::MoveUp),
            KeyBinding::new("j", Action::MoveDown),
            KeyBinding::new("PageUp", Action::PageUp),
            KeyBinding::new("PageDown", Action::PageDown),
            KeyBinding::new("Ctrl+u", Action::PageUp),
            KeyBinding::new("Ctrl+d", Action::PageDown),
            KeyBinding::new("Home", Action::GoToTop),
            KeyBinding::new("End", Action::GoToBottom),
            KeyBinding::new("g", Action::GoToTop),
            KeyBinding::new("G", Action::GoToBottom),
            // Column selection
            KeyBinding::new("Enter", Action::Confirm),
            KeyBinding::new("Space", Action::Confirm),
            KeyBinding::new("n", Action::NextColumn),
            KeyBinding::new("p", Action::PrevColumn),
            KeyBinding::new("Right", Action::NextColumn),
            KeyBinding::new("Left", Action::PrevColumn),
            // Table
            KeyBinding::new("s", Action::Sort),
            KeyBinding::new("S", Action::ReverseSort),
            // View
            KeyBinding::new("Tab", Action::FocusNext),
            KeyBinding::new("Shift+Tab", Action::FocusPrev),
            KeyBinding::new("?", Action::ToggleHelp),
            KeyBinding::new("F1", Action::ToggleHelp),
            KeyBinding::new("r", Action::Refresh),
            KeyBinding::new("F5", Action::Refresh),
            // Application
            KeyBinding::new("q", Action::Quit),
            KeyBinding::new("Ctrl+c", Action::Quit),
            KeyBinding::new("Esc", Action::Cancel),
        ];

        let bindings_map = Self::build_map(&bindings_list);

        Self {
            bindings_list,
            bindings_map,
        }
    }
}

impl KeyBindings {
    fn build_map(bindings: &[KeyBinding]) -> HashMap<KeyPattern, Action> {
        bindings
            .iter()
            .filter_map(|b| {
                KeyPattern::from_string(&b.key)
                    .ok()
                    .map(|pattern| (pattern, b.action))
            })
            .collect()
    }

    /// Get action for key event
    pub fn get_action(&self, key: &KeyEvent) -> Option<Action> {
        let pattern = KeyPattern::from_event(key);
        self.bindings_map.get(&pattern).copied()
    }

    /// Load from JSON config file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut bindings: KeyBindings = serde_json::from_str(&content)?;
        bindings.bindings_map = Self::build_map(&bindings.bindings_list);
        Ok(bindings)
    }

    /// Save to JSON config file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get all bindings for an action (for help display)
    pub fn get_keys_for_action(&self, action: Action) -> Vec<String> {
        self.bindings_list
            .iter()
            .filter(|b| b.action == action)
            .map(|b| b.key.clone())
            .collect()
    }

    /// Actions without any key, with their descriptions
    pub fn get_unbound_actions(&self) -> Vec<(Action, &'static str)> {
        let bound_actions: HashSet<Action> = self.bindings_list.iter().map(|b| b.action).collect();

        Action::all()
            .into_iter()
            .filter(|action| !bound_actions.contains(action))
            .map(|action| (action, action.description()))
            .collect()
    }

    /// Validate bindings and return warnings
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        let mut seen_keys: HashMap<String, Action> = HashMap::new();
        for binding in &self.bindings_list {
            if let Some(existing_action) = seen_keys.get(&binding.key) {
                warnings.push(format!(
                    "Duplicate key '{}': bound to both {:?} and {:?}",
                    binding.key, existing_action, binding.action
                ));
            } else {
                seen_keys.insert(binding.key.clone(), binding.action);
            }
        }

        let unbound = self.get_unbound_actions();
        if !unbound.is_empty() {
            warnings.push(format!(
                "{} action(s) have no keybindings: {}",
                unbound.len(),
                unbound
                    .iter()
                    .map(|(action, _)| format!("{action:?}"))
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }

        for binding in &self.bindings_list {
            if let Err(err) = KeyPattern::from_string(&binding.key) {
                warnings.push(format!(
                    "Invalid key pattern '{}' for action {:?}: {err}",
                    binding.key, binding.action
                ));
            }
        }

        warnings
    }
}

impl KeyBinding {
    pub fn new(key: &str, action: Action) -> Self {
        Self {
            key: key.to_string(),
            action,
        }
    }
}

impl KeyPattern {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }.normalized()
    }

    pub fn from_event(event: &KeyEvent) -> Self {
        Self::new(event.code, event.modifiers)
    }

    /// Fold the shapes terminals report for shifted keys into one
    fn normalized(mut self) -> Self {
        match self.code {
            KeyCode::Char(c) if c.is_ascii_uppercase() => {
                self.code = KeyCode::Char(c.to_ascii_lowercase());
                self.modifiers |= KeyModifiers::SHIFT;
            }
            KeyCode::Char(c) if SHIFTED_SYMBOLS.contains(c) => {
                self.modifiers |= KeyModifiers::SHIFT;
            }
            KeyCode::BackTab => {
                self.code = KeyCode::Tab;
                self.modifiers |= KeyModifiers::SHIFT;
            }
            _ => {}
        }
        self
    }

    /// Parse from string (e.g., "Ctrl+c", "Shift+Tab", "G", "?")
    pub fn from_string(s: &str) -> Result<Self, String> {
        // "+" on its own is a key, not a separator
        let parts: Vec<&str> = if s == "+" { vec![s] } else { s.split('+').collect() };
        let (key_part, modifier_parts) = match parts.split_last() {
            Some((key, mods)) if !key.is_empty() => (*key, mods),
            _ => return Err(format!("Empty key in '{s}'")),
        };

        let mut modifiers = KeyModifiers::empty();
        for part in modifier_parts {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                "cmd" | "command" | "super" => {
                    #[cfg(target_os = "macos")]
                    {
                        modifiers |= KeyModifiers::SUPER;
                    }
                    #[cfg(not(target_os = "macos"))]
                    {
                        modifiers |= KeyModifiers::CONTROL;
                    }
                }
                _ => return Err(format!("Unknown modifier: {part}")),
            }
        }

        let mut chars = key_part.chars();
        let code = match (chars.next(), chars.next()) {
            // Single characters keep their case so "G" means Shift+g
            (Some(ch), None) => KeyCode::Char(ch),
            _ => match key_part.to_lowercase().as_str() {
                "up" => KeyCode::Up,
                "down" => KeyCode::Down,
                "left" => KeyCode::Left,
                "right" => KeyCode::Right,
                "pageup" | "pgup" => KeyCode::PageUp,
                "pagedown" | "pgdown" | "pgdn" => KeyCode::PageDown,
                "home" => KeyCode::Home,
                "end" => KeyCode::End,
                "tab" => KeyCode::Tab,
                "backtab" => KeyCode::BackTab,
                "enter" | "return" => KeyCode::Enter,
                "esc" | "escape" => KeyCode::Esc,
                "space" => KeyCode::Char(' '),
                f if f.starts_with('f') => match f[1..].parse::<u8>() {
                    Ok(n) if (1..=12).contains(&n) => KeyCode::F(n),
                    _ => return Err(format!("Invalid function key: {key_part}")),
                },
                _ => return Err(format!("Unknown key: {key_part}")),
            },
        };

        Ok(Self::new(code, modifiers))
    }
}

impl fmt::Display for KeyPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            write!(f, "Ctrl+")?;
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            write!(f, "Alt+")?;
        }
        let shifted_char = matches!(self.code, KeyCode::Char(c) if c.is_ascii_alphabetic() || SHIFTED_SYMBOLS.contains(c));
        if self.modifiers.contains(KeyModifiers::SHIFT) && !shifted_char {
            write!(f, "Shift+")?;
        }
        match self.code {
            KeyCode::Char(' ') => write!(f, "Space"),
            KeyCode::Char(c) if self.modifiers.contains(KeyModifiers::SHIFT) => {
                write!(f, "{}", c.to_ascii_uppercase())
            }
            KeyCode::Char(c) => write!(f, "{c}"),
            KeyCode::Up => write!(f, "↑"),
            KeyCode::Down => write!(f, "↓"),
            KeyCode::Left => write!(f, "←"),
            KeyCode::Right => write!(f, "→"),
            KeyCode::PageUp => write!(f, "PgUp"),
            KeyCode::PageDown => write!(f, "PgDn"),
            KeyCode::F(n) => write!(f, "F{n}"),
            other => write!(f, "{other:?}"),
        }
    }
}
