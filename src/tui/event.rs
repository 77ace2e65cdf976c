//! Keyboard handling for the TUI
//!
//! The form is always in text-entry mode, so printable characters go to the
//! focused field and commands live on control keys.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Key action derived from key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Quit the application
    Quit,
    /// Switch between farmer and city fields
    NextField,
    /// Submit farmer and city
    Submit,
    /// Export stored recommendations
    Export,
    /// Show help
    Help,
    /// Type into the focused field
    Input(char),
    /// Delete the last character of the focused field
    Backspace,
    /// No action
    None,
}

impl From<KeyEvent> for KeyAction {
    fn from(key: KeyEvent) -> Self {
        if key.kind == KeyEventKind::Release {
            return KeyAction::None;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char('c') if ctrl => KeyAction::Quit,
            KeyCode::Char('e') if ctrl => KeyAction::Export,
            KeyCode::Char(_) if ctrl => KeyAction::None,
            KeyCode::Tab | KeyCode::BackTab => KeyAction::NextField,
            KeyCode::Enter => KeyAction::Submit,
            KeyCode::F(1) => KeyAction::Help,
            KeyCode::Backspace => KeyAction::Backspace,
            KeyCode::Char(c) => KeyAction::Input(c),
            _ => KeyAction::None,
        }
    }
}
