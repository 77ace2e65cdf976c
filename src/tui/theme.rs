//! Theme and color definitions for the TUI dashboard
//!
//! Green borders, yellow highlights, red for failures.

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub border: Color,
    /// Border of the focused input field
    pub focus: Color,
    pub title: Color,
    pub highlight: Color,
    pub error: Color,
    pub inactive: Color,
    pub text: Color,
    /// Price and score bar fill
    pub bar_filled: Color,
    pub bar_empty: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            border: Color::Green,
            focus: Color::Yellow,
            title: Color::Green,
            highlight: Color::Yellow,
            error: Color::Red,
            inactive: Color::DarkGray,
            text: Color::White,
            bar_filled: Color::LightGreen,
            bar_empty: Color::DarkGray,
        }
    }
}

impl Theme {
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn focus_style(&self) -> Style {
        Style::default().fg(self.focus)
    }

    pub fn title_style(&self) -> Style {
        Style::default().fg(self.title).add_modifier(Modifier::BOLD)
    }

    pub fn highlight_style(&self) -> Style {
        Style::default().fg(self.highlight)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn inactive_style(&self) -> Style {
        Style::default().fg(self.inactive)
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    /// Status line: red for failures and missing input, yellow otherwise
    pub fn status_style(&self, status: &str) -> Style {
        if status.starts_with("Error") || status.starts_with("Please") {
            self.error_style()
        } else {
            self.highlight_style()
        }
    }
}

/// Global theme instance
pub static THEME: std::sync::LazyLock<Theme> = std::sync::LazyLock::new(Theme::default);
