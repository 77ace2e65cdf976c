//! Main UI rendering logic
//!
//! Orchestrates the layout and renders all widgets.

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::tui::app::DashboardApp;
use crate::tui::theme::THEME;
use crate::tui::widgets;

/// Render the entire UI
pub fn render(f: &mut Frame, app: &DashboardApp) {
    let chunks = Layout::vertical([
        Constraint::Length(6), // Input form + weather
        Constraint::Min(7),    // Recommendation (fills remaining)
        Constraint::Length(7), // Top market prices
        Constraint::Length(1), // Footer status bar
    ])
    .split(f.area());

    let top = Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[0]);

    widgets::render_input_form(f, top[0], app);
    widgets::render_weather(f, top[1], app);
    widgets::render_recommendation(f, chunks[1], app);
    widgets::render_market(f, chunks[2], app);
    widgets::render_footer(f, chunks[3], app);

    if app.show_help {
        render_help(f);
    }
}

fn render_help(f: &mut Frame) {
    let area = centered(f.area(), 52, 11);
    let lines = vec![
        Line::raw("Type a farmer name and city, then press Enter."),
        Line::raw(""),
        Line::raw("  Tab      switch between farmer and city"),
        Line::raw("  Enter    generate recommendations"),
        Line::raw("  Ctrl-E   export all recommendations to CSV"),
        Line::raw("  F1       toggle this help"),
        Line::raw("  Esc      quit"),
    ];

    let block = Block::default()
        .title(" HELP ")
        .title_style(THEME.title_style())
        .borders(Borders::ALL)
        .border_style(THEME.focus_style());

    f.render_widget(Clear, area);
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}
