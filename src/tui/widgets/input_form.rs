//! Farmer / city input form with the status line

use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::app::{DashboardApp, InputField};
use crate::tui::theme::THEME;

pub fn render_input_form(f: &mut Frame, area: Rect, app: &DashboardApp) {
    let block = Block::default()
        .title(" FARMER ")
        .title_style(THEME.title_style())
        .borders(Borders::ALL)
        .border_style(THEME.border_style());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(1),
    ])
    .split(inner);

    f.render_widget(
        Paragraph::new(field_line("Farmer", &app.farmer_input, app.focus == InputField::Farmer)),
        rows[0],
    );
    f.render_widget(
        Paragraph::new(field_line("City  ", &app.city_input, app.focus == InputField::City)),
        rows[1],
    );
    f.render_widget(
        Paragraph::new(Span::styled(&app.status, THEME.status_style(&app.status))),
        rows[3],
    );
}

fn field_line<'a>(label: &'a str, value: &'a str, focused: bool) -> Line<'a> {
    let (marker, style) = if focused {
        ("▸ ", THEME.focus_style())
    } else {
        ("  ", THEME.inactive_style())
    };
    let cursor = if focused { "_" } else { "" };

    Line::from(vec![
        Span::styled(marker, style),
        Span::styled(format!("{}: ", label), style),
        Span::styled(value, THEME.text_style()),
        Span::styled(cursor, THEME.focus_style()),
    ])
}
