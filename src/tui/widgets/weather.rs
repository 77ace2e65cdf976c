//! Current weather panel

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::app::DashboardApp;
use crate::tui::theme::THEME;

pub fn render_weather(f: &mut Frame, area: Rect, app: &DashboardApp) {
    let block = Block::default()
        .title(format!(" WEATHER · {} ", app.city_input.trim()))
        .title_style(THEME.title_style())
        .borders(Borders::ALL)
        .border_style(THEME.border_style());

    let w = &app.weather;
    let lines = if w.failed {
        vec![
            Line::from(Span::styled("Weather unavailable", THEME.error_style())),
            Line::from(Span::styled(
                "retrying on the next cycle",
                THEME.inactive_style(),
            )),
        ]
    } else {
        vec![
            Line::from(vec![
                Span::styled(&w.temperature, THEME.highlight_style()),
                Span::raw("  "),
                Span::styled(&w.condition, THEME.text_style()),
            ]),
            Line::from(vec![
                Span::styled("Humidity ", THEME.inactive_style()),
                Span::raw(&w.humidity),
                Span::styled("  Wind ", THEME.inactive_style()),
                Span::raw(&w.wind),
            ]),
        ]
    };

    f.render_widget(Paragraph::new(lines).block(block), area);
}
