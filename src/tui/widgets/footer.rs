//! Footer status bar widget
//!
//! Key hints, last update time and the latest local notice.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::DashboardApp;
use crate::tui::theme::THEME;

pub fn render_footer(f: &mut Frame, area: Rect, app: &DashboardApp) {
    let mut spans = vec![
        Span::styled(" Tab", THEME.highlight_style()),
        Span::raw(" field  "),
        Span::styled("Enter", THEME.highlight_style()),
        Span::raw(" submit  "),
        Span::styled("Ctrl-E", THEME.highlight_style()),
        Span::raw(" export  "),
        Span::styled("F1", THEME.highlight_style()),
        Span::raw(" help  "),
        Span::styled("Esc", THEME.highlight_style()),
        Span::raw(" quit  "),
        Span::styled(
            format!("updated {}", app.last_update.format("%H:%M:%S")),
            THEME.inactive_style(),
        ),
    ];

    if let Some(notice) = &app.notice {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(notice, THEME.border_style()));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
