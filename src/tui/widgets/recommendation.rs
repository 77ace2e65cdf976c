//! Latest recommendation panel
//!
//! Farmer, lead crop, full suggestion text and a sustainability gauge.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};
use rust_decimal::Decimal;

use crate::tui::app::DashboardApp;
use crate::tui::data::format_rupees;
use crate::tui::theme::THEME;

pub fn render_recommendation(f: &mut Frame, area: Rect, app: &DashboardApp) {
    let block = Block::default()
        .title(" RECOMMENDATION ")
        .title_style(THEME.title_style())
        .borders(Borders::ALL)
        .border_style(THEME.border_style());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(rec) = &app.recommendation else {
        let empty = Paragraph::new("No recommendation yet. Enter a farmer name and press Enter.")
            .style(THEME.inactive_style());
        f.render_widget(empty, inner);
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1), // farmer / lead crop
        Constraint::Length(1), // gauge
        Constraint::Length(1), // conditions
        Constraint::Min(1),    // suggestion text
    ])
    .split(inner);

    let price = if rec.market_price > Decimal::ZERO {
        Span::styled(format_rupees(rec.market_price), THEME.highlight_style())
    } else {
        Span::styled("price pending", THEME.inactive_style())
    };
    let saved = match rec.id {
        Some(id) => Span::styled(format!("  #{}", id), THEME.inactive_style()),
        None => Span::styled("  not saved", THEME.error_style()),
    };

    let header = Line::from(vec![
        Span::styled(&rec.farmer_name, THEME.text_style()),
        Span::raw("  Lead crop: "),
        Span::styled(&rec.lead_crop, THEME.highlight_style()),
        Span::raw("  "),
        price,
        saved,
    ]);
    f.render_widget(Paragraph::new(header), chunks[0]);

    let gauge = Gauge::default()
        .gauge_style(THEME.border_style())
        .ratio(rec.score_ratio())
        .label(format!("Sustainability {:.1}", rec.sustainability_score));
    f.render_widget(gauge, chunks[1]);

    let conditions = Line::from(vec![
        Span::styled(&rec.conditions, THEME.inactive_style()),
        Span::styled(format!("  weather: {}", rec.weather_condition), THEME.inactive_style()),
    ]);
    f.render_widget(Paragraph::new(conditions), chunks[2]);

    f.render_widget(
        Paragraph::new(rec.suggestion.as_str())
            .style(THEME.text_style())
            .wrap(Wrap { trim: true }),
        chunks[3],
    );
}
