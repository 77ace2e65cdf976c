//! Top market prices with relative price bars

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::app::DashboardApp;
use crate::tui::data::{format_rupees, DisplayMarketRow};
use crate::tui::theme::THEME;

const BAR_WIDTH: usize = 24;

pub fn render_market(f: &mut Frame, area: Rect, app: &DashboardApp) {
    let block = Block::default()
        .title(" TOP MARKET PRICES (₹/ton) ")
        .title_style(THEME.title_style())
        .borders(Borders::ALL)
        .border_style(THEME.border_style());

    if app.market.is_empty() {
        let waiting = Paragraph::new("Waiting for market data")
            .style(THEME.inactive_style())
            .block(block);
        f.render_widget(waiting, area);
        return;
    }

    let lines: Vec<Line> = app.market.iter().map(market_line).collect();
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn market_line(row: &DisplayMarketRow) -> Line<'_> {
    let filled = (row.bar_ratio * BAR_WIDTH as f64).round() as usize;
    let empty = BAR_WIDTH.saturating_sub(filled);

    Line::from(vec![
        Span::styled(format!(" {}. ", row.rank), THEME.inactive_style()),
        Span::styled(format!("{:<14}", row.product), THEME.text_style()),
        Span::styled("█".repeat(filled), THEME.border_style().fg(THEME.bar_filled)),
        Span::styled("░".repeat(empty), THEME.inactive_style().fg(THEME.bar_empty)),
        Span::raw("  "),
        Span::styled(format_rupees(row.price), THEME.highlight_style()),
    ])
}
