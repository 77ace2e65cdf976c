#[cfg(test)]
mod tests {
    use crate::coordinator::{DashboardSnapshot, INITIAL_STATUS};
    use crate::domain::{FarmConditionRow, MarketRow, Recommendation, WeatherSnapshot};
    use crate::tui::{ui, DashboardApp, InputField, KeyAction};
    use chrono::Utc;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};
    use rust_decimal_macros::dec;

    fn snapshot() -> DashboardSnapshot {
        let row = FarmConditionRow {
            crop_type: "Soybean".to_string(),
            soil_ph: 6.5,
            soil_moisture: 35.0,
            temperature_c: 24.0,
            rainfall_mm: 180.0,
            sustainability_score: 92.0,
        };
        let rec = Recommendation::draft(
            "Asha",
            "Based on your conditions, consider these crops: Soybean, Rice, Wheat, Millet, and Sorghum."
                .to_string(),
            &row,
            "Sunny",
        )
        .with_id(Some(7));

        DashboardSnapshot {
            weather: WeatherSnapshot {
                city: "Pune".to_string(),
                temperature_c: 31.2,
                condition: "Sunny".to_string(),
                humidity: 40.0,
                wind_kph: 12.0,
            },
            recommendations: vec![rec],
            top_market: vec![
                MarketRow::new("Cotton", dec!(610)),
                MarketRow::new("Rice", dec!(500)),
            ],
            status: "Recommendations generated for Asha!".to_string(),
            taken_at: Utc::now(),
        }
    }

    fn screen(app: &DashboardApp) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| ui::render(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_app_new() {
        let app = DashboardApp::new("Pune");
        assert!(app.is_running());
        assert_eq!(app.city_input, "Pune");
        assert_eq!(app.focus, InputField::Farmer);
        assert_eq!(app.status, INITIAL_STATUS);
        assert!(app.recommendation.is_none());
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut app = DashboardApp::new("");
        for c in "Asha".chars() {
            app.push_char(c);
        }
        app.next_field();
        for c in "Nasik".chars() {
            app.push_char(c);
        }
        app.pop_char();
        app.push_char('k');

        assert_eq!(app.farmer_input, "Asha");
        assert_eq!(app.city_input, "Nasik");
        app.next_field();
        assert_eq!(app.focus, InputField::Farmer);
    }

    #[test]
    fn test_apply_snapshot() {
        let mut app = DashboardApp::new("Pune");
        app.apply_snapshot(&snapshot());

        let rec = app.recommendation.as_ref().unwrap();
        assert_eq!(rec.farmer_name, "Asha");
        assert_eq!(rec.lead_crop, "Soybean");
        assert_eq!(rec.id, Some(7));
        assert_eq!(app.market.len(), 2);
        assert_eq!(app.market[1].bar_ratio, 500.0 / 610.0);
        assert_eq!(app.weather.condition, "Sunny");
        assert_eq!(app.status, "Recommendations generated for Asha!");
    }

    #[test]
    fn test_key_mapping() {
        let key = |code, modifiers| KeyAction::from(KeyEvent::new(code, modifiers));

        assert_eq!(key(KeyCode::Esc, KeyModifiers::NONE), KeyAction::Quit);
        assert_eq!(key(KeyCode::Char('c'), KeyModifiers::CONTROL), KeyAction::Quit);
        assert_eq!(key(KeyCode::Char('e'), KeyModifiers::CONTROL), KeyAction::Export);
        assert_eq!(key(KeyCode::Tab, KeyModifiers::NONE), KeyAction::NextField);
        assert_eq!(key(KeyCode::Enter, KeyModifiers::NONE), KeyAction::Submit);
        assert_eq!(key(KeyCode::Char('q'), KeyModifiers::NONE), KeyAction::Input('q'));
        assert_eq!(key(KeyCode::Char('A'), KeyModifiers::SHIFT), KeyAction::Input('A'));
        assert_eq!(key(KeyCode::Backspace, KeyModifiers::NONE), KeyAction::Backspace);
        assert_eq!(key(KeyCode::F(1), KeyModifiers::NONE), KeyAction::Help);
    }

    #[test]
    fn test_render_shows_all_panels() {
        let mut app = DashboardApp::new("Pune");
        app.apply_snapshot(&snapshot());

        let text = screen(&app);
        assert!(text.contains("RECOMMENDATION"));
        assert!(text.contains("Lead crop: Soybean"));
        assert!(text.contains("Cotton"));
        assert!(text.contains("Sunny"));
        assert!(text.contains("Recommendations generated for Asha!"));
    }

    #[test]
    fn test_render_before_first_data() {
        let app = DashboardApp::new("Pune");
        let text = screen(&app);
        assert!(text.contains("Waiting for market data"));
        assert!(text.contains("No recommendation yet"));
    }

    #[test]
    fn test_quit() {
        let mut app = DashboardApp::new("Pune");
        app.quit();
        assert!(!app.is_running());
    }
}
