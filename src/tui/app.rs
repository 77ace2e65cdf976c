//! TUI Application state management
//!
//! Holds the input form and the display copies of the shared state.

use chrono::{DateTime, Utc};

use crate::coordinator::{DashboardSnapshot, INITIAL_STATUS};
use crate::tui::data::{
    market_rows_for_display, DisplayMarketRow, DisplayRecommendation, DisplayWeather,
};
use crate::domain::WeatherSnapshot;

/// Longest accepted input, in characters
const MAX_INPUT_LEN: usize = 64;

/// Which input field receives typed characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Farmer,
    City,
}

/// TUI Application state
pub struct DashboardApp {
    pub farmer_input: String,
    pub city_input: String,
    pub focus: InputField,
    pub weather: DisplayWeather,
    pub recommendation: Option<DisplayRecommendation>,
    pub market: Vec<DisplayMarketRow>,
    /// Status message published by the advisor
    pub status: String,
    /// Local feedback (export results), shown in the footer
    pub notice: Option<String>,
    pub show_help: bool,
    pub running: bool,
    pub last_update: DateTime<Utc>,
}

impl DashboardApp {
    pub fn new(default_city: &str) -> Self {
        Self {
            farmer_input: String::new(),
            city_input: default_city.to_string(),
            focus: InputField::Farmer,
            weather: DisplayWeather::from(&WeatherSnapshot::default()),
            recommendation: None,
            market: Vec::new(),
            status: INITIAL_STATUS.to_string(),
            notice: None,
            show_help: false,
            running: true,
            last_update: Utc::now(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Move focus to the other input field
    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            InputField::Farmer => InputField::City,
            InputField::City => InputField::Farmer,
        };
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            InputField::Farmer => &mut self.farmer_input,
            InputField::City => &mut self.city_input,
        }
    }

    pub fn push_char(&mut self, c: char) {
        let field = self.focused_mut();
        if field.chars().count() < MAX_INPUT_LEN {
            field.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        self.focused_mut().pop();
    }

    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    /// Replace every display value from a fresh snapshot
    pub fn apply_snapshot(&mut self, snapshot: &DashboardSnapshot) {
        self.weather = DisplayWeather::from(&snapshot.weather);
        self.recommendation = snapshot
            .recommendations
            .first()
            .map(DisplayRecommendation::from);
        self.market = market_rows_for_display(&snapshot.top_market);
        self.status = snapshot.status.clone();
        self.last_update = snapshot.taken_at;
    }
}
