//! Coordinator Configuration

use std::time::Duration;

use crate::config::AppConfig;

/// Schedule and limits for the three agents
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    pub weather_interval: Duration,
    pub advisor_interval: Duration,
    pub market_interval: Duration,
    /// How many top-priced products are published and backfilled
    pub top_n: usize,
    /// City used when the user submits an empty one
    pub default_city: String,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            weather_interval: Duration::from_secs(60),
            advisor_interval: Duration::from_secs(30),
            market_interval: Duration::from_secs(60),
            top_n: 5,
            default_city: "Pune".to_string(),
        }
    }
}

impl CoordinatorConfig {
    pub fn from_app_config(cfg: &AppConfig) -> Self {
        Self {
            weather_interval: Duration::from_secs(cfg.weather.interval_secs),
            advisor_interval: Duration::from_secs(cfg.advisor.interval_secs),
            market_interval: Duration::from_secs(cfg.market.interval_secs),
            top_n: cfg.market.top_n,
            default_city: cfg.weather.default_city.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_app_config() {
        let mut app = AppConfig::default_config();
        app.market.interval_secs = 15;
        app.weather.default_city = " Nagpur ".to_string();

        let cfg = CoordinatorConfig::from_app_config(&app);
        assert_eq!(cfg.market_interval, Duration::from_secs(15));
        assert_eq!(cfg.advisor_interval, Duration::from_secs(30));
        assert_eq!(cfg.default_city, "Nagpur");
    }
}
