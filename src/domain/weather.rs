use serde::{Deserialize, Serialize};

/// Condition text published when a weather cycle fails
pub const WEATHER_ERROR_CONDITION: &str = "error";

/// Current conditions for the selected city, replaced wholesale every cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// City the snapshot was fetched for, empty before the first cycle
    #[serde(default)]
    pub city: String,
    pub temperature_c: f64,
    pub condition: String,
    pub humidity: f64,
    pub wind_kph: f64,
}

impl WeatherSnapshot {
    /// Value published when the fetch or parse fails
    pub fn sentinel() -> Self {
        Self {
            city: String::new(),
            temperature_c: 0.0,
            condition: WEATHER_ERROR_CONDITION.to_string(),
            humidity: 0.0,
            wind_kph: 0.0,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.condition == WEATHER_ERROR_CONDITION
    }

    /// Tag the snapshot with the city it was requested for
    pub fn for_city(mut self, city: &str) -> Self {
        self.city = city.to_string();
        self
    }
}

impl Default for WeatherSnapshot {
    /// Placeholder shown before the first cycle completes
    fn default() -> Self {
        Self {
            city: String::new(),
            temperature_c: 0.0,
            condition: "Unknown".to_string(),
            humidity: 0.0,
            wind_kph: 0.0,
        }
    }
}

impl std::fmt::Display for WeatherSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}°C, {} (humidity {}%, wind {} km/h)",
            self.temperature_c, self.condition, self.humidity, self.wind_kph
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_values() {
        let s = WeatherSnapshot::sentinel();
        assert_eq!(s.temperature_c, 0.0);
        assert_eq!(s.condition, "error");
        assert_eq!(s.humidity, 0.0);
        assert_eq!(s.wind_kph, 0.0);
        assert!(s.is_sentinel());
        assert!(!WeatherSnapshot::default().is_sentinel());
    }

    #[test]
    fn test_for_city_keeps_readings() {
        let s = WeatherSnapshot::sentinel().for_city("Mumbai");
        assert_eq!(s.city, "Mumbai");
        assert!(s.is_sentinel());
    }
}
