//! WeatherAPI current-conditions client

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::domain::WeatherSnapshot;
use crate::error::{AgriError, Result};

/// Source of current weather conditions for a free-text location
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn current(&self, city: &str) -> Result<WeatherSnapshot>;
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    current: CurrentConditions,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    temp_c: f64,
    condition: ConditionText,
    humidity: f64,
    wind_kph: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionText {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Parse a `current.json` response body
pub fn parse_current(body: &str) -> Result<WeatherSnapshot> {
    let resp: CurrentResponse = serde_json::from_str(body)?;
    Ok(WeatherSnapshot {
        city: String::new(),
        temperature_c: resp.current.temp_c,
        condition: resp.current.condition.text,
        humidity: resp.current.humidity,
        wind_kph: resp.current.wind_kph,
    })
}

/// HTTP client for api.weatherapi.com
#[derive(Clone)]
pub struct WeatherApiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl WeatherApiClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl WeatherSource for WeatherApiClient {
    async fn current(&self, city: &str) -> Result<WeatherSnapshot> {
        let url = format!("{}/current.json", self.base_url);
        debug!("Fetching weather for {}", city);

        let response = self
            .client
            .get(&url)
            .query(&[("key", self.api_key.as_str()), ("q", city)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(AgriError::WeatherApi(format!("{}: {}", status, detail)));
        }

        parse_current(&body)
    }
}
