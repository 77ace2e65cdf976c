//! WeatherAgent: keeps the shared weather snapshot current
//!
//! Fetches conditions for whatever city the user has selected. A failed
//! fetch publishes the sentinel snapshot; the agent never stops or backs off.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::adapters::WeatherSource;
use crate::agents::{AgentContext, PollingAgent};
use crate::coordinator::Publisher;
use crate::domain::WeatherSnapshot;

pub struct WeatherAgent {
    source: Arc<dyn WeatherSource>,
    publisher: Publisher<WeatherSnapshot>,
    interval: Duration,
}

impl WeatherAgent {
    pub fn new(
        source: Arc<dyn WeatherSource>,
        publisher: Publisher<WeatherSnapshot>,
        interval: Duration,
    ) -> Self {
        Self {
            source,
            publisher,
            interval,
        }
    }

    /// Fetch and publish once; returns what was published.
    ///
    /// The published snapshot always carries `city`, including the sentinel.
    pub async fn refresh(&self, city: &str) -> WeatherSnapshot {
        let snapshot = match self.source.current(city).await {
            Ok(snapshot) => {
                info!(
                    city,
                    "Weather Update: {}°C, {}", snapshot.temperature_c, snapshot.condition
                );
                snapshot
            }
            Err(e) => {
                warn!(city, category = e.category(), error = %e, "weather fetch failed");
                WeatherSnapshot::sentinel()
            }
        }
        .for_city(city);

        self.publisher.publish(snapshot.clone());
        snapshot
    }
}

#[async_trait]
impl PollingAgent for WeatherAgent {
    fn id(&self) -> &str {
        "weather"
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    async fn run_cycle(&self, ctx: &AgentContext) {
        self.refresh(&ctx.city()).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::weather_api::MockWeatherSource;
    use crate::coordinator::SharedState;
    use crate::error::AgriError;
    use mockall::predicate::eq;

    fn sunny() -> WeatherSnapshot {
        WeatherSnapshot {
            city: String::new(),
            temperature_c: 31.0,
            condition: "Sunny".to_string(),
            humidity: 40.0,
            wind_kph: 9.4,
        }
    }

    #[tokio::test]
    async fn test_success_publishes_snapshot() {
        let state = SharedState::new("Pune");
        let mut source = MockWeatherSource::new();
        source
            .expect_current()
            .with(eq("Pune"))
            .times(1)
            .returning(|_| Ok(sunny()));

        let agent = WeatherAgent::new(
            Arc::new(source),
            state.publishers.weather,
            Duration::from_secs(60),
        );
        agent.refresh("Pune").await;

        assert_eq!(state.view.weather(), sunny().for_city("Pune"));
    }

    #[tokio::test]
    async fn test_failure_publishes_sentinel_and_keeps_going() {
        let state = SharedState::new("Pune");
        let mut source = MockWeatherSource::new();
        let mut calls = 0;
        source.expect_current().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 {
                Err(AgriError::WeatherApi("503 Service Unavailable".into()))
            } else {
                Ok(sunny())
            }
        });

        let agent = WeatherAgent::new(
            Arc::new(source),
            state.publishers.weather,
            Duration::from_secs(60),
        );

        let first = agent.refresh("Pune").await;
        assert_eq!(first, WeatherSnapshot::sentinel().for_city("Pune"));
        assert_eq!(state.view.weather().temperature_c, 0.0);
        assert_eq!(state.view.weather().condition, "error");
        assert_eq!(state.view.weather().humidity, 0.0);
        assert_eq!(state.view.weather().wind_kph, 0.0);

        // next cycle recovers without any intervention
        agent.refresh("Pune").await;
        assert_eq!(state.view.weather(), sunny().for_city("Pune"));
    }

    #[tokio::test]
    async fn test_cycle_uses_current_city() {
        let state = SharedState::new("Pune");
        state.inputs.set_city("Nashik");

        let mut source = MockWeatherSource::new();
        source
            .expect_current()
            .with(eq("Nashik"))
            .times(1)
            .returning(|_| Ok(sunny()));

        let agent = WeatherAgent::new(
            Arc::new(source),
            state.publishers.weather,
            Duration::from_secs(60),
        );
        let (_tx, rx) = tokio::sync::mpsc::channel(1);
        let ctx = AgentContext::new(
            "weather".into(),
            state.inputs.view(),
            state.view.weather_receiver(),
            rx,
        );

        agent.run_cycle(&ctx).await;
        assert_eq!(state.view.weather().condition, "Sunny");
        assert_eq!(state.view.weather().city, "Nashik");
    }
}
