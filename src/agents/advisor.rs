//! AdvisorAgent: crop recommendations from the text service
//!
//! Anchors every request to the most sustainable farm-conditions row, asks
//! the text service for suggestions, falls back to a fixed list when it is
//! unavailable, stores the result and publishes it as the latest
//! recommendation. The same sequence backs the periodic cycle and the
//! one-shot run triggered by a submission.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::adapters::{SqliteStore, TextCompletion};
use crate::agents::{AgentContext, PollingAgent};
use crate::coordinator::Publisher;
use crate::domain::{select_most_sustainable, FarmConditionRow, Recommendation, WeatherSnapshot};
use crate::error::{AgriError, Result};

/// Crops appended after the selected crop when the text service fails
pub const FALLBACK_CROPS: [&str; 4] = ["Rice", "Wheat", "Millet", "Sorghum"];

pub const STATUS_FAILED: &str = "Error generating recommendations. Please try again.";

/// Longest a one-shot run waits for the submitted city's weather
const WEATHER_WAIT: Duration = Duration::from_secs(15);

pub fn build_prompt(farmer: &str, row: &FarmConditionRow) -> String {
    format!(
        "Suggest 5 crops for {} based on: Soil pH: {}, Moisture: {}, Temperature: {}°C, Rainfall: {}mm.",
        farmer, row.soil_ph, row.soil_moisture, row.temperature_c, row.rainfall_mm
    )
}

pub fn fallback_suggestion(row: &FarmConditionRow) -> String {
    format!(
        "Based on your conditions, consider these crops: {}, {}, {}, {}, and {}.",
        row.crop_type, FALLBACK_CROPS[0], FALLBACK_CROPS[1], FALLBACK_CROPS[2], FALLBACK_CROPS[3]
    )
}

pub fn status_processing(farmer: &str, city: &str) -> String {
    format!("Processing recommendations for {} in {}...", farmer, city)
}

pub fn status_weather_failed(city: &str) -> String {
    format!("Error fetching weather for {}. Using default data.", city)
}

pub fn status_done(farmer: &str) -> String {
    format!("Recommendations generated for {}!", farmer)
}

pub struct AdvisorAgent {
    farm: Arc<Vec<FarmConditionRow>>,
    text: Arc<dyn TextCompletion>,
    store: SqliteStore,
    publisher: Publisher<Vec<Recommendation>>,
    status: Publisher<String>,
    interval: Duration,
}

impl AdvisorAgent {
    pub fn new(
        farm: Arc<Vec<FarmConditionRow>>,
        text: Arc<dyn TextCompletion>,
        store: SqliteStore,
        publisher: Publisher<Vec<Recommendation>>,
        status: Publisher<String>,
        interval: Duration,
    ) -> Self {
        Self {
            farm,
            text,
            store,
            publisher,
            status,
            interval,
        }
    }

    /// Generate, store and publish one recommendation.
    ///
    /// Text-service and store failures are absorbed (fallback text, `id`
    /// left empty). Only an empty farm dataset is an error.
    pub async fn recommend(&self, farmer: &str, weather_condition: &str) -> Result<Recommendation> {
        let row = select_most_sustainable(&self.farm)
            .ok_or_else(|| AgriError::Data("farm conditions dataset is empty".into()))?;

        let prompt = build_prompt(farmer, row);
        let suggestion = match self.text.complete(&prompt).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => {
                warn!(farmer, "text service returned an empty answer, using fallback");
                fallback_suggestion(row)
            }
            Err(e) => {
                warn!(farmer, category = e.category(), error = %e, "text service failed, using fallback");
                fallback_suggestion(row)
            }
        };

        let draft = Recommendation::draft(farmer, suggestion, row, weather_condition);
        let id = match self.store.insert_recommendation(&draft).await {
            Ok(id) => Some(id),
            Err(e) => {
                error!(farmer, category = e.category(), error = %e, "failed to store recommendation");
                None
            }
        };
        let rec = draft.with_id(id);

        self.publisher.publish(vec![rec.clone()]);
        debug!(farmer, id = ?rec.id, "recommendation published");
        Ok(rec)
    }

    /// User-triggered run with status messages before and after.
    ///
    /// `weather` must be marked seen before the refresh for `city` is
    /// requested; the run waits for a snapshot tagged with `city` and stores
    /// its condition.
    pub async fn run_one_shot(
        &self,
        farmer: &str,
        city: &str,
        weather: watch::Receiver<WeatherSnapshot>,
    ) -> Result<Recommendation> {
        self.report_status(status_processing(farmer, city));

        let snapshot = wait_for_city_weather(weather, city).await;
        if snapshot.is_sentinel() {
            self.report_status(status_weather_failed(city));
        }

        match self.recommend(farmer, &snapshot.condition).await {
            Ok(rec) => {
                info!(farmer, city, "Recommendations generated");
                self.report_status(status_done(farmer));
                Ok(rec)
            }
            Err(e) => {
                error!(farmer, city, category = e.category(), error = %e, "one-shot recommendation failed");
                self.report_status(STATUS_FAILED.to_string());
                Err(e)
            }
        }
    }

    /// Replace the status message shown by the presentation layer
    pub fn report_status(&self, message: String) {
        self.status.publish(message);
    }
}

#[async_trait]
impl PollingAgent for AdvisorAgent {
    fn id(&self) -> &str {
        "advisor"
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    async fn run_cycle(&self, ctx: &AgentContext) {
        let farmer = ctx.farmer_name();
        if farmer.is_empty() {
            debug!("no farmer name set, skipping advisor cycle");
            return;
        }

        if let Err(e) = self.recommend(&farmer, &ctx.weather_condition()).await {
            warn!(farmer, category = e.category(), error = %e, "advisor cycle failed");
        }
    }
}

/// Next published snapshot for `city`, or the latest one if none arrives
/// within [`WEATHER_WAIT`]
async fn wait_for_city_weather(
    mut weather: watch::Receiver<WeatherSnapshot>,
    city: &str,
) -> WeatherSnapshot {
    let landed = tokio::time::timeout(WEATHER_WAIT, async {
        loop {
            if weather.changed().await.is_err() {
                return false;
            }
            if weather.borrow_and_update().city == city {
                return true;
            }
        }
    })
    .await
    .unwrap_or(false);

    if !landed {
        warn!(city, "no fresh weather for submitted city, using latest snapshot");
    }
    let snapshot = weather.borrow().clone();
    snapshot
}
