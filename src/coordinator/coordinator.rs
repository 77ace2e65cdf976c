//! Coordinator: owns the shared state and the agent tasks
//!
//! `Coordinator::start` hands each agent its publisher, spawns one task per
//! agent and returns a `CoordinatorHandle` (clone-friendly) for the
//! presentation layer:
//!   - read the shared state and subscribe to changes
//!   - set the farmer name and city
//!   - submit a one-shot recommendation (plus an immediate weather refresh)
//!   - export stored recommendations

use std::path::Path;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::adapters::{
    export_to_file, MarketSource, SqliteStore, TextCompletion, WeatherSource,
};
use crate::agents::{
    run_agent, AdvisorAgent, AgentCommand, AgentContext, MarketAgent, WeatherAgent,
};
use crate::domain::{FarmConditionRow, Recommendation};
use crate::error::{AgriError, Result};

use super::config::CoordinatorConfig;
use super::state::{DashboardSnapshot, SharedState, StateSubscription, StateView, UserInputs};

/// Status message for a submission without a farmer name
pub const MISSING_FARMER: &str = "Please enter farmer name.";

/// Everything the agents talk to
#[derive(Clone)]
pub struct CoordinatorDeps {
    pub weather: Arc<dyn WeatherSource>,
    pub text: Arc<dyn TextCompletion>,
    pub market: Arc<dyn MarketSource>,
    pub farm: Arc<Vec<FarmConditionRow>>,
    pub store: SqliteStore,
}

pub struct Coordinator {
    config: CoordinatorConfig,
    deps: CoordinatorDeps,
}

#[derive(Debug, Clone)]
struct AgentChannel {
    agent_id: &'static str,
    tx: mpsc::Sender<AgentCommand>,
}

/// Clonable handle for the presentation layer
#[derive(Clone)]
pub struct CoordinatorHandle {
    view: StateView,
    inputs: Arc<UserInputs>,
    advisor: Arc<AdvisorAgent>,
    store: SqliteStore,
    agents: Arc<Vec<AgentChannel>>,
    tasks: Arc<Mutex<Vec<JoinHandle<()>>>>,
    default_city: String,
}

impl Coordinator {
    pub fn new(config: CoordinatorConfig, deps: CoordinatorDeps) -> Self {
        Self { config, deps }
    }

    /// Spawn the three agents. Must be called inside a tokio runtime.
    pub fn start(self) -> CoordinatorHandle {
        let SharedState {
            publishers,
            view,
            inputs,
        } = SharedState::new(&self.config.default_city);

        let weather = Arc::new(WeatherAgent::new(
            self.deps.weather,
            publishers.weather,
            self.config.weather_interval,
        ));
        let advisor = Arc::new(AdvisorAgent::new(
            self.deps.farm,
            self.deps.text,
            self.deps.store.clone(),
            publishers.recommendations,
            publishers.status,
            self.config.advisor_interval,
        ));
        let market = Arc::new(MarketAgent::new(
            self.deps.market,
            self.deps.store.clone(),
            publishers.market,
            self.config.top_n,
            self.config.market_interval,
        ));

        let mut agents = Vec::new();
        let mut tasks = Vec::new();

        let mut context = |agent_id: &'static str| {
            // capacity 1: a pending refresh absorbs further requests
            let (tx, rx) = mpsc::channel(1);
            agents.push(AgentChannel { agent_id, tx });
            AgentContext::new(
                agent_id.to_string(),
                inputs.view(),
                view.weather_receiver(),
                rx,
            )
        };
        let weather_ctx = context("weather");
        let advisor_ctx = context("advisor");
        let market_ctx = context("market");

        tasks.push(tokio::spawn(run_agent(weather, weather_ctx)));
        tasks.push(tokio::spawn(run_agent(Arc::clone(&advisor), advisor_ctx)));
        tasks.push(tokio::spawn(run_agent(market, market_ctx)));

        info!(agents = agents.len(), "coordinator started");

        CoordinatorHandle {
            view,
            inputs: Arc::new(inputs),
            advisor,
            store: self.deps.store,
            agents: Arc::new(agents),
            tasks: Arc::new(Mutex::new(tasks)),
            default_city: self.config.default_city,
        }
    }
}

impl CoordinatorHandle {
    pub fn state(&self) -> &StateView {
        &self.view
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        self.view.snapshot()
    }

    pub fn subscribe(&self) -> StateSubscription {
        self.view.subscribe()
    }

    pub fn store(&self) -> &SqliteStore {
        &self.store
    }

    pub fn default_city(&self) -> &str {
        &self.default_city
    }

    pub fn set_farmer_name(&self, name: &str) {
        self.inputs.set_farmer_name(name);
    }

    pub fn set_city(&self, city: &str) {
        self.inputs.set_city(city);
    }

    /// Ask one agent for an out-of-schedule cycle
    pub fn request_refresh(&self, agent_id: &str) {
        let Some(channel) = self.agents.iter().find(|c| c.agent_id == agent_id) else {
            warn!(agent = agent_id, "refresh requested for unknown agent");
            return;
        };
        match channel.tx.try_send(AgentCommand::Refresh) {
            Ok(()) => debug!(agent = agent_id, "refresh queued"),
            Err(mpsc::error::TrySendError::Full(_)) => {
                debug!(agent = agent_id, "refresh already pending")
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                warn!(agent = agent_id, "agent is no longer running")
            }
        }
    }

    /// Submit farmer and city from the presentation layer.
    ///
    /// Sets the inputs, triggers an immediate weather refresh and runs the
    /// advisor once on a transient task, after that refresh has landed. An empty city falls back to the
    /// default city; an empty farmer name is rejected.
    pub fn submit(&self, farmer: &str, city: &str) -> Result<JoinHandle<Result<Recommendation>>> {
        let farmer = farmer.trim().to_string();
        if farmer.is_empty() {
            self.advisor.report_status(MISSING_FARMER.to_string());
            return Err(AgriError::Validation(MISSING_FARMER.to_string()));
        }

        let city = match city.trim() {
            "" => self.default_city.clone(),
            c => c.to_string(),
        };

        // must be marked seen before the refresh is queued
        let mut weather = self.view.weather_receiver();
        weather.mark_unchanged();

        self.set_farmer_name(&farmer);
        self.set_city(&city);
        self.request_refresh("weather");

        let advisor = Arc::clone(&self.advisor);
        info!(farmer = %farmer, city = %city, "submission received");

        Ok(tokio::spawn(async move {
            advisor.run_one_shot(&farmer, &city, weather).await
        }))
    }

    /// Every stored recommendation, oldest first
    pub async fn history(&self) -> Result<Vec<Recommendation>> {
        self.store.list_recommendations().await
    }

    /// Write every stored recommendation to a CSV file
    pub async fn export(&self, path: &Path) -> Result<usize> {
        let recs = self.store.list_recommendations().await?;
        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || export_to_file(&path, &recs))
            .await
            .map_err(|e| AgriError::Internal(format!("export task failed: {}", e)))?
    }

    /// Stop every agent and wait for their loops to exit
    pub async fn shutdown(&self) {
        for channel in self.agents.iter() {
            let _ = channel.tx.send(AgentCommand::Shutdown).await;
        }

        let tasks = match self.tasks.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        };
        for task in tasks {
            if let Err(e) = task.await {
                warn!(error = %e, "agent task ended abnormally");
            }
        }
        info!("coordinator stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ollama::MockTextCompletion;
    use crate::adapters::weather_api::MockWeatherSource;
    use crate::adapters::StaticMarketData;
    use crate::domain::{MarketRow, WeatherSnapshot};
    use rust_decimal_macros::dec;
    use std::time::Duration;

    fn farm() -> Vec<FarmConditionRow> {
        vec![FarmConditionRow {
            crop_type: "Rice".to_string(),
            soil_ph: 6.3,
            soil_moisture: 44.0,
            temperature_c: 27.0,
            rainfall_mm: 230.0,
            sustainability_score: 90.0,
        }]
    }

    async fn start(weather: MockWeatherSource, text: MockTextCompletion) -> CoordinatorHandle {
        let deps = CoordinatorDeps {
            weather: Arc::new(weather),
            text: Arc::new(text),
            market: Arc::new(StaticMarketData::new(Arc::new(vec![MarketRow::new(
                "Rice",
                dec!(500),
            )]))),
            farm: Arc::new(farm()),
            store: SqliteStore::in_memory().await.unwrap(),
        };
        let config = CoordinatorConfig {
            weather_interval: Duration::from_secs(3600),
            advisor_interval: Duration::from_secs(3600),
            market_interval: Duration::from_secs(3600),
            ..CoordinatorConfig::default()
        };
        Coordinator::new(config, deps).start()
    }

    fn weather_ok() -> MockWeatherSource {
        let mut weather = MockWeatherSource::new();
        weather.expect_current().returning(|_| {
            Ok(WeatherSnapshot {
                city: "Pune".to_string(),
                temperature_c: 29.0,
                condition: "Clear".to_string(),
                humidity: 50.0,
                wind_kph: 4.0,
            })
        });
        weather
    }

    #[tokio::test]
    async fn test_submit_without_farmer_is_rejected() {
        let handle = start(weather_ok(), MockTextCompletion::new()).await;

        let err = handle.submit("   ", "Pune").unwrap_err();
        assert!(matches!(err, AgriError::Validation(_)));
        assert_eq!(handle.state().status(), MISSING_FARMER);

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_submit_with_empty_city_uses_default() {
        let mut text = MockTextCompletion::new();
        text.expect_complete()
            .returning(|_| Ok("Rice, Wheat".to_string()));
        let handle = start(weather_ok(), text).await;

        let rec = handle.submit("Asha", "").unwrap().await.unwrap().unwrap();
        assert_eq!(rec.farmer_name, "Asha");
        assert!(rec.id.is_some());
        assert_eq!(handle.state().status(), "Recommendations generated for Asha!");

        let snapshot = handle.snapshot();
        assert_eq!(snapshot.recommendations.len(), 1);

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_export_with_empty_store_writes_nothing() {
        let handle = start(weather_ok(), MockTextCompletion::new()).await;
        let dir = std::env::temp_dir().join(format!("agri-export-{}", std::process::id()));
        let path = dir.join("empty.csv");

        let err = handle.export(&path).await.unwrap_err();
        assert!(err.to_string().contains("No data available to export."));
        assert!(!path.exists());

        handle.shutdown().await;
    }
}
