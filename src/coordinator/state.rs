//! Shared State: the latest snapshot published by each agent
//!
//! Every field is a replace-on-write `watch` cell. Each one has exactly one
//! `Publisher`, moved into the component that owns the field. Readers get
//! cheap clones of the receivers; a publish wakes them without queuing, so
//! several publishes between two reads coalesce into the latest value.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;

use crate::domain::{MarketRow, Recommendation, WeatherSnapshot};

/// Status line shown before any submission
pub const INITIAL_STATUS: &str = "Enter farmer information to start";

/// Sole write handle for one shared value
#[derive(Debug)]
pub struct Publisher<T> {
    tx: watch::Sender<T>,
}

impl<T> Publisher<T> {
    /// Replace the value and notify readers. Never blocks.
    pub fn publish(&self, value: T) {
        self.tx.send_replace(value);
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

impl<T: Clone> Publisher<T> {
    pub fn current(&self) -> T {
        self.tx.borrow().clone()
    }
}

/// Write handles, one per published field
#[derive(Debug)]
pub struct StatePublishers {
    pub weather: Publisher<WeatherSnapshot>,
    pub recommendations: Publisher<Vec<Recommendation>>,
    pub market: Publisher<Vec<MarketRow>>,
    pub status: Publisher<String>,
}

/// Which shared value changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Weather,
    Recommendations,
    Market,
    Status,
}

/// Point-in-time copy of everything the presentation layer renders
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub weather: WeatherSnapshot,
    pub recommendations: Vec<Recommendation>,
    pub top_market: Vec<MarketRow>,
    pub status: String,
    pub taken_at: DateTime<Utc>,
}

/// Read side of the shared state
#[derive(Debug, Clone)]
pub struct StateView {
    weather: watch::Receiver<WeatherSnapshot>,
    recommendations: watch::Receiver<Vec<Recommendation>>,
    market: watch::Receiver<Vec<MarketRow>>,
    status: watch::Receiver<String>,
}

impl StateView {
    pub fn weather(&self) -> WeatherSnapshot {
        self.weather.borrow().clone()
    }

    pub fn recommendations(&self) -> Vec<Recommendation> {
        self.recommendations.borrow().clone()
    }

    pub fn top_market(&self) -> Vec<MarketRow> {
        self.market.borrow().clone()
    }

    pub fn status(&self) -> String {
        self.status.borrow().clone()
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            weather: self.weather(),
            recommendations: self.recommendations(),
            top_market: self.top_market(),
            status: self.status(),
            taken_at: Utc::now(),
        }
    }

    /// Receiver for the weather cell (agents read the current condition)
    pub fn weather_receiver(&self) -> watch::Receiver<WeatherSnapshot> {
        self.weather.clone()
    }

    /// Change notifications starting from the current values
    pub fn subscribe(&self) -> StateSubscription {
        let mut sub = StateSubscription {
            weather: self.weather.clone(),
            recommendations: self.recommendations.clone(),
            market: self.market.clone(),
            status: self.status.clone(),
        };
        sub.weather.mark_unchanged();
        sub.recommendations.mark_unchanged();
        sub.market.mark_unchanged();
        sub.status.mark_unchanged();
        sub
    }
}

/// Coalescing change feed for the presentation layer
#[derive(Debug)]
pub struct StateSubscription {
    weather: watch::Receiver<WeatherSnapshot>,
    recommendations: watch::Receiver<Vec<Recommendation>>,
    market: watch::Receiver<Vec<MarketRow>>,
    status: watch::Receiver<String>,
}

impl StateSubscription {
    /// Wait for the next publish on any field.
    ///
    /// Returns `None` once a publisher has been dropped.
    pub async fn next_change(&mut self) -> Option<Topic> {
        tokio::select! {
            r = self.weather.changed() => r.ok().map(|_| Topic::Weather),
            r = self.recommendations.changed() => r.ok().map(|_| Topic::Recommendations),
            r = self.market.changed() => r.ok().map(|_| Topic::Market),
            r = self.status.changed() => r.ok().map(|_| Topic::Status),
        }
    }
}

/// Values written by the presentation layer and read by agents
#[derive(Debug)]
pub struct UserInputs {
    farmer_name: watch::Sender<String>,
    city: watch::Sender<String>,
}

impl UserInputs {
    pub fn set_farmer_name(&self, name: &str) {
        self.farmer_name.send_replace(name.trim().to_string());
    }

    pub fn set_city(&self, city: &str) {
        self.city.send_replace(city.trim().to_string());
    }

    pub fn view(&self) -> InputsView {
        InputsView {
            farmer_name: self.farmer_name.subscribe(),
            city: self.city.subscribe(),
        }
    }
}

/// Read side of the user inputs
#[derive(Debug, Clone)]
pub struct InputsView {
    farmer_name: watch::Receiver<String>,
    city: watch::Receiver<String>,
}

impl InputsView {
    pub fn farmer_name(&self) -> String {
        self.farmer_name.borrow().clone()
    }

    pub fn city(&self) -> String {
        self.city.borrow().clone()
    }
}

/// Freshly created shared state, split into its write and read halves
pub struct SharedState {
    pub publishers: StatePublishers,
    pub view: StateView,
    pub inputs: UserInputs,
}

impl SharedState {
    pub fn new(default_city: &str) -> Self {
        let (weather_tx, weather_rx) = watch::channel(WeatherSnapshot::default());
        let (rec_tx, rec_rx) = watch::channel(Vec::new());
        let (market_tx, market_rx) = watch::channel(Vec::new());
        let (status_tx, status_rx) = watch::channel(INITIAL_STATUS.to_string());
        let (farmer_tx, _) = watch::channel(String::new());
        let (city_tx, _) = watch::channel(default_city.trim().to_string());

        Self {
            publishers: StatePublishers {
                weather: Publisher { tx: weather_tx },
                recommendations: Publisher { tx: rec_tx },
                market: Publisher { tx: market_tx },
                status: Publisher { tx: status_tx },
            },
            view: StateView {
                weather: weather_rx,
                recommendations: rec_rx,
                market: market_rx,
                status: status_rx,
            },
            inputs: UserInputs {
                farmer_name: farmer_tx,
                city: city_tx,
            },
        }
    }
}
