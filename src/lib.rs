pub mod adapters;
pub mod agents;
pub mod cli;
pub mod config;
pub mod coordinator;
pub mod domain;
pub mod error;
pub mod services;
pub mod tui;

pub use agents::{AdvisorAgent, MarketAgent, PollingAgent, WeatherAgent};
pub use config::AppConfig;
pub use coordinator::{Coordinator, CoordinatorConfig, CoordinatorDeps, CoordinatorHandle};
pub use error::{AgriError, Result};
