//! Polling Agents: weather, advisor and market
//!
//! Each agent implements `PollingAgent` and is the sole writer of one shared
//! value. `run_agent` drives the loop; agents read user inputs via
//! `AgentContext`.

pub mod advisor;
pub mod context;
pub mod market;
pub mod traits;
pub mod weather;

pub use advisor::{build_prompt, fallback_suggestion, AdvisorAgent, FALLBACK_CROPS};
pub use context::{AgentCommand, AgentContext};
pub use market::MarketAgent;
pub use traits::{run_agent, PollingAgent};
pub use weather::WeatherAgent;
