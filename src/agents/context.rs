//! AgentContext: an agent's view of the coordinator
//!
//! Read access to the user inputs and the latest weather, plus the command
//! receiver the coordinator uses for refresh and shutdown.

use tokio::sync::{mpsc, watch};

use crate::coordinator::InputsView;
use crate::domain::WeatherSnapshot;

/// Commands sent from the coordinator to a single agent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentCommand {
    /// Run one cycle now, outside the schedule
    Refresh,
    /// Leave the loop
    Shutdown,
}

/// Context given to each agent when spawned: not Clone (owns command receiver)
pub struct AgentContext {
    pub agent_id: String,
    inputs: InputsView,
    weather: watch::Receiver<WeatherSnapshot>,
    commands: mpsc::Receiver<AgentCommand>,
}

impl AgentContext {
    pub fn new(
        agent_id: String,
        inputs: InputsView,
        weather: watch::Receiver<WeatherSnapshot>,
        commands: mpsc::Receiver<AgentCommand>,
    ) -> Self {
        Self {
            agent_id,
            inputs,
            weather,
            commands,
        }
    }

    /// Farmer name currently entered by the user (trimmed, may be empty)
    pub fn farmer_name(&self) -> String {
        self.inputs.farmer_name()
    }

    /// City currently selected for weather lookups
    pub fn city(&self) -> String {
        self.inputs.city()
    }

    /// Condition text of the latest published weather snapshot
    pub fn weather_condition(&self) -> String {
        self.weather.borrow().condition.clone()
    }

    /// Async wait for the next command (use in select! branches)
    pub async fn recv_command(&mut self) -> Option<AgentCommand> {
        self.commands.recv().await
    }
}
