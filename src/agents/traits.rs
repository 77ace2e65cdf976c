//! PollingAgent trait: fixed-interval agent interface
//!
//! An agent only describes one cycle. `run_agent` owns the loop: it ticks on
//! the agent's interval, runs an extra cycle when the coordinator asks for a
//! refresh, and returns on shutdown.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use super::context::{AgentCommand, AgentContext};

#[async_trait]
pub trait PollingAgent: Send + Sync + 'static {
    /// Unique identifier for this agent instance
    fn id(&self) -> &str;

    /// Time between two scheduled cycles
    fn interval(&self) -> Duration;

    /// One unit of work. Failures are handled (logged, substituted) inside.
    async fn run_cycle(&self, ctx: &AgentContext);
}

/// Drive an agent until shutdown.
///
/// The first cycle starts immediately. Missed ticks are delayed, never
/// burst-fired, so a slow cycle simply pushes the schedule back.
pub async fn run_agent<A>(agent: Arc<A>, mut ctx: AgentContext)
where
    A: PollingAgent + ?Sized,
{
    info!(agent = agent.id(), interval = ?agent.interval(), "agent starting");

    let mut tick = tokio::time::interval(agent.interval());
    tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        let out_of_schedule = tokio::select! {
            _ = tick.tick() => false,
            cmd = ctx.recv_command() => match cmd {
                Some(AgentCommand::Refresh) => true,
                Some(AgentCommand::Shutdown) | None => break,
            },
        };

        if out_of_schedule {
            debug!(agent = agent.id(), "refresh requested");
        }
        agent.run_cycle(&ctx).await;
        if out_of_schedule {
            tick.reset();
        }
    }

    info!(agent = agent.id(), "agent stopped");
}
