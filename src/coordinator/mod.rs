//! Coordinator
//!
//! Owns the shared state, launches the polling agents and exposes a handle
//! for the presentation layer. Agents write through typed publishers; the
//! presentation layer reads through `StateView` and `StateSubscription`.

pub mod config;
pub mod coordinator;
pub mod state;

pub use config::CoordinatorConfig;
pub use coordinator::{Coordinator, CoordinatorDeps, CoordinatorHandle, MISSING_FARMER};
pub use state::{
    DashboardSnapshot, InputsView, Publisher, SharedState, StatePublishers, StateSubscription,
    StateView, Topic, UserInputs, INITIAL_STATUS,
};
