pub mod headless;
pub mod status;

pub use headless::log_changes;
pub use status::{ComponentHealth, HealthResponse, HealthStatus, StatusServer, StatusState};
