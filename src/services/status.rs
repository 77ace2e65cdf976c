//! Status HTTP server
//!
//! Read-only window onto the shared state for process supervision:
//! `/health` (liveness plus per-agent status), `/healthz` (bare liveness)
//! and `/snapshot` (the published values as JSON).

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::adapters::SqliteStore;
use crate::coordinator::StateView;
use crate::error::{AgriError, Result};

/// Health status for a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub timestamp: DateTime<Utc>,
    pub uptime_seconds: u64,
    pub components: Vec<ComponentHealth>,
}

/// Shared state for the status server
pub struct StatusState {
    pub started_at: DateTime<Utc>,
    view: StateView,
    store: SqliteStore,
}

impl StatusState {
    pub fn new(view: StateView, store: SqliteStore) -> Self {
        Self {
            started_at: Utc::now(),
            view,
            store,
        }
    }

    pub async fn get_health(&self) -> HealthResponse {
        let weather = self.view.weather();
        let weather_health = if weather.is_sentinel() {
            ComponentHealth {
                name: "weather".to_string(),
                status: HealthStatus::Degraded,
                message: Some("last fetch failed".to_string()),
            }
        } else {
            ComponentHealth {
                name: "weather".to_string(),
                status: HealthStatus::Healthy,
                message: Some(weather.condition),
            }
        };

        let top = self.view.top_market();
        let market_health = ComponentHealth {
            name: "market".to_string(),
            status: if top.is_empty() {
                HealthStatus::Degraded
            } else {
                HealthStatus::Healthy
            },
            message: top.first().map(|r| format!("top: {}", r.product)),
        };

        let db_health = match self.store.count_recommendations().await {
            Ok(n) => ComponentHealth {
                name: "database".to_string(),
                status: HealthStatus::Healthy,
                message: Some(format!("{} recommendations", n)),
            },
            Err(e) => ComponentHealth {
                name: "database".to_string(),
                status: HealthStatus::Unhealthy,
                message: Some(e.to_string()),
            },
        };

        let components = vec![weather_health, market_health, db_health];
        let status = if components
            .iter()
            .any(|c| c.status == HealthStatus::Unhealthy)
        {
            HealthStatus::Unhealthy
        } else if components
            .iter()
            .any(|c| c.status == HealthStatus::Degraded)
        {
            HealthStatus::Degraded
        } else {
            HealthStatus::Healthy
        };

        HealthResponse {
            status,
            timestamp: Utc::now(),
            uptime_seconds: (Utc::now() - self.started_at).num_seconds().max(0) as u64,
            components,
        }
    }
}

pub fn router(state: Arc<StatusState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/healthz", get(liveness_handler))
        .route("/snapshot", get(snapshot_handler))
        .with_state(state)
}

pub struct StatusServer {
    state: Arc<StatusState>,
    port: u16,
}

impl StatusServer {
    pub fn new(state: Arc<StatusState>, port: u16) -> Self {
        Self { state, port }
    }

    pub async fn run(&self) -> Result<()> {
        let app = router(Arc::clone(&self.state));

        let addr = SocketAddr::from(([127, 0, 0, 1], self.port));
        info!("Starting status server on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .await
            .map_err(|e| AgriError::Internal(format!("Status server error: {}", e)))?;

        Ok(())
    }
}

async fn health_handler(State(state): State<Arc<StatusState>>) -> impl IntoResponse {
    let health = state.get_health().await;
    let status_code = match health.status {
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };
    (status_code, Json(health))
}

async fn liveness_handler() -> impl IntoResponse {
    StatusCode::OK
}

async fn snapshot_handler(State(state): State<Arc<StatusState>>) -> impl IntoResponse {
    Json(state.view.snapshot())
}
