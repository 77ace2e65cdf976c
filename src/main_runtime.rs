use std::path::{Path, PathBuf};
use std::sync::Arc;

use agri_advisor::adapters::{Datasets, OllamaClient, SqliteStore, WeatherApiClient};
use agri_advisor::config::{AppConfig, LoggingConfig};
use agri_advisor::coordinator::CoordinatorDeps;
use agri_advisor::error::{AgriError, Result};
use tokio::signal;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "agri-advisor.log";

/// Where the log file goes: config, then `AGRI_LOG_DIR`, then `./logs`
fn log_dir(cfg: &LoggingConfig) -> PathBuf {
    cfg.dir
        .clone()
        .or_else(|| std::env::var("AGRI_LOG_DIR").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Check that the directory exists and accepts a new file.
///
/// `tracing_appender::rolling::daily` panics if it cannot create its first
/// file, so this must pass before the appender is built.
fn preflight_log_dir(dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)?;
    let probe = dir.join(".agri_write_test");
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&probe)?;
    let _ = std::fs::remove_file(&probe);
    Ok(())
}

/// Set up tracing. With `console == false` (dashboard mode) nothing is
/// written to the terminal; the daily file is the only sink.
///
/// The returned guard flushes the file writer and must live until exit.
pub fn init_logging(cfg: &LoggingConfig, console: bool) -> Option<WorkerGuard> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::Layer;

    let level = if cfg.level.trim().is_empty() {
        "info"
    } else {
        cfg.level.as_str()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("{},agri_advisor=debug,sqlx=warn", level))
    });

    let dir = log_dir(cfg);
    let (file_layer, guard) = match preflight_log_dir(&dir) {
        Ok(()) => {
            let file_appender = tracing_appender::rolling::daily(&dir, LOG_FILE);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true);
            let layer = if cfg.json { layer.json().boxed() } else { layer.boxed() };
            (Some(layer), Some(guard))
        }
        Err(e) => {
            if console {
                eprintln!(
                    "Warning: Could not write to log directory {} ({}), file logging disabled",
                    dir.display(),
                    e
                );
            }
            (None, None)
        }
    };

    let console_layer = if console {
        let layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false);
        Some(if cfg.json { layer.json().boxed() } else { layer.boxed() })
    } else {
        None
    };

    let file_logging_enabled = file_layer.is_some();
    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    if file_logging_enabled && console {
        eprintln!("Logging to: {}/{}", dir.display(), LOG_FILE);
    }
    guard
}

/// Minimal logging for one-shot CLI commands
pub fn init_logging_simple() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .try_init();
}

pub fn load_config(config_dir: &Path) -> Result<AppConfig> {
    let cfg = AppConfig::load_from(config_dir)?;
    Ok(cfg)
}

/// Fail with every validation problem at once
pub fn validate_config(cfg: &AppConfig) -> Result<()> {
    cfg.validate().map_err(|errors| {
        AgriError::Validation(format!("invalid configuration:\n  - {}", errors.join("\n  - ")))
    })
}

pub async fn open_store(cfg: &AppConfig) -> Result<SqliteStore> {
    SqliteStore::new(&cfg.database.url, cfg.database.max_connections).await
}

pub fn load_datasets(cfg: &AppConfig) -> Result<Datasets> {
    Datasets::load(&cfg.datasets.farm_path, &cfg.datasets.market_path)
}

/// Wire the production collaborators for the agents
pub async fn build_deps(cfg: &AppConfig) -> Result<CoordinatorDeps> {
    let datasets = load_datasets(cfg)?;
    let store = open_store(cfg).await?;

    info!(
        model = %cfg.advisor.model,
        ollama = %cfg.advisor.ollama_url,
        "text service configured"
    );

    Ok(CoordinatorDeps {
        weather: Arc::new(WeatherApiClient::new(&cfg.weather.base_url, &cfg.weather.api_key)),
        text: Arc::new(OllamaClient::new(&cfg.advisor.ollama_url, &cfg.advisor.model)),
        market: Arc::new(datasets.market_source()),
        farm: Arc::clone(&datasets.farm),
        store,
    })
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => error!("Failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
