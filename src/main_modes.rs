use std::path::PathBuf;
use std::sync::Arc;

use agri_advisor::adapters::{MarketSource, OllamaClient, NOTHING_TO_EXPORT};
use agri_advisor::cli::output::{
    print_error, print_items, print_success, print_warn, HistoryRow, MarketTableRow, OutputMode,
};
use agri_advisor::config::AppConfig;
use agri_advisor::coordinator::{Coordinator, CoordinatorConfig, CoordinatorHandle};
use agri_advisor::domain::top_by_price;
use agri_advisor::error::{AgriError, Result};
use agri_advisor::services::{log_changes, StatusServer, StatusState};
use agri_advisor::tui::DashboardRunner;
use tracing::{error, info, warn};

use crate::main_runtime::{
    build_deps, load_datasets, open_store, shutdown_signal, validate_config,
};

async fn start_coordinator(cfg: &AppConfig) -> Result<CoordinatorHandle> {
    validate_config(cfg)?;
    let deps = build_deps(cfg).await?;
    let handle = Coordinator::new(CoordinatorConfig::from_app_config(cfg), deps).start();

    if let Some(port) = cfg.status_port {
        let server = StatusServer::new(
            Arc::new(StatusState::new(handle.state().clone(), handle.store().clone())),
            port,
        );
        tokio::spawn(async move {
            if let Err(e) = server.run().await {
                error!("Status server stopped: {}", e);
            }
        });
    }

    Ok(handle)
}

pub async fn run_dashboard(
    cfg: &AppConfig,
    farmer: Option<String>,
    city: Option<String>,
) -> Result<()> {
    let handle = start_coordinator(cfg).await?;

    let runner = DashboardRunner::new(handle.clone(), cfg.export.resolve_path())
        .with_inputs(farmer, city);
    let result = runner.run().await;

    handle.shutdown().await;
    result
}

pub async fn run_headless(
    cfg: &AppConfig,
    farmer: Option<String>,
    city: Option<String>,
) -> Result<()> {
    let handle = start_coordinator(cfg).await?;
    info!("Running headless, Ctrl+C to stop");

    if let Some(city) = city.as_deref() {
        handle.set_city(city);
    }
    if let Some(farmer) = farmer.as_deref() {
        let city = city.as_deref().unwrap_or("");
        if let Err(e) = handle.submit(farmer, city) {
            warn!("Submission rejected: {}", e);
        }
    }

    log_changes(handle.clone(), shutdown_signal()).await;

    info!("Shutting down agents...");
    handle.shutdown().await;
    Ok(())
}

pub async fn run_history(cfg: &AppConfig, limit: Option<usize>, json: bool) -> Result<()> {
    let store = open_store(cfg).await?;
    let mut recs = store.list_recommendations().await?;

    if let Some(limit) = limit {
        let skip = recs.len().saturating_sub(limit);
        recs.drain(..skip);
    }

    let rows: Vec<HistoryRow> = recs.iter().map(HistoryRow::from).collect();
    print_items(&rows, OutputMode::from_json_flag(json))?;
    Ok(())
}

pub async fn run_export(cfg: &AppConfig, out: Option<PathBuf>) -> Result<()> {
    let path = out.unwrap_or_else(|| cfg.export.resolve_path());
    let store = open_store(cfg).await?;
    let recs = store.list_recommendations().await?;

    match agri_advisor::adapters::export_to_file(&path, &recs) {
        Ok(n) => {
            print_success(&format!("Exported {} recommendations to {}", n, path.display()));
            Ok(())
        }
        Err(AgriError::Validation(msg)) if msg == NOTHING_TO_EXPORT => {
            print_warn(NOTHING_TO_EXPORT);
            Ok(())
        }
        Err(e) => Err(e),
    }
}

pub fn run_top_crops(cfg: &AppConfig, json: bool) -> Result<()> {
    let datasets = load_datasets(cfg)?;
    let rows = datasets.market_source().market_rows()?;
    let top = top_by_price(&rows, cfg.market.top_n);

    print_items(&MarketTableRow::ranked(&top), OutputMode::from_json_flag(json))?;
    Ok(())
}

pub async fn run_check(cfg: &AppConfig) -> Result<()> {
    let mut failed = false;

    match cfg.validate() {
        Ok(()) => print_success("configuration ok"),
        Err(errors) => {
            failed = true;
            for e in errors {
                print_error(&format!("config: {}", e));
            }
        }
    }

    match load_datasets(cfg) {
        Ok(ds) if ds.farm.is_empty() || ds.market.is_empty() => {
            failed = true;
            print_error("datasets: loaded but empty");
        }
        Ok(ds) => print_success(&format!(
            "datasets ok ({} farm rows, {} market rows)",
            ds.farm.len(),
            ds.market.len()
        )),
        Err(e) => {
            failed = true;
            print_error(&format!("datasets: {}", e));
        }
    }

    match open_store(cfg).await {
        Ok(store) => match store.count_recommendations().await {
            Ok(n) => print_success(&format!("database ok ({} recommendations)", n)),
            Err(e) => {
                failed = true;
                print_error(&format!("database: {}", e));
            }
        },
        Err(e) => {
            failed = true;
            print_error(&format!("database: {}", e));
        }
    }

    // Unreachable text service only degrades to the fallback list
    let ollama = OllamaClient::new(&cfg.advisor.ollama_url, &cfg.advisor.model);
    match ollama.check_availability().await {
        Ok(true) => print_success(&format!("text service ok (model {})", ollama.model())),
        Ok(false) => print_warn(&format!(
            "model {} not available; fallback suggestions will be used",
            ollama.model()
        )),
        Err(e) => print_warn(&format!(
            "text service unavailable ({}); fallback suggestions will be used",
            e
        )),
    }

    if failed {
        Err(AgriError::Validation("check failed".to_string()))
    } else {
        Ok(())
    }
}
