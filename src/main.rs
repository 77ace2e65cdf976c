use agri_advisor::cli::{Cli, Commands};
use agri_advisor::error::Result;
use clap::Parser;

mod main_modes;
mod main_runtime;

use main_runtime::{init_logging, init_logging_simple, load_config};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = load_config(&cli.config_dir)?;

    match cli.command_or_default() {
        Commands::Run {
            headless: false,
            farmer,
            city,
        } => {
            let _guard = init_logging(&cfg.logging, false);
            main_modes::run_dashboard(&cfg, farmer, city).await?;
        }
        Commands::Run {
            headless: true,
            farmer,
            city,
        } => {
            let _guard = init_logging(&cfg.logging, true);
            main_modes::run_headless(&cfg, farmer, city).await?;
        }
        Commands::History { limit, json } => {
            init_logging_simple();
            main_modes::run_history(&cfg, limit, json).await?;
        }
        Commands::Export { out } => {
            init_logging_simple();
            main_modes::run_export(&cfg, out).await?;
        }
        Commands::TopCrops { json } => {
            init_logging_simple();
            main_modes::run_top_crops(&cfg, json)?;
        }
        Commands::Check => {
            init_logging_simple();
            main_modes::run_check(&cfg).await?;
        }
    }

    Ok(())
}
