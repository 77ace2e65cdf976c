use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod output;

#[derive(Parser, Debug)]
#[command(name = "agri-advisor")]
#[command(version)]
#[command(about = "Crop advisory dashboard: weather, market prices and model-backed suggestions", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding default.toml and environment overrides
    #[arg(short, long, default_value = "config", env = "AGRI_CONFIG_DIR")]
    pub config_dir: PathBuf,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the agents and the dashboard
    Run {
        /// Log snapshots instead of drawing the dashboard
        #[arg(long)]
        headless: bool,
        /// Farmer name to preset (headless mode submits it once)
        #[arg(long)]
        farmer: Option<String>,
        /// City to preset
        #[arg(long)]
        city: Option<String>,
    },
    /// Print stored recommendations
    History {
        /// Show only the most recent N rows
        #[arg(short, long)]
        limit: Option<usize>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Export every stored recommendation to CSV
    Export {
        /// Destination file (defaults to export.default_path or the documents folder)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Print the highest-priced products from the market dataset
    TopCrops {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Validate configuration and datasets, then probe the text service
    Check,
}

impl Cli {
    /// `run` is the default when no subcommand is given
    pub fn command_or_default(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Run {
            headless: false,
            farmer: None,
            city: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_defaults_to_dashboard() {
        let cli = Cli::try_parse_from(["agri-advisor"]).unwrap();
        assert!(matches!(
            cli.command_or_default(),
            Commands::Run { headless: false, .. }
        ));
        assert_eq!(cli.config_dir, PathBuf::from("config"));
    }

    #[test]
    fn test_run_headless_with_inputs() {
        let cli = Cli::try_parse_from([
            "agri-advisor",
            "run",
            "--headless",
            "--farmer",
            "Asha",
            "--city",
            "Pune",
        ])
        .unwrap();
        match cli.command_or_default() {
            Commands::Run {
                headless,
                farmer,
                city,
            } => {
                assert!(headless);
                assert_eq!(farmer.as_deref(), Some("Asha"));
                assert_eq!(city.as_deref(), Some("Pune"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_export_out_path() {
        let cli = Cli::try_parse_from(["agri-advisor", "export", "--out", "/tmp/recs.csv"]).unwrap();
        match cli.command_or_default() {
            Commands::Export { out } => assert_eq!(out, Some(PathBuf::from("/tmp/recs.csv"))),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_history_limit() {
        let cli = Cli::try_parse_from(["agri-advisor", "history", "-l", "3", "--json"]).unwrap();
        assert!(matches!(
            cli.command_or_default(),
            Commands::History {
                limit: Some(3),
                json: true
            }
        ));
    }
}
