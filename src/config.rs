use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub weather: WeatherConfig,
    pub advisor: AdvisorConfig,
    #[serde(default)]
    pub market: MarketConfig,
    pub datasets: DatasetConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Status server port (disabled when unset)
    #[serde(default)]
    pub status_port: Option<u16>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherConfig {
    /// WeatherAPI key
    pub api_key: String,
    /// Base URL of the current-conditions API
    #[serde(default = "default_weather_url")]
    pub base_url: String,
    /// City used until the user sets one
    pub default_city: String,
    /// Seconds between weather cycles
    #[serde(default = "default_weather_interval")]
    pub interval_secs: u64,
}

fn default_weather_url() -> String {
    "https://api.weatherapi.com/v1".to_string()
}

fn default_weather_interval() -> u64 {
    60
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdvisorConfig {
    /// Base URL of the local Ollama server
    #[serde(default = "default_ollama_url")]
    pub ollama_url: String,
    /// Model identifier sent with every completion request
    #[serde(default = "default_model")]
    pub model: String,
    /// Seconds between advisor cycles
    #[serde(default = "default_advisor_interval")]
    pub interval_secs: u64,
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "tinyllama".to_string()
}

fn default_advisor_interval() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarketConfig {
    /// Seconds between market cycles
    #[serde(default = "default_market_interval")]
    pub interval_secs: u64,
    /// Number of top-priced products to publish and backfill
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_market_interval() -> u64 {
    60
}

fn default_top_n() -> usize {
    5
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_market_interval(),
            top_n: default_top_n(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    /// Farm-conditions CSV
    pub farm_path: PathBuf,
    /// Market-prices CSV
    pub market_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite connection URL
    pub url: String,
    /// Maximum connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ExportConfig {
    /// Destination used by the dashboard export key
    #[serde(default)]
    pub default_path: Option<PathBuf>,
}

impl ExportConfig {
    /// Configured path, falling back to the user's document directory
    pub fn resolve_path(&self) -> PathBuf {
        self.default_path.clone().unwrap_or_else(|| {
            dirs::document_dir()
                .or_else(dirs::home_dir)
                .unwrap_or_else(|| PathBuf::from("."))
                .join("farmer_recommendations.csv")
        })
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable JSON formatted logs
    #[serde(default)]
    pub json: bool,
    /// Directory for the rolling log file
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load configuration from files and environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();

        let builder = Config::builder()
            // Start with default values
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?
            .set_default("weather.base_url", default_weather_url())?
            .set_default("weather.default_city", "Pune")?
            .set_default("weather.api_key", "")?
            .set_default("weather.interval_secs", 60)?
            .set_default("advisor.interval_secs", 30)?
            .set_default("market.interval_secs", 60)?
            .set_default("market.top_n", 5)?
            .set_default("database.url", "sqlite://agriculture_ai.db?mode=rwc")?
            .set_default("database.max_connections", 5)?
            .set_default("datasets.farm_path", "data/farmer_advisor_dataset.csv")?
            .set_default("datasets.market_path", "data/market_researcher_dataset.csv")?
            // Load default config file
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Load environment-specific config (e.g., config/production.toml)
            .add_source(
                File::from(config_dir.join(
                    std::env::var("AGRI_ENV").unwrap_or_else(|_| "development".to_string()),
                ))
                .required(false),
            )
            // Override with environment variables (AGRI_WEATHER__API_KEY, etc.)
            .add_source(
                Environment::with_prefix("AGRI")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Create a default configuration for CLI usage
    pub fn default_config() -> Self {
        Self {
            weather: WeatherConfig {
                api_key: String::new(),
                base_url: default_weather_url(),
                default_city: "Pune".to_string(),
                interval_secs: default_weather_interval(),
            },
            advisor: AdvisorConfig {
                ollama_url: default_ollama_url(),
                model: default_model(),
                interval_secs: default_advisor_interval(),
            },
            market: MarketConfig::default(),
            datasets: DatasetConfig {
                farm_path: PathBuf::from("data/farmer_advisor_dataset.csv"),
                market_path: PathBuf::from("data/market_researcher_dataset.csv"),
            },
            database: DatabaseConfig {
                url: "sqlite://agriculture_ai.db?mode=rwc".to_string(),
                max_connections: default_max_connections(),
            },
            export: ExportConfig::default(),
            logging: LoggingConfig::default(),
            status_port: None,
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.weather.api_key.trim().is_empty() {
            errors.push("weather.api_key must be set".to_string());
        }

        if self.weather.default_city.trim().is_empty() {
            errors.push("weather.default_city must not be empty".to_string());
        }

        for (name, secs) in [
            ("weather.interval_secs", self.weather.interval_secs),
            ("advisor.interval_secs", self.advisor.interval_secs),
            ("market.interval_secs", self.market.interval_secs),
        ] {
            if secs == 0 {
                errors.push(format!("{name} must be positive"));
            }
        }

        if self.market.top_n == 0 {
            errors.push("market.top_n must be positive".to_string());
        }

        if self.advisor.model.trim().is_empty() {
            errors.push("advisor.model must not be empty".to_string());
        }

        if !self.database.url.starts_with("sqlite:") {
            errors.push(format!(
                "database.url must be a sqlite URL, got: {}",
                self.database.url
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
