pub mod datasets;
pub mod export;
pub mod ollama;
pub mod sqlite;
pub mod weather_api;

pub use datasets::{
    read_farm_conditions, read_market_prices, Datasets, MarketSource, StaticMarketData,
};
pub use export::{export_to_file, write_csv, NOTHING_TO_EXPORT};
pub use ollama::{OllamaClient, TextCompletion};
pub use sqlite::SqliteStore;
pub use weather_api::{parse_current, WeatherApiClient, WeatherSource};
