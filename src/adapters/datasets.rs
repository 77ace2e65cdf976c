//! Static datasets loaded once at startup
//!
//! Both datasets are spreadsheets exported to CSV. They are read-only after
//! loading.

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::info;

use crate::domain::{FarmConditionRow, MarketRow};
use crate::error::{AgriError, Result};

/// Source of market rows for the market agent
#[cfg_attr(test, mockall::automock)]
pub trait MarketSource: Send + Sync {
    fn market_rows(&self) -> Result<Vec<MarketRow>>;
}

/// Parse CSV rows, naming the offending record on failure
fn read_rows<T: DeserializeOwned, R: Read>(reader: R, what: &str) -> Result<Vec<T>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut rows = Vec::new();
    for (i, record) in rdr.deserialize().enumerate() {
        let row: T = record
            .map_err(|e| AgriError::Data(format!("{} dataset, record {}: {}", what, i + 1, e)))?;
        rows.push(row);
    }
    Ok(rows)
}

pub fn read_farm_conditions<R: Read>(reader: R) -> Result<Vec<FarmConditionRow>> {
    read_rows(reader, "farm conditions")
}

pub fn read_market_prices<R: Read>(reader: R) -> Result<Vec<MarketRow>> {
    read_rows(reader, "market prices")
}

/// Both datasets, shared read-only between agents
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    pub farm: Arc<Vec<FarmConditionRow>>,
    pub market: Arc<Vec<MarketRow>>,
}

impl Datasets {
    pub fn new(farm: Vec<FarmConditionRow>, market: Vec<MarketRow>) -> Self {
        Self {
            farm: Arc::new(farm),
            market: Arc::new(market),
        }
    }

    /// Load both CSV files
    pub fn load(farm_path: &Path, market_path: &Path) -> Result<Self> {
        let farm = read_farm_conditions(open(farm_path)?)?;
        let market = read_market_prices(open(market_path)?)?;
        info!(
            "Loaded {} farm condition rows and {} market rows",
            farm.len(),
            market.len()
        );
        Ok(Self::new(farm, market))
    }

    pub fn market_source(&self) -> StaticMarketData {
        StaticMarketData::new(Arc::clone(&self.market))
    }
}

fn open(path: &Path) -> Result<std::fs::File> {
    std::fs::File::open(path)
        .map_err(|e| AgriError::Data(format!("cannot open {}: {}", path.display(), e)))
}

/// Market rows held in memory for the process lifetime
#[derive(Debug, Clone)]
pub struct StaticMarketData {
    rows: Arc<Vec<MarketRow>>,
}

impl StaticMarketData {
    pub fn new(rows: Arc<Vec<MarketRow>>) -> Self {
        Self { rows }
    }
}

impl MarketSource for StaticMarketData {
    fn market_rows(&self) -> Result<Vec<MarketRow>> {
        if self.rows.is_empty() {
            return Err(AgriError::Data("market dataset is empty".to_string()));
        }
        Ok(self.rows.as_ref().clone())
    }
}
