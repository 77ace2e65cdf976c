//! Output formatting for CLI commands.
//!
//! Human-readable tables (default) or JSON (--json).

use serde::Serialize;
use tabled::{Table, Tabled};

use crate::domain::{MarketRow, Recommendation};

/// Output mode for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Table,
    Json,
}

impl OutputMode {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputMode::Json
        } else {
            OutputMode::Table
        }
    }
}

/// One stored recommendation, flattened for the history table
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct HistoryRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Created")]
    pub created_at: String,
    #[tabled(rename = "Farmer")]
    pub farmer_name: String,
    #[tabled(rename = "Suggestion")]
    pub suggestion: String,
    #[tabled(rename = "Score")]
    pub sustainability_score: String,
    #[tabled(rename = "Weather")]
    pub weather_condition: String,
    #[tabled(rename = "Price (₹/ton)")]
    pub market_price: String,
}

/// Longest suggestion shown in the table before truncation
const SUGGESTION_WIDTH: usize = 60;

impl From<&Recommendation> for HistoryRow {
    fn from(rec: &Recommendation) -> Self {
        Self {
            id: rec.id.map(|id| id.to_string()).unwrap_or_else(|| "-".into()),
            created_at: rec
                .created_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".into()),
            farmer_name: rec.farmer_name.clone(),
            suggestion: truncate(&rec.suggested_crop, SUGGESTION_WIDTH),
            sustainability_score: format!("{:.2}", rec.sustainability_score),
            weather_condition: rec.weather_condition.clone(),
            market_price: rec.market_price.normalize().to_string(),
        }
    }
}

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct MarketTableRow {
    #[tabled(rename = "#")]
    pub rank: usize,
    #[tabled(rename = "Product")]
    pub product: String,
    #[tabled(rename = "Price (₹/ton)")]
    pub price_per_ton: String,
}

impl MarketTableRow {
    pub fn ranked(rows: &[MarketRow]) -> Vec<Self> {
        rows.iter()
            .enumerate()
            .map(|(i, r)| Self {
                rank: i + 1,
                product: r.product.clone(),
                price_per_ton: r.price_per_ton.normalize().to_string(),
            })
            .collect()
    }
}

fn truncate(text: &str, max: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max {
        flat
    } else {
        let cut: String = flat.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

/// Print a vec of Tabled + Serialize items in the chosen mode.
pub fn print_items<T: Tabled + Serialize>(items: &[T], mode: OutputMode) -> anyhow::Result<()> {
    match mode {
        OutputMode::Table => {
            if items.is_empty() {
                println!("(no results)");
            } else {
                let table = Table::new(items).to_string();
                println!("{table}");
            }
        }
        OutputMode::Json => {
            let json = serde_json::to_string_pretty(items)?;
            println!("{json}");
        }
    }
    Ok(())
}

/// Print a success message.
pub fn print_success(msg: &str) {
    println!("\x1b[32m{msg}\x1b[0m");
}

/// Print a warning message.
pub fn print_warn(msg: &str) {
    println!("\x1b[33m{msg}\x1b[0m");
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("\x1b[31m{msg}\x1b[0m");
}
