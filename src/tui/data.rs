//! Data models for the TUI dashboard
//!
//! These models are optimized for display and derived from domain types.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::domain::{MarketRow, Recommendation, WeatherSnapshot};

/// Weather panel data
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayWeather {
    pub temperature: String,
    pub condition: String,
    pub humidity: String,
    pub wind: String,
    /// Last fetch failed
    pub failed: bool,
}

impl From<&WeatherSnapshot> for DisplayWeather {
    fn from(w: &WeatherSnapshot) -> Self {
        Self {
            temperature: format!("{:.1}°C", w.temperature_c),
            condition: w.condition.clone(),
            humidity: format!("{:.0}%", w.humidity),
            wind: format!("{:.1} km/h", w.wind_kph),
            failed: w.is_sentinel(),
        }
    }
}

/// Latest recommendation panel data
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRecommendation {
    pub farmer_name: String,
    pub lead_crop: String,
    pub suggestion: String,
    pub sustainability_score: f64,
    pub conditions: String,
    pub weather_condition: String,
    pub market_price: Decimal,
    /// Store id, `None` when the insert failed
    pub id: Option<i64>,
}

impl From<&Recommendation> for DisplayRecommendation {
    fn from(rec: &Recommendation) -> Self {
        Self {
            farmer_name: rec.farmer_name.clone(),
            lead_crop: rec.lead_crop().to_string(),
            suggestion: rec.suggested_crop.clone(),
            sustainability_score: rec.sustainability_score,
            conditions: format!(
                "pH {:.1} | moisture {:.1}% | {:.1}°C | {:.0} mm",
                rec.soil_ph, rec.soil_moisture, rec.temperature_c, rec.rainfall_mm
            ),
            weather_condition: rec.weather_condition.clone(),
            market_price: rec.market_price,
            id: rec.id,
        }
    }
}

impl DisplayRecommendation {
    /// Score as a 0.0..=1.0 gauge ratio (scores are percentages)
    pub fn score_ratio(&self) -> f64 {
        (self.sustainability_score / 100.0).clamp(0.0, 1.0)
    }
}

/// One row of the top-market table
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayMarketRow {
    pub rank: usize,
    pub product: String,
    pub price: Decimal,
    /// Price relative to the highest price in the list (0.0 to 1.0)
    pub bar_ratio: f64,
}

/// Rank rows and scale their bars against the top price
pub fn market_rows_for_display(rows: &[MarketRow]) -> Vec<DisplayMarketRow> {
    let max = rows
        .iter()
        .map(|r| r.price_per_ton)
        .max()
        .unwrap_or(Decimal::ZERO);

    rows.iter()
        .enumerate()
        .map(|(i, r)| {
            let bar_ratio = if max > Decimal::ZERO {
                (r.price_per_ton / max).to_f64().unwrap_or(0.0).clamp(0.0, 1.0)
            } else {
                0.0
            };
            DisplayMarketRow {
                rank: i + 1,
                product: r.product.clone(),
                price: r.price_per_ton,
                bar_ratio,
            }
        })
        .collect()
}

/// Format a price as rupees with thousands separators and two decimals
pub fn format_rupees(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    let int_part = rounded.trunc().abs().to_u64().unwrap_or(0);
    let frac_part = ((rounded.fract().abs()) * Decimal::from(100))
        .to_u64()
        .unwrap_or(0);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}₹{}.{:02}", sign, format_with_commas(int_part), frac_part)
}

fn format_with_commas(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}
