use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::FarmConditionRow;

/// A generated crop recommendation.
///
/// Immutable once stored except for `market_price`, which the market
/// backfill sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Store row id, `None` when the insert did not happen
    pub id: Option<i64>,
    pub farmer_name: String,
    /// Free-form suggestion text from the text service (or the fallback)
    pub suggested_crop: String,
    pub soil_ph: f64,
    pub soil_moisture: f64,
    pub temperature_c: f64,
    pub rainfall_mm: f64,
    pub sustainability_score: f64,
    pub weather_condition: String,
    pub market_price: Decimal,
    /// Set by the store; absent on freshly generated values
    pub created_at: Option<NaiveDateTime>,
}

impl Recommendation {
    /// New unsaved recommendation anchored to the selected farm row
    pub fn draft(
        farmer_name: &str,
        suggested_crop: String,
        row: &FarmConditionRow,
        weather_condition: &str,
    ) -> Self {
        Self {
            id: None,
            farmer_name: farmer_name.to_string(),
            suggested_crop,
            soil_ph: row.soil_ph,
            soil_moisture: row.soil_moisture,
            temperature_c: row.temperature_c,
            rainfall_mm: row.rainfall_mm,
            sustainability_score: row.sustainability_score,
            weather_condition: weather_condition.to_string(),
            market_price: Decimal::ZERO,
            created_at: None,
        }
    }

    pub fn with_id(mut self, id: Option<i64>) -> Self {
        self.id = id;
        self
    }

    /// Whether a product name occurs in the suggestion (case-sensitive)
    pub fn mentions(&self, product: &str) -> bool {
        !product.is_empty() && self.suggested_crop.contains(product)
    }

    /// Short crop label for display: last word of the first list item
    /// after any "...crops:" lead-in
    pub fn lead_crop(&self) -> &str {
        let list = self
            .suggested_crop
            .rsplit(':')
            .next()
            .unwrap_or(&self.suggested_crop);
        list.split(|c: char| c == ',' || c == '\n')
            .next()
            .unwrap_or("")
            .split_whitespace()
            .last()
            .map(|w| w.trim_end_matches('.'))
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn farm_row() -> FarmConditionRow {
        FarmConditionRow {
            crop_type: "Soybean".to_string(),
            soil_ph: 6.8,
            soil_moisture: 32.5,
            temperature_c: 24.0,
            rainfall_mm: 180.0,
            sustainability_score: 91.2,
        }
    }

    #[test]
    fn test_draft_copies_farm_fields() {
        let rec = Recommendation::draft("Asha", "Rice".to_string(), &farm_row(), "Sunny");
        assert_eq!(rec.id, None);
        assert_eq!(rec.farmer_name, "Asha");
        assert_eq!(rec.soil_ph, 6.8);
        assert_eq!(rec.rainfall_mm, 180.0);
        assert_eq!(rec.sustainability_score, 91.2);
        assert_eq!(rec.weather_condition, "Sunny");
        assert_eq!(rec.market_price, Decimal::ZERO);
    }

    #[test]
    fn test_mentions_is_case_sensitive() {
        let rec = Recommendation::draft(
            "Asha",
            "Consider Rice and Wheat".to_string(),
            &farm_row(),
            "Sunny",
        );
        assert!(rec.mentions("Rice"));
        assert!(rec.mentions("Wheat"));
        assert!(!rec.mentions("rice"));
        assert!(!rec.mentions(""));
    }

    #[test]
    fn test_lead_crop() {
        let rec = Recommendation::draft(
            "Asha",
            "Based on your conditions, consider these crops: Soybean, Rice, Wheat, Millet, and Sorghum."
                .to_string(),
            &farm_row(),
            "Sunny",
        );
        assert_eq!(rec.lead_crop(), "Soybean");

        let rec = Recommendation::draft("Asha", "Maize.".to_string(), &farm_row(), "Sunny");
        assert_eq!(rec.lead_crop(), "Maize");
    }
}
