use serde::{Deserialize, Serialize};

/// One row of the farm-conditions dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmConditionRow {
    #[serde(rename = "Crop_Type")]
    pub crop_type: String,
    #[serde(rename = "Soil_pH")]
    pub soil_ph: f64,
    #[serde(rename = "Soil_Moisture")]
    pub soil_moisture: f64,
    #[serde(rename = "Temperature_C")]
    pub temperature_c: f64,
    #[serde(rename = "Rainfall_mm")]
    pub rainfall_mm: f64,
    #[serde(rename = "Sustainability_Score")]
    pub sustainability_score: f64,
}

/// Row with the highest sustainability score.
///
/// Duplicate maxima resolve to the first occurrence in dataset order. Rows
/// whose score is NaN are never selected.
pub fn select_most_sustainable(rows: &[FarmConditionRow]) -> Option<&FarmConditionRow> {
    let mut best: Option<&FarmConditionRow> = None;
    for row in rows {
        if row.sustainability_score.is_nan() {
            continue;
        }
        match best {
            Some(b) if row.sustainability_score <= b.sustainability_score => {}
            _ => best = Some(row),
        }
    }
    best
}
