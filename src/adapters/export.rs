//! Export stored recommendations to a spreadsheet-compatible CSV file

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::domain::Recommendation;
use crate::error::{AgriError, Result};

/// Message reported when the store holds nothing to export
pub const NOTHING_TO_EXPORT: &str = "No data available to export.";

#[derive(Debug, Serialize)]
struct ExportRecord<'a> {
    #[serde(rename = "Farmer Name")]
    farmer_name: &'a str,
    #[serde(rename = "Suggested Crops")]
    suggested_crop: &'a str,
    #[serde(rename = "Soil pH")]
    soil_ph: f64,
    #[serde(rename = "Soil Moisture")]
    soil_moisture: f64,
    #[serde(rename = "Temperature (°C)")]
    temperature_c: f64,
    #[serde(rename = "Rainfall (mm)")]
    rainfall_mm: f64,
    #[serde(rename = "Sustainability Score")]
    sustainability_score: f64,
    #[serde(rename = "Weather Condition")]
    weather_condition: &'a str,
    #[serde(rename = "Market Price (₹/ton)")]
    market_price: String,
}

impl<'a> From<&'a Recommendation> for ExportRecord<'a> {
    fn from(rec: &'a Recommendation) -> Self {
        Self {
            farmer_name: &rec.farmer_name,
            suggested_crop: &rec.suggested_crop,
            soil_ph: rec.soil_ph,
            soil_moisture: rec.soil_moisture,
            temperature_c: rec.temperature_c,
            rainfall_mm: rec.rainfall_mm,
            sustainability_score: rec.sustainability_score,
            weather_condition: &rec.weather_condition,
            market_price: rec.market_price.normalize().to_string(),
        }
    }
}

/// Write recommendations as CSV to any writer
pub fn write_csv<W: Write>(writer: W, recs: &[Recommendation]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for rec in recs {
        wtr.serialize(ExportRecord::from(rec))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Export to `path`. An empty list writes nothing and returns a validation
/// error carrying [`NOTHING_TO_EXPORT`].
pub fn export_to_file(path: &Path, recs: &[Recommendation]) -> Result<usize> {
    if recs.is_empty() {
        return Err(AgriError::Validation(NOTHING_TO_EXPORT.to_string()));
    }

    let file = std::fs::File::create(path)?;
    write_csv(file, recs)?;
    info!("Exported {} recommendations to {}", recs.len(), path.display());
    Ok(recs.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FarmConditionRow;
    use rust_decimal_macros::dec;

    fn rec() -> Recommendation {
        let row = FarmConditionRow {
            crop_type: "Rice".to_string(),
            soil_ph: 6.5,
            soil_moisture: 30.0,
            temperature_c: 25.0,
            rainfall_mm: 150.0,
            sustainability_score: 80.0,
        };
        let mut rec =
            Recommendation::draft("Asha", "Rice, Wheat".to_string(), &row, "Clear");
        rec.market_price = dec!(500.00);
        rec
    }

    #[test]
    fn test_csv_headers_and_quoting() {
        let mut buf = Vec::new();
        write_csv(&mut buf, &[rec()]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next().unwrap(),
            "Farmer Name,Suggested Crops,Soil pH,Soil Moisture,Temperature (°C),Rainfall (mm),Sustainability Score,Weather Condition,Market Price (₹/ton)"
        );
        assert_eq!(lines.next().unwrap(), "Asha,\"Rice, Wheat\",6.5,30.0,25.0,150.0,80.0,Clear,500");
    }

    #[test]
    fn test_empty_export_writes_nothing() {
        let path = std::env::temp_dir().join("agri_advisor_empty_export_test.csv");
        let _ = std::fs::remove_file(&path);

        let err = export_to_file(&path, &[]).unwrap_err();
        assert!(err.to_string().contains(NOTHING_TO_EXPORT));
        assert!(!path.exists());
    }
}
