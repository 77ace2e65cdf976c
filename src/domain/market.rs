use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of the market-prices dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketRow {
    #[serde(rename = "Product")]
    pub product: String,
    #[serde(rename = "Market_Price_per_ton", with = "rust_decimal::serde::str")]
    pub price_per_ton: Decimal,
}

impl MarketRow {
    pub fn new(product: impl Into<String>, price_per_ton: Decimal) -> Self {
        Self {
            product: product.into(),
            price_per_ton,
        }
    }
}

/// The `n` highest-priced rows, descending. Equal prices keep dataset order.
pub fn top_by_price(rows: &[MarketRow], n: usize) -> Vec<MarketRow> {
    let mut sorted = rows.to_vec();
    // sort_by is stable
    sorted.sort_by(|a, b| b.price_per_ton.cmp(&a.price_per_ton));
    sorted.truncate(n);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_top_five_descending() {
        let rows = vec![
            MarketRow::new("Rice", dec!(500)),
            MarketRow::new("Wheat", dec!(320)),
            MarketRow::new("Soybean", dec!(780)),
            MarketRow::new("Corn", dec!(210)),
            MarketRow::new("Millet", dec!(450)),
            MarketRow::new("Sorghum", dec!(150)),
            MarketRow::new("Cotton", dec!(910)),
        ];

        let top = top_by_price(&rows, 5);
        let names: Vec<&str> = top.iter().map(|r| r.product.as_str()).collect();
        assert_eq!(names, vec!["Cotton", "Soybean", "Rice", "Millet", "Wheat"]);
    }

    #[test]
    fn test_ties_keep_original_order() {
        let rows = vec![
            MarketRow::new("A", dec!(100)),
            MarketRow::new("B", dec!(300)),
            MarketRow::new("C", dec!(100)),
            MarketRow::new("D", dec!(300)),
            MarketRow::new("E", dec!(100)),
            MarketRow::new("F", dec!(100)),
        ];

        let top = top_by_price(&rows, 5);
        let names: Vec<&str> = top.iter().map(|r| r.product.as_str()).collect();
        assert_eq!(names, vec!["B", "D", "A", "C", "E"]);
    }

    #[test]
    fn test_fewer_rows_than_requested() {
        let rows = vec![MarketRow::new("Rice", dec!(500))];
        assert_eq!(top_by_price(&rows, 5).len(), 1);
        assert!(top_by_price(&[], 5).is_empty());
    }
}
