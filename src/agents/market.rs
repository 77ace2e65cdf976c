//! MarketAgent: top-priced products and price backfill
//!
//! Each cycle recomputes the highest-priced products, writes their prices
//! onto every stored recommendation that names them, then publishes the
//! list. The store is updated before the list is published, so a reader that
//! sees a new top list also sees its prices applied.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::adapters::{MarketSource, SqliteStore};
use crate::agents::{AgentContext, PollingAgent};
use crate::coordinator::Publisher;
use crate::domain::{top_by_price, MarketRow};
use crate::error::Result;

pub struct MarketAgent {
    source: Arc<dyn MarketSource>,
    store: SqliteStore,
    publisher: Publisher<Vec<MarketRow>>,
    top_n: usize,
    interval: Duration,
}

impl MarketAgent {
    pub fn new(
        source: Arc<dyn MarketSource>,
        store: SqliteStore,
        publisher: Publisher<Vec<MarketRow>>,
        top_n: usize,
        interval: Duration,
    ) -> Self {
        Self {
            source,
            store,
            publisher,
            top_n,
            interval,
        }
    }

    /// One market cycle. On error the published list is left untouched.
    pub async fn refresh(&self) -> Result<Vec<MarketRow>> {
        let rows = self.source.market_rows()?;
        let top = top_by_price(&rows, self.top_n);

        for item in &top {
            match self
                .store
                .backfill_market_price(&item.product, item.price_per_ton)
                .await
            {
                Ok(updated) => debug!(product = %item.product, updated, "price backfilled"),
                Err(e) => warn!(
                    product = %item.product,
                    category = e.category(),
                    error = %e,
                    "price backfill failed"
                ),
            }
        }

        self.publisher.publish(top.clone());
        if let Some(first) = top.first() {
            info!("Top crop is {} at ₹{}/ton", first.product, first.price_per_ton);
        }
        Ok(top)
    }
}

#[async_trait]
impl PollingAgent for MarketAgent {
    fn id(&self) -> &str {
        "market"
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    async fn run_cycle(&self, _ctx: &AgentContext) {
        if let Err(e) = self.refresh().await {
            warn!(category = e.category(), error = %e, "market cycle failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::datasets::MockMarketSource;
    use crate::adapters::StaticMarketData;
    use crate::coordinator::SharedState;
    use crate::domain::{FarmConditionRow, Recommendation};
    use crate::error::AgriError;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn prices() -> Vec<MarketRow> {
        vec![
            MarketRow::new("Wheat", dec!(300)),
            MarketRow::new("Rice", dec!(500)),
            MarketRow::new("Corn", dec!(150)),
            MarketRow::new("Soybean", dec!(420)),
            MarketRow::new("Millet", dec!(300)),
            MarketRow::new("Cotton", dec!(610)),
            MarketRow::new("Barley", dec!(90)),
        ]
    }

    fn farm_row() -> FarmConditionRow {
        FarmConditionRow {
            crop_type: "Rice".to_string(),
            soil_ph: 6.0,
            soil_moisture: 40.0,
            temperature_c: 26.0,
            rainfall_mm: 200.0,
            sustainability_score: 80.0,
        }
    }

    async fn store_with(suggestions: &[&str]) -> SqliteStore {
        let store = SqliteStore::in_memory().await.unwrap();
        for s in suggestions {
            let rec = Recommendation::draft("Asha", s.to_string(), &farm_row(), "Sunny");
            store.insert_recommendation(&rec).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_publishes_top_five_descending() {
        let state = SharedState::new("Pune");
        let agent = MarketAgent::new(
            Arc::new(StaticMarketData::new(Arc::new(prices()))),
            store_with(&[]).await,
            state.publishers.market,
            5,
            Duration::from_secs(60),
        );

        agent.refresh().await.unwrap();

        let names: Vec<String> = state
            .view
            .top_market()
            .into_iter()
            .map(|r| r.product)
            .collect();
        // Wheat precedes Millet at equal price (dataset order)
        assert_eq!(names, vec!["Cotton", "Rice", "Soybean", "Wheat", "Millet"]);
    }

    #[tokio::test]
    async fn test_backfills_matching_recommendations() {
        let state = SharedState::new("Pune");
        let store = store_with(&["Consider Rice and Wheat", "Barley only"]).await;
        let agent = MarketAgent::new(
            Arc::new(StaticMarketData::new(Arc::new(vec![MarketRow::new(
                "Rice",
                dec!(500),
            )]))),
            store.clone(),
            state.publishers.market,
            5,
            Duration::from_secs(60),
        );

        agent.refresh().await.unwrap();

        let recs = store.list_recommendations().await.unwrap();
        assert_eq!(recs[0].market_price, dec!(500));
        assert_eq!(recs[1].market_price, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_backfill_is_idempotent_across_cycles() {
        let state = SharedState::new("Pune");
        let store = store_with(&["Cotton, Rice", "Soybean", "Sorghum"]).await;
        let agent = MarketAgent::new(
            Arc::new(StaticMarketData::new(Arc::new(prices()))),
            store.clone(),
            state.publishers.market,
            5,
            Duration::from_secs(60),
        );

        agent.refresh().await.unwrap();
        let after_first = store.list_recommendations().await.unwrap();
        agent.refresh().await.unwrap();
        let after_second = store.list_recommendations().await.unwrap();

        let prices_of = |recs: &[Recommendation]| {
            recs.iter().map(|r| r.market_price).collect::<Vec<_>>()
        };
        assert_eq!(prices_of(&after_first), prices_of(&after_second));
        // "Cotton, Rice" matches both; Rice is applied last
        assert_eq!(after_second[0].market_price, dec!(500));
        assert_eq!(after_second[1].market_price, dec!(420));
        assert_eq!(after_second[2].market_price, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_source_failure_keeps_previous_list() {
        let state = SharedState::new("Pune");
        let mut source = MockMarketSource::new();
        let mut calls = 0;
        source.expect_market_rows().times(2).returning(move || {
            calls += 1;
            if calls == 1 {
                Ok(vec![MarketRow::new("Rice", dec!(500))])
            } else {
                Err(AgriError::Data("market dataset unreadable".into()))
            }
        });

        let agent = MarketAgent::new(
            Arc::new(source),
            store_with(&[]).await,
            state.publishers.market,
            5,
            Duration::from_secs(60),
        );

        agent.refresh().await.unwrap();
        assert!(agent.refresh().await.is_err());
        assert_eq!(
            state.view.top_market(),
            vec![MarketRow::new("Rice", dec!(500))]
        );
    }
}
