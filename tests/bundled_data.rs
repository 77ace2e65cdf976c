use std::path::PathBuf;

use agri_advisor::adapters::{Datasets, MarketSource};
use agri_advisor::config::AppConfig;
use agri_advisor::domain::{select_most_sustainable, top_by_price};

fn manifest_path(rel: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(rel)
}

/// The sample datasets shipped under data/ must load with the default paths.
#[test]
fn bundled_datasets_load() {
    let datasets = Datasets::load(
        &manifest_path("data/farmer_advisor_dataset.csv"),
        &manifest_path("data/market_researcher_dataset.csv"),
    )
    .expect("bundled datasets should parse");

    let anchor = select_most_sustainable(&datasets.farm).expect("farm rows present");
    assert_eq!(anchor.crop_type, "Soybean");

    let rows = datasets.market_source().market_rows().unwrap();
    let top = top_by_price(&rows, 5);
    assert_eq!(top.len(), 5);
    assert_eq!(top[0].product, "Cotton");
    assert!(top.windows(2).all(|w| w[0].price_per_ton >= w[1].price_per_ton));
}

/// config/default.toml must deserialize and pass validation once a key is set.
#[test]
fn bundled_config_loads() {
    let mut cfg = AppConfig::load_from(manifest_path("config")).expect("config should load");
    assert_eq!(cfg.weather.default_city, "Pune");
    assert_eq!(cfg.market.top_n, 5);

    cfg.weather.api_key = "test-key".to_string();
    assert!(cfg.validate().is_ok(), "{:?}", cfg.validate());
}
