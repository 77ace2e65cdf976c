//! Headless presentation: log every published change instead of drawing

use tracing::info;

use crate::coordinator::{CoordinatorHandle, Topic};

/// Log each change until the state closes or `shutdown` resolves
pub async fn log_changes<F>(handle: CoordinatorHandle, shutdown: F)
where
    F: std::future::Future<Output = ()>,
{
    let mut changes = handle.subscribe();
    tokio::pin!(shutdown);

    loop {
        let topic = tokio::select! {
            topic = changes.next_change() => topic,
            _ = &mut shutdown => break,
        };
        let Some(topic) = topic else {
            break;
        };

        let state = handle.state();
        match topic {
            Topic::Weather => {
                let w = state.weather();
                info!(
                    temperature_c = w.temperature_c,
                    humidity = w.humidity,
                    wind_kph = w.wind_kph,
                    "weather: {}",
                    w.condition
                );
            }
            Topic::Recommendations => {
                for rec in state.recommendations() {
                    info!(
                        id = ?rec.id,
                        farmer = %rec.farmer_name,
                        score = rec.sustainability_score,
                        "recommendation: {}",
                        rec.suggested_crop
                    );
                }
            }
            Topic::Market => {
                let summary = state
                    .top_market()
                    .iter()
                    .map(|r| format!("{} ₹{}", r.product, r.price_per_ton))
                    .collect::<Vec<_>>()
                    .join(", ");
                info!("market top: {}", summary);
            }
            Topic::Status => info!("status: {}", state.status()),
        }
    }
}
