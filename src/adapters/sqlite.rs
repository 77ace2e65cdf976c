use std::str::FromStr;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use tracing::{debug, info, instrument};

use crate::domain::Recommendation;
use crate::error::Result;

/// SQLite storage for generated recommendations.
///
/// Every method is a single auto-committed statement; there are no
/// cross-statement transactions.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if missing) the database at `database_url`
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.init_schema().await?;
        info!("Connected to SQLite at {}", database_url);
        Ok(store)
    }

    /// Private in-memory database. One connection, since each SQLite
    /// memory connection is a separate database.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// Create a store from an existing connection pool
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS farmer_recommendations (
                id INTEGER PRIMARY KEY,
                farmer_name TEXT,
                suggested_crop TEXT,
                soil_ph REAL,
                soil_moisture REAL,
                temperature REAL,
                rainfall REAL,
                sustainability_score REAL,
                weather_condition TEXT,
                market_price REAL,
                timestamp DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    // ==================== Recommendations ====================

    /// Insert a recommendation, returning the generated row id
    #[instrument(skip(self, rec), fields(farmer = %rec.farmer_name))]
    pub async fn insert_recommendation(&self, rec: &Recommendation) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO farmer_recommendations (
                farmer_name, suggested_crop, soil_ph, soil_moisture, temperature,
                rainfall, sustainability_score, weather_condition, market_price
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&rec.farmer_name)
        .bind(&rec.suggested_crop)
        .bind(rec.soil_ph)
        .bind(rec.soil_moisture)
        .bind(rec.temperature_c)
        .bind(rec.rainfall_mm)
        .bind(rec.sustainability_score)
        .bind(&rec.weather_condition)
        .bind(rec.market_price.to_f64().unwrap_or(0.0))
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Set `market_price` on every recommendation whose suggestion contains
    /// `product` (case-sensitive). Returns the number of rows updated.
    ///
    /// `instr` is used instead of `LIKE` because SQLite's LIKE folds ASCII case.
    pub async fn backfill_market_price(&self, product: &str, price: Decimal) -> Result<u64> {
        if product.is_empty() {
            return Ok(0);
        }

        let result = sqlx::query(
            r#"
            UPDATE farmer_recommendations
            SET market_price = ?
            WHERE instr(suggested_crop, ?) > 0
            "#,
        )
        .bind(price.to_f64().unwrap_or(0.0))
        .bind(product)
        .execute(&self.pool)
        .await?;

        debug!(
            "Backfilled {} rows for {} at {}",
            result.rows_affected(),
            product,
            price
        );
        Ok(result.rows_affected())
    }

    /// All stored recommendations, oldest first
    pub async fn list_recommendations(&self) -> Result<Vec<Recommendation>> {
        let rows = sqlx::query(
            r#"
            SELECT id, farmer_name, suggested_crop, soil_ph, soil_moisture, temperature,
                   rainfall, sustainability_score, weather_condition, market_price, timestamp
            FROM farmer_recommendations
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_recommendation).collect()
    }

    /// Get a recommendation by id
    pub async fn get_recommendation(&self, id: i64) -> Result<Option<Recommendation>> {
        let row = sqlx::query(
            r#"
            SELECT id, farmer_name, suggested_crop, soil_ph, soil_moisture, temperature,
                   rainfall, sustainability_score, weather_condition, market_price, timestamp
            FROM farmer_recommendations
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_recommendation).transpose()
    }

    /// Number of stored recommendations
    pub async fn count_recommendations(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM farmer_recommendations")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("n"))
    }
}

fn row_to_recommendation(row: &SqliteRow) -> Result<Recommendation> {
    let price: Option<f64> = row.try_get("market_price")?;
    Ok(Recommendation {
        id: Some(row.try_get("id")?),
        farmer_name: row.try_get::<Option<String>, _>("farmer_name")?.unwrap_or_default(),
        suggested_crop: row
            .try_get::<Option<String>, _>("suggested_crop")?
            .unwrap_or_default(),
        soil_ph: row.try_get::<Option<f64>, _>("soil_ph")?.unwrap_or_default(),
        soil_moisture: row.try_get::<Option<f64>, _>("soil_moisture")?.unwrap_or_default(),
        temperature_c: row.try_get::<Option<f64>, _>("temperature")?.unwrap_or_default(),
        rainfall_mm: row.try_get::<Option<f64>, _>("rainfall")?.unwrap_or_default(),
        sustainability_score: row
            .try_get::<Option<f64>, _>("sustainability_score")?
            .unwrap_or_default(),
        weather_condition: row
            .try_get::<Option<String>, _>("weather_condition")?
            .unwrap_or_default(),
        market_price: price.and_then(Decimal::from_f64).unwrap_or_default(),
        created_at: row.try_get("timestamp")?,
    })
}
