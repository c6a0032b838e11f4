use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// SQLite connection pool wrapper. The database file is created on first
/// connect; the schema is idempotent.
#[derive(Clone)]
pub struct DbClient {
    pub pool: Pool<Sqlite>,
}

impl DbClient {
    pub async fn new(connection_string: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(connection_string)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Single-connection in-memory database, used by tests.
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        Ok(Self { pool })
    }

    /// Create tables and indexes if they do not exist yet.
    pub async fn init_schema(&self) -> Result<(), sqlx::Error> {
        info!("Initializing database schema");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS items (
                id TEXT PRIMARY KEY,
                sku TEXT NOT NULL UNIQUE,
                category TEXT NOT NULL,
                brand TEXT NOT NULL,
                name TEXT NOT NULL,
                size TEXT,
                color TEXT,
                condition TEXT NOT NULL,
                cost REAL NOT NULL,
                suggested_price REAL,
                listed_price REAL,
                sold_price REAL,
                listing_fee REAL,
                final_value_fee REAL,
                processing_fee REAL,
                total_fees REAL,
                gross_profit REAL,
                net_profit REAL,
                roi_percentage REAL,
                status TEXT NOT NULL,
                photo_paths TEXT NOT NULL DEFAULT '[]',
                processed_photos TEXT NOT NULL DEFAULT '[]',
                ebay_listing_id TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                listed_at TEXT,
                sold_at TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_items_status ON items(status)")
            .execute(&self.pool)
            .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_items_category ON items(category)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS comparables (
                id TEXT PRIMARY KEY,
                search_term TEXT NOT NULL,
                category TEXT NOT NULL,
                brand TEXT,
                condition TEXT,
                title TEXT NOT NULL,
                price REAL NOT NULL,
                shipping_cost REAL,
                total_price REAL NOT NULL,
                platform TEXT NOT NULL,
                listing_url TEXT,
                listing_status TEXT NOT NULL,
                scraped_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_comparables_search_term ON comparables(search_term)",
        )
        .execute(&self.pool)
        .await?;

        info!("Schema ready");
        Ok(())
    }
}
