//! MODARTE migration utility
//!
//! One-shot copy of the embedded SQLite store into the hosted database.
//! Safe to re-run: rows whose id already exists are left untouched.

use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use modarte_backend::config::Config;
use modarte_backend::services::MigrationService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "modarte_backend=info,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    // A CLI argument wins over the configured source path
    let source_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config.migration.source_path.clone());

    tracing::info!(source = %source_path, "Opening embedded source database");
    let source = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(
            SqliteConnectOptions::new()
                .filename(&source_path)
                .read_only(true),
        )
        .await?;

    tracing::info!("Connecting to destination database...");
    let dest = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect_with(config.database.connect_options()?)
        .await?;

    let (products, sales) = MigrationService::new(source, dest).run().await?;

    tracing::info!(
        products_inserted = products.inserted,
        sales_inserted = sales.inserted,
        "Migration complete"
    );
    Ok(())
}
