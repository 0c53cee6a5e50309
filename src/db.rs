// Database connector
// Builds the shared PostgreSQL pool at process start

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Connects to PostgreSQL and returns the shared pool.
///
/// Failure here is fatal to startup; the caller logs and exits rather than
/// retrying. Pool sizing matches a small single-instance service.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    tracing::info!("Connecting to database...");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    tracing::info!("Database connected successfully");
    Ok(pool)
}
