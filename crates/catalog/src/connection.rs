use std::env;
use std::str::FromStr;
use std::time::Duration;

use configuration::DatabaseSettings;
use dotenvy::dotenv;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::error::CatalogError;

/// Establishes a connection pool to the SQLite catalog database.
///
/// This function reads the `DATABASE_URL` from the environment (loading a
/// `.env` file if one is present), creates the database file on first use,
/// and returns a pool sized according to the provided settings. The pool can
/// be shared across the entire application.
pub async fn connect(settings: &DatabaseSettings) -> Result<SqlitePool, CatalogError> {
    // Load environment variables from the .env file, if there is one.
    dotenv().ok();

    let database_url = env::var("DATABASE_URL")
        .map_err(|_e| CatalogError::ConnectionConfigError("DATABASE_URL must be set.".to_string()))?;

    let options = SqliteConnectOptions::from_str(&database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// A utility function to run database migrations automatically.
///
/// This is useful for ensuring the database schema is up-to-date when the application starts.
/// The integration tests use it for the same purpose against in-memory databases.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), CatalogError> {
    // Use a relative path from the crate root
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
