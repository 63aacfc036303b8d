use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to load environment variables for database connection: {0}")]
    ConnectionConfigError(String),

    #[error("Database migration failed: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    InvalidInput(#[from] CoreError),

    #[error("Meal with {0} not found")]
    NotFound(String),

    #[error("Meal with {0} has been deleted")]
    AlreadyDeleted(String),

    #[error("Meal with name '{0}' already exists")]
    Duplicate(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}
