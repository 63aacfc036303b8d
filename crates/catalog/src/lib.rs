//! # Catalog Crate
//!
//! This crate acts as a high-level, application-specific interface to the
//! SQLite meal catalog. It is the system's "permanent archive."
//!
//! ## Architectural Principles
//!
//! - **Adapter layer:** This crate encapsulates all database-specific logic.
//!   It provides a clean, abstract API to the rest of the application, hiding
//!   the underlying SQL and storage details.
//! - **Narrow error kinds:** Driver-level failures are translated into the
//!   documented [`CatalogError`] variants at this boundary. Callers branch on
//!   error kinds, never on message strings.
//! - **Soft deletes:** Rows are flagged, never removed. Every read and every
//!   mutation filters deleted rows out.
//!
//! ## Public API
//!
//! - `connect`: The async function to establish the database connection pool.
//! - `run_migrations`: A utility to apply database migrations, ensuring the schema is up-to-date.
//! - `MealRepository`: The main struct that holds the connection pool and provides all
//!   the high-level data access methods (e.g., `create_meal`, `leaderboard`).
//! - `CatalogError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, run_migrations};
pub use error::CatalogError;
pub use repository::{LeaderboardEntry, MealRepository};
