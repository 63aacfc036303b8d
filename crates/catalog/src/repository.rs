use std::str::FromStr;

use core_types::{BattleOutcome, CoreError, Difficulty, LeaderboardSort, Meal};
use serde::Serialize;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use tracing::{error, info};

use crate::error::CatalogError;

/// The `MealRepository` provides a high-level, application-specific interface
/// to the catalog database. It encapsulates all SQL queries and data access logic.
#[derive(Debug, Clone)]
pub struct MealRepository {
    pool: SqlitePool,
}

/// One row of the leaderboard query. `win_pct` is derived at read time and
/// never stored.
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub id: i64,
    pub name: String,
    pub cuisine: String,
    pub price: f64,
    pub difficulty: Difficulty,
    pub battles: i64,
    pub wins: i64,
    pub win_pct: f64,
}

impl MealRepository {
    /// Creates a new `MealRepository` with a shared database connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts a new meal with zeroed battle stats.
    ///
    /// The price is validated before the store is touched; a unique-constraint
    /// violation on the meal name is translated to [`CatalogError::Duplicate`]
    /// rather than leaked as a raw driver error.
    pub async fn create_meal(
        &self,
        name: &str,
        cuisine: &str,
        price: f64,
        difficulty: Difficulty,
    ) -> Result<(), CatalogError> {
        if !price.is_finite() || price <= 0.0 {
            error!(meal = name, price, "rejected meal with non-positive price");
            return Err(CoreError::InvalidInput(
                "price".to_string(),
                format!("{price} (must be a positive number)"),
            )
            .into());
        }

        let result = sqlx::query(
            "INSERT INTO meals (meal, cuisine, price, difficulty) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(name)
        .bind(cuisine)
        .bind(price)
        .bind(difficulty.as_str())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {
                info!(meal = name, cuisine, "meal added to the catalog");
                Ok(())
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                error!(meal = name, "duplicate meal name");
                Err(CatalogError::Duplicate(name.to_string()))
            }
            Err(e) => Err(db_error("creating meal", e)),
        }
    }

    /// Soft-deletes a meal by flagging the row; nothing is physically removed.
    ///
    /// The existence check and the flag update run inside one transaction so a
    /// concurrent writer cannot slip between them.
    pub async fn delete_meal(&self, meal_id: i64) -> Result<(), CatalogError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("deleting meal", e))?;

        let deleted: Option<bool> = sqlx::query_scalar("SELECT deleted FROM meals WHERE id = ?1")
            .bind(meal_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| db_error("deleting meal", e))?;

        match deleted {
            None => {
                error!(meal_id, "meal not found");
                Err(CatalogError::NotFound(format!("ID {meal_id}")))
            }
            Some(true) => {
                error!(meal_id, "meal already deleted");
                Err(CatalogError::AlreadyDeleted(format!("ID {meal_id}")))
            }
            Some(false) => {
                sqlx::query("UPDATE meals SET deleted = TRUE WHERE id = ?1")
                    .bind(meal_id)
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| db_error("deleting meal", e))?;
                tx.commit().await.map_err(|e| db_error("deleting meal", e))?;

                info!(meal_id, "meal marked as deleted");
                Ok(())
            }
        }
    }

    /// Fetches a meal by its ID. Soft-deleted rows look exactly like absent
    /// ones to callers.
    pub async fn get_meal_by_id(&self, meal_id: i64) -> Result<Meal, CatalogError> {
        let row = sqlx::query(
            "SELECT id, meal, cuisine, price, difficulty, battles, wins, deleted, created_at \
             FROM meals WHERE id = ?1",
        )
        .bind(meal_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("fetching meal by ID", e))?;

        match row {
            Some(row) => {
                let meal = meal_from_row(&row)?;
                if meal.deleted {
                    error!(meal_id, "meal has been deleted");
                    return Err(CatalogError::NotFound(format!("ID {meal_id}")));
                }
                info!(meal_id, meal = %meal.name, "meal retrieved");
                Ok(meal)
            }
            None => {
                error!(meal_id, "meal not found");
                Err(CatalogError::NotFound(format!("ID {meal_id}")))
            }
        }
    }

    /// Fetches a meal by its unique name. Same visibility rules as
    /// [`MealRepository::get_meal_by_id`].
    pub async fn get_meal_by_name(&self, name: &str) -> Result<Meal, CatalogError> {
        let row = sqlx::query(
            "SELECT id, meal, cuisine, price, difficulty, battles, wins, deleted, created_at \
             FROM meals WHERE meal = ?1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("fetching meal by name", e))?;

        match row {
            Some(row) => {
                let meal = meal_from_row(&row)?;
                if meal.deleted {
                    error!(meal = name, "meal has been deleted");
                    return Err(CatalogError::NotFound(format!("name '{name}'")));
                }
                info!(meal = name, "meal retrieved");
                Ok(meal)
            }
            None => {
                error!(meal = name, "meal not found");
                Err(CatalogError::NotFound(format!("name '{name}'")))
            }
        }
    }

    /// Returns every non-deleted meal that has fought at least once, ranked
    /// descending by the requested key.
    ///
    /// `win_pct` is `100 * wins / battles` rounded to one decimal place.
    /// Tie order among equal keys is whatever SQLite picks.
    pub async fn leaderboard(
        &self,
        sort: LeaderboardSort,
    ) -> Result<Vec<LeaderboardEntry>, CatalogError> {
        let order_by = match sort {
            LeaderboardSort::Wins => "wins DESC",
            LeaderboardSort::WinPct => "win_pct DESC",
        };
        let query = format!(
            "SELECT id, meal, cuisine, price, difficulty, battles, wins, \
                    (wins * 1.0 / battles) AS win_pct \
             FROM meals WHERE deleted = FALSE AND battles > 0 ORDER BY {order_by}"
        );

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("retrieving leaderboard", e))?;

        let entries = rows
            .iter()
            .map(leaderboard_entry_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        info!(entries = entries.len(), sort = %sort, "leaderboard retrieved");
        Ok(entries)
    }

    /// Records a battle result: a win bumps `battles` and `wins` together,
    /// a loss bumps `battles` only. Runs as one transaction so the deleted
    /// check and the increment cannot be interleaved.
    pub async fn update_meal_stats(
        &self,
        meal_id: i64,
        outcome: BattleOutcome,
    ) -> Result<(), CatalogError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("updating meal stats", e))?;

        let deleted: Option<bool> = sqlx::query_scalar("SELECT deleted FROM meals WHERE id = ?1")
            .bind(meal_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| db_error("updating meal stats", e))?;

        match deleted {
            None => {
                error!(meal_id, "meal not found");
                return Err(CatalogError::NotFound(format!("ID {meal_id}")));
            }
            Some(true) => {
                error!(meal_id, "meal has been deleted");
                return Err(CatalogError::AlreadyDeleted(format!("ID {meal_id}")));
            }
            Some(false) => {}
        }

        let statement = match outcome {
            BattleOutcome::Win => "UPDATE meals SET battles = battles + 1, wins = wins + 1 WHERE id = ?1",
            BattleOutcome::Loss => "UPDATE meals SET battles = battles + 1 WHERE id = ?1",
        };
        sqlx::query(statement)
            .bind(meal_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("updating meal stats", e))?;
        tx.commit()
            .await
            .map_err(|e| db_error("updating meal stats", e))?;

        info!(meal_id, outcome = %outcome, "meal stats updated");
        Ok(())
    }
}

/// Logs a driver failure once at the point of detection and wraps it.
fn db_error(context: &str, err: sqlx::Error) -> CatalogError {
    error!(error = %err, "database error while {}", context);
    CatalogError::DatabaseError(err)
}

/// Maps a full `meals` row into the domain type, re-checking the row-level
/// invariants on the way out of the store.
fn meal_from_row(row: &SqliteRow) -> Result<Meal, CatalogError> {
    let difficulty: String = row.try_get("difficulty")?;
    let difficulty = Difficulty::from_str(&difficulty)?;

    let meal = Meal::new(
        row.try_get("id")?,
        row.try_get::<String, _>("meal")?,
        row.try_get::<String, _>("cuisine")?,
        row.try_get("price")?,
        difficulty,
        row.try_get("battles")?,
        row.try_get("wins")?,
        row.try_get("deleted")?,
        row.try_get("created_at")?,
    )?;
    Ok(meal)
}

fn leaderboard_entry_from_row(row: &SqliteRow) -> Result<LeaderboardEntry, CatalogError> {
    let difficulty: String = row.try_get("difficulty")?;
    let difficulty = Difficulty::from_str(&difficulty)?;
    let raw_pct: f64 = row.try_get("win_pct")?;

    Ok(LeaderboardEntry {
        id: row.try_get("id")?,
        name: row.try_get("meal")?,
        cuisine: row.try_get("cuisine")?,
        price: row.try_get("price")?,
        difficulty,
        battles: row.try_get("battles")?,
        wins: row.try_get("wins")?,
        // Convert the stored ratio to a percentage with one decimal place.
        win_pct: (raw_pct * 1000.0).round() / 10.0,
    })
}
