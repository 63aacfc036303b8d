use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::Difficulty;
use crate::error::CoreError;

/// A catalog entry for a single meal, as persisted in the `meals` table.
///
/// The struct can only be built through [`Meal::new`], which enforces the
/// row-level invariants (positive price, `wins <= battles`). A `Meal` value
/// therefore never represents a state the catalog would refuse to store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub id: i64,
    pub name: String,
    pub cuisine: String,
    pub price: f64,
    pub difficulty: Difficulty,
    pub battles: i64,
    pub wins: i64,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
}

impl Meal {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i64,
        name: impl Into<String>,
        cuisine: impl Into<String>,
        price: f64,
        difficulty: Difficulty,
        battles: i64,
        wins: i64,
        deleted: bool,
        created_at: DateTime<Utc>,
    ) -> Result<Self, CoreError> {
        if !price.is_finite() || price <= 0.0 {
            return Err(CoreError::InvalidInput(
                "price".to_string(),
                format!("{price} (must be a positive number)"),
            ));
        }
        if battles < 0 || wins < 0 || wins > battles {
            return Err(CoreError::InvalidInput(
                "stats".to_string(),
                format!("battles={battles}, wins={wins}"),
            ));
        }

        Ok(Meal {
            id,
            name: name.into(),
            cuisine: cuisine.into(),
            price,
            difficulty,
            battles,
            wins,
            deleted,
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meal(price: f64, battles: i64, wins: i64) -> Result<Meal, CoreError> {
        Meal::new(
            1,
            "Spaghetti",
            "Italian",
            price,
            Difficulty::Med,
            battles,
            wins,
            false,
            Utc::now(),
        )
    }

    #[test]
    fn accepts_a_valid_meal() {
        let meal = meal(20.0, 4, 3).unwrap();
        assert_eq!(meal.name, "Spaghetti");
        assert_eq!(meal.price, 20.0);
        assert!(!meal.deleted);
    }

    #[test]
    fn rejects_non_positive_prices() {
        assert!(meal(0.0, 0, 0).is_err());
        assert!(meal(-20.0, 0, 0).is_err());
        assert!(meal(f64::NAN, 0, 0).is_err());
    }

    #[test]
    fn rejects_more_wins_than_battles() {
        assert!(meal(20.0, 1, 2).is_err());
        assert!(meal(20.0, -1, 0).is_err());
    }
}
