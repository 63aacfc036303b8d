use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// How demanding a meal is to prepare. Stored in the catalog as the
/// uppercase label (`LOW`, `MED`, `HIGH`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Low,
    Med,
    High,
}

impl Difficulty {
    /// Returns the canonical label used in the database column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Low => "LOW",
            Difficulty::Med => "MED",
            Difficulty::High => "HIGH",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOW" => Ok(Difficulty::Low),
            "MED" => Ok(Difficulty::Med),
            "HIGH" => Ok(Difficulty::High),
            other => Err(CoreError::InvalidInput(
                "difficulty".to_string(),
                format!("{other} (must be LOW, MED, or HIGH)"),
            )),
        }
    }
}

/// The result of a battle from a single meal's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BattleOutcome {
    Win,
    Loss,
}

impl BattleOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            BattleOutcome::Win => "win",
            BattleOutcome::Loss => "loss",
        }
    }
}

impl fmt::Display for BattleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BattleOutcome {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "win" => Ok(BattleOutcome::Win),
            "loss" => Ok(BattleOutcome::Loss),
            other => Err(CoreError::InvalidInput(
                "result".to_string(),
                format!("{other} (expected 'win' or 'loss')"),
            )),
        }
    }
}

/// The ranking key for the leaderboard query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaderboardSort {
    Wins,
    WinPct,
}

impl LeaderboardSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaderboardSort::Wins => "wins",
            LeaderboardSort::WinPct => "win_pct",
        }
    }
}

impl fmt::Display for LeaderboardSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeaderboardSort {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wins" => Ok(LeaderboardSort::Wins),
            "win_pct" => Ok(LeaderboardSort::WinPct),
            other => Err(CoreError::InvalidInput(
                "sort_by".to_string(),
                format!("{other} (expected 'wins' or 'win_pct')"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_round_trips_through_its_label() {
        for difficulty in [Difficulty::Low, Difficulty::Med, Difficulty::High] {
            assert_eq!(difficulty.as_str().parse::<Difficulty>().unwrap(), difficulty);
        }
    }

    #[test]
    fn difficulty_rejects_unknown_and_lowercase_labels() {
        assert!("EASY".parse::<Difficulty>().is_err());
        assert!("med".parse::<Difficulty>().is_err());
        assert!("".parse::<Difficulty>().is_err());
    }

    #[test]
    fn battle_outcome_rejects_draws() {
        assert_eq!("win".parse::<BattleOutcome>().unwrap(), BattleOutcome::Win);
        assert_eq!("loss".parse::<BattleOutcome>().unwrap(), BattleOutcome::Loss);

        let err = "draw".parse::<BattleOutcome>().unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(field, _) if field == "result"));
    }

    #[test]
    fn leaderboard_sort_rejects_unknown_keys() {
        assert_eq!("wins".parse::<LeaderboardSort>().unwrap(), LeaderboardSort::Wins);
        assert_eq!("win_pct".parse::<LeaderboardSort>().unwrap(), LeaderboardSort::WinPct);
        assert!("points".parse::<LeaderboardSort>().is_err());
    }
}
