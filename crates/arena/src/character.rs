use serde::{Deserialize, Serialize};

/// Every blow lands for at least this much, regardless of defense.
pub const MIN_DAMAGE: i64 = 1;

/// A combatant in a single battle. Built fresh per invocation; nothing here
/// is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub health: i64,
    pub attack: i64,
    pub defense: i64,
}

impl Character {
    pub fn new(name: impl Into<String>, health: i64, attack: i64, defense: i64) -> Self {
        Character {
            name: name.into(),
            health,
            attack,
            defense,
        }
    }

    /// Strikes the target and returns the damage dealt:
    /// `max(attack - target.defense, MIN_DAMAGE)`. The target's health drops
    /// by the same amount as an observable side effect.
    pub fn attack_target(&self, target: &mut Character) -> i64 {
        let damage = (self.attack - target.defense).max(MIN_DAMAGE);
        target.defend(damage);
        damage
    }

    /// Absorbs a hit. Health is floored at zero.
    pub fn defend(&mut self, damage: i64) {
        self.health = (self.health - damage).max(0);
    }

    /// A character at zero health is out of the fight.
    pub fn is_down(&self) -> bool {
        self.health == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attack_deals_attack_minus_defense() {
        let knight = Character::new("Knight", 100, 15, 10);
        let mut orc = Character::new("Orc", 120, 12, 8);

        let damage = knight.attack_target(&mut orc);
        assert_eq!(damage, 7);
        assert_eq!(orc.health, 113);
    }

    #[test]
    fn attack_always_lands_for_at_least_the_floor() {
        let peasant = Character::new("Peasant", 50, 3, 0);
        let mut golem = Character::new("Golem", 80, 10, 40);

        let damage = peasant.attack_target(&mut golem);
        assert_eq!(damage, MIN_DAMAGE);
        assert_eq!(golem.health, 80 - MIN_DAMAGE);
    }

    #[test]
    fn health_never_goes_negative() {
        let mut orc = Character::new("Orc", 5, 12, 8);
        orc.defend(20);
        assert_eq!(orc.health, 0);
        assert!(orc.is_down());
    }
}
