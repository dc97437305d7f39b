use serde::{Deserialize, Serialize};

use crate::state::MeleeState;

/// Caller-level rule for ending an encounter early as a partial success.
///
/// The thresholds are balance values, not correctness invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurvivalRule {
    /// The player must be below this health.
    pub max_health: i32,
    /// The player must have scored at least this many kills.
    pub min_kills: u32,
}

impl Default for SurvivalRule {
    fn default() -> Self {
        Self {
            max_health: 25,
            min_kills: 2,
        }
    }
}

impl SurvivalRule {
    /// Whether the player may withdraw: alive, hurt, blooded, and with
    /// opponents still standing.
    pub fn applies(&self, player_health: i32, melee: &MeleeState) -> bool {
        player_health > 0
            && player_health < self.max_health
            && melee.kill_count >= self.min_kills
            && !melee.all_defeated()
    }
}

/// Configuration for resolving and driving an encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeleeConfig {
    /// RNG seed for the driver.
    pub seed: u64,
    /// Safety cap on rounds the driver will run.
    pub max_rounds: u32,
    /// Partial-success rule. `None` disables it.
    pub survival: Option<SurvivalRule>,
    /// Last-chance recoveries the driver may spend on a defeat.
    pub grace_charges: u32,
}

impl Default for MeleeConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_rounds: 40,
            survival: Some(SurvivalRule::default()),
            grace_charges: 0,
        }
    }
}

impl MeleeConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the round cap.
    pub fn with_max_rounds(mut self, rounds: u32) -> Self {
        self.max_rounds = rounds;
        self
    }

    /// Replace the survival rule (`None` disables it).
    pub fn with_survival(mut self, rule: Option<SurvivalRule>) -> Self {
        self.survival = rule;
        self
    }

    /// Set the number of grace recoveries.
    pub fn with_grace_charges(mut self, charges: u32) -> Self {
        self.grace_charges = charges;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{MeleeOpponent, OpponentType};

    #[test]
    fn config_default_values() {
        let config = MeleeConfig::default();
        assert_eq!(config.seed, 42);
        assert_eq!(config.max_rounds, 40);
        assert_eq!(config.survival, Some(SurvivalRule::default()));
        assert_eq!(config.grace_charges, 0);
    }

    #[test]
    fn config_builder_chain() {
        let config = MeleeConfig::default()
            .with_seed(7)
            .with_max_rounds(12)
            .with_survival(None)
            .with_grace_charges(1);
        assert_eq!(config.seed, 7);
        assert_eq!(config.max_rounds, 12);
        assert!(config.survival.is_none());
        assert_eq!(config.grace_charges, 1);
    }

    #[test]
    fn survival_needs_kills_low_health_and_enemies_left() {
        let rule = SurvivalRule::default();
        let mut melee = MeleeState::new(
            vec![
                MeleeOpponent::new("A", OpponentType::Line, 80, 100, 50),
                MeleeOpponent::new("B", OpponentType::Line, 80, 100, 50),
            ],
            2,
        );
        melee.kill_count = 2;
        assert!(rule.applies(20, &melee));
        assert!(!rule.applies(25, &melee));
        assert!(!rule.applies(0, &melee));
        melee.kill_count = 1;
        assert!(!rule.applies(20, &melee));
        melee.kill_count = 2;
        for o in &mut melee.opponents {
            o.health.set(0);
        }
        assert!(!rule.applies(20, &melee));
    }
}
