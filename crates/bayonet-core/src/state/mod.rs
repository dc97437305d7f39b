//! Encounter state: the player, the melee roster, and the wave script.
//!
//! `BattleState` is the unit the surrounding save system persists; every
//! type here round-trips through serde without a core-specific format.

pub mod ally;
pub mod melee;
pub mod opponent;
pub mod wave;

pub use ally::{AllyPersonality, AllyTemplate, MeleeAlly};
pub use melee::{MeleeOutcome, MeleeState, PlayerStatus};
pub use opponent::{MeleeOpponent, OpponentType};
pub use wave::{NpcRef, NpcRoster, WaveEvent, WaveEventKind};

use serde::{Deserialize, Serialize};

use crate::error::MeleeResult;
use crate::vital::Vital;

/// Limb injuries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wounds {
    /// Injured arm: strikes suffer.
    pub arm: bool,
    /// Injured leg: stamina costs rise by half.
    pub leg: bool,
}

impl Wounds {
    /// Multiplier on positive stamina costs.
    pub fn stamina_cost_factor(&self) -> f64 {
        if self.leg { 1.5 } else { 1.0 }
    }
}

/// The player as the melee core sees them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Display name.
    pub name: String,
    /// Hit points.
    pub health: Vital,
    /// Stamina pool.
    pub stamina: Vital,
    /// Accumulated fatigue.
    pub fatigue: Vital,
    /// Morale.
    pub morale: Vital,
    /// Physical strength.
    pub strength: i32,
    /// Fighting spirit (melee skill).
    pub elan: i32,
    /// Marksmanship.
    pub musketry: i32,
    /// Musket ready to fire.
    pub musket_loaded: bool,
}

impl Player {
    /// A rested private with middling stats.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            health: Vital::full(100),
            stamina: Vital::full(200),
            fatigue: Vital::empty(400),
            morale: Vital::full(100),
            strength: 50,
            elan: 35,
            musketry: 35,
            musket_loaded: true,
        }
    }

    /// Override strength, elan and musketry.
    pub fn with_stats(mut self, strength: i32, elan: i32, musketry: i32) -> Self {
        self.strength = strength;
        self.elan = elan;
        self.musketry = musketry;
        self
    }

    /// Whether the player can still fight.
    pub fn is_alive(&self) -> bool {
        !self.health.is_empty()
    }
}

/// The state handed to the melee core by the battle session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleState {
    /// The player.
    pub player: Player,
    /// The melee encounter.
    pub melee: MeleeState,
}

impl BattleState {
    /// Pair a player with an encounter.
    pub fn new(player: Player, melee: MeleeState) -> Self {
        Self { player, melee }
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> MeleeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON, rejecting inconsistent roster bookkeeping.
    pub fn from_json(json: &str) -> MeleeResult<Self> {
        let battle: Self = serde_json::from_str(json)?;
        battle.melee.validate()?;
        Ok(battle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MeleeError;

    #[test]
    fn leg_wound_raises_costs() {
        let w = Wounds {
            arm: false,
            leg: true,
        };
        assert!((w.stamina_cost_factor() - 1.5).abs() < f64::EPSILON);
        assert!((Wounds::default().stamina_cost_factor() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn battle_state_json_roundtrip() {
        let opponents = vec![
            MeleeOpponent::new("Fritz", OpponentType::Line, 80, 120, 50),
            MeleeOpponent::new("Otto", OpponentType::Conscript, 70, 100, 40),
        ];
        let battle = BattleState::new(Player::new("Lefebvre"), MeleeState::new(opponents, 1));
        let json = battle.to_json().unwrap();
        let back = BattleState::from_json(&json).unwrap();
        assert_eq!(back.melee.opponents.len(), 2);
        assert_eq!(back.melee.active_enemies, vec![0]);
        assert_eq!(back.melee.enemy_pool, vec![1]);
        assert_eq!(back.player.name, "Lefebvre");
    }

    #[test]
    fn duplicate_engaged_opponent_is_refused_on_load() {
        let opponents = vec![MeleeOpponent::new("Fritz", OpponentType::Line, 80, 120, 50)];
        let mut battle = BattleState::new(Player::new("Lefebvre"), MeleeState::new(opponents, 2));
        battle.melee.active_enemies = vec![0, 0];
        let json = battle.to_json().unwrap();
        assert!(matches!(
            BattleState::from_json(&json),
            Err(MeleeError::InconsistentEncounter(_))
        ));
    }

    #[test]
    fn unknown_pooled_opponent_is_refused_on_load() {
        let opponents = vec![MeleeOpponent::new("Fritz", OpponentType::Line, 80, 120, 50)];
        let mut battle = BattleState::new(Player::new("Lefebvre"), MeleeState::new(opponents, 1));
        battle.melee.enemy_pool = vec![3];
        let json = battle.to_json().unwrap();
        assert!(matches!(
            BattleState::from_json(&json),
            Err(MeleeError::InconsistentEncounter(_))
        ));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(BattleState::from_json("{not json").is_err());
    }
}
