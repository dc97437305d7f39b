//! Uniform read views over the player, opponents and allies.
//!
//! Combat math never touches the owning structs; it reads a [`CombatantRef`]
//! built on demand. Log entries carry the smaller [`CombatantSnapshot`].

use serde::{Deserialize, Serialize};

use crate::state::{
    AllyPersonality, MeleeAlly, MeleeOpponent, MeleeState, OpponentType, Player,
};

/// Identifies a combatant within one encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "side", content = "index", rename_all = "snake_case")]
pub enum CombatantId {
    /// The player.
    Player,
    /// Slot in `MeleeState::opponents`.
    Opponent(usize),
    /// Slot in `MeleeState::allies`.
    Ally(usize),
}

impl std::fmt::Display for CombatantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Player => write!(f, "player"),
            Self::Opponent(i) => write!(f, "opponent #{i}"),
            Self::Ally(i) => write!(f, "ally #{i}"),
        }
    }
}

/// Which sort of combatant a view was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatantKind {
    /// The player.
    Player,
    /// An enemy of the given grade.
    Opponent(OpponentType),
    /// An ally of the given temperament.
    Ally(AllyPersonality),
}

/// Read-only projection of a combatant's fighting state.
#[derive(Debug, Clone, PartialEq)]
pub struct CombatantRef {
    /// Display name.
    pub name: String,
    /// Current health.
    pub health: i32,
    /// Maximum health.
    pub max_health: i32,
    /// Current stamina.
    pub stamina: i32,
    /// Maximum stamina.
    pub max_stamina: i32,
    /// Current fatigue.
    pub fatigue: i32,
    /// Maximum fatigue.
    pub max_fatigue: i32,
    /// Current morale.
    pub morale: i32,
    /// Maximum morale.
    pub max_morale: i32,
    /// Physical strength.
    pub strength: i32,
    /// Fighting spirit.
    pub elan: i32,
    /// Marksmanship.
    pub musketry: i32,
    /// Source kind.
    pub kind: CombatantKind,
    /// Stunned this turn.
    pub stunned: bool,
    /// Remaining stunned turns.
    pub stun_turns: u32,
    /// Injured arm.
    pub arm_injured: bool,
    /// Injured leg.
    pub leg_injured: bool,
}

/// NPCs do not track morale; they read as steady.
const NPC_MORALE: i32 = 100;

impl CombatantRef {
    /// View of the player, with status flags read from the melee state.
    pub fn from_player(player: &Player, melee: &MeleeState) -> Self {
        let status = &melee.player;
        Self {
            name: player.name.clone(),
            health: player.health.current,
            max_health: player.health.max,
            stamina: player.stamina.current,
            max_stamina: player.stamina.max,
            fatigue: player.fatigue.current,
            max_fatigue: player.fatigue.max,
            morale: player.morale.current,
            max_morale: player.morale.max,
            strength: player.strength,
            elan: player.elan,
            musketry: player.musketry,
            kind: CombatantKind::Player,
            stunned: status.stun_turns > 0,
            stun_turns: status.stun_turns,
            arm_injured: status.wounds.arm,
            leg_injured: status.wounds.leg,
        }
    }

    /// View of an opponent.
    pub fn from_opponent(opponent: &MeleeOpponent) -> Self {
        Self {
            name: opponent.name.clone(),
            health: opponent.health.current,
            max_health: opponent.health.max,
            stamina: opponent.stamina.current,
            max_stamina: opponent.stamina.max,
            fatigue: opponent.fatigue.current,
            max_fatigue: opponent.fatigue.max,
            morale: NPC_MORALE,
            max_morale: NPC_MORALE,
            strength: opponent.strength,
            elan: opponent.kind.elan(),
            musketry: opponent.kind.elan(),
            kind: CombatantKind::Opponent(opponent.kind),
            stunned: opponent.is_stunned(),
            stun_turns: opponent.stun_turns,
            arm_injured: opponent.wounds.arm,
            leg_injured: opponent.wounds.leg,
        }
    }

    /// View of an ally.
    pub fn from_ally(ally: &MeleeAlly) -> Self {
        Self {
            name: ally.name.clone(),
            health: ally.health.current,
            max_health: ally.health.max,
            stamina: ally.stamina.current,
            max_stamina: ally.stamina.max,
            fatigue: ally.fatigue.current,
            max_fatigue: ally.fatigue.max,
            morale: NPC_MORALE,
            max_morale: NPC_MORALE,
            strength: ally.strength,
            elan: ally.elan,
            musketry: ally.elan,
            kind: CombatantKind::Ally(ally.personality),
            stunned: ally.is_stunned(),
            stun_turns: ally.stun_turns,
            arm_injured: ally.wounds.arm,
            leg_injured: ally.wounds.leg,
        }
    }

    /// Health fraction in `0.0..=1.0`.
    pub fn health_fraction(&self) -> f64 {
        if self.max_health <= 0 {
            return 0.0;
        }
        self.health.max(0) as f64 / self.max_health as f64
    }

    /// Stamina fraction in `0.0..=1.0`.
    pub fn stamina_fraction(&self) -> f64 {
        if self.max_stamina <= 0 {
            return 1.0;
        }
        self.stamina.max(0) as f64 / self.max_stamina as f64
    }

    /// Morale fraction in `0.0..=1.0`.
    pub fn morale_fraction(&self) -> f64 {
        if self.max_morale <= 0 {
            return 1.0;
        }
        self.morale.max(0) as f64 / self.max_morale as f64
    }
}

/// Post-action state of a combatant, recorded in log entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatantSnapshot {
    /// Who this is.
    pub id: CombatantId,
    /// Display name.
    pub name: String,
    /// Health after the action.
    pub health: i32,
    /// Maximum health.
    pub max_health: i32,
    /// Stamina after the action.
    pub stamina: i32,
    /// Maximum stamina.
    pub max_stamina: i32,
    /// Stunned after the action.
    pub stunned: bool,
    /// Still in the fight.
    pub fighting: bool,
}

impl CombatantSnapshot {
    /// Snapshot of the player.
    pub fn of_player(player: &Player, melee: &MeleeState) -> Self {
        Self {
            id: CombatantId::Player,
            name: player.name.clone(),
            health: player.health.current,
            max_health: player.health.max,
            stamina: player.stamina.current,
            max_stamina: player.stamina.max,
            stunned: melee.player.stun_turns > 0,
            fighting: !player.health.is_empty(),
        }
    }

    /// Snapshot of an opponent.
    pub fn of_opponent(index: usize, opponent: &MeleeOpponent) -> Self {
        Self {
            id: CombatantId::Opponent(index),
            name: opponent.name.clone(),
            health: opponent.health.current,
            max_health: opponent.health.max,
            stamina: opponent.stamina.current,
            max_stamina: opponent.stamina.max,
            stunned: opponent.is_stunned(),
            fighting: !opponent.is_defeated(),
        }
    }

    /// Snapshot of an ally.
    pub fn of_ally(index: usize, ally: &MeleeAlly) -> Self {
        Self {
            id: CombatantId::Ally(index),
            name: ally.name.clone(),
            health: ally.health.current,
            max_health: ally.health.max,
            stamina: ally.stamina.current,
            max_stamina: ally.stamina.max,
            stunned: ally.is_stunned(),
            fighting: ally.is_active(),
        }
    }
}

impl std::fmt::Display for CombatantSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (hp {}/{}, st {}/{}{})",
            self.name,
            self.health,
            self.max_health,
            self.stamina,
            self.max_stamina,
            if self.stunned { ", stunned" } else { "" }
        )
    }
}
