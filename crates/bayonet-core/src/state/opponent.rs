//! Enemy combatants.

use serde::{Deserialize, Serialize};

use crate::vital::Vital;

use super::Wounds;

/// Soldier grade of an opponent: sets AI aggression and base hit rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpponentType {
    /// Green levy; may rout before being killed.
    Conscript,
    /// Line infantryman.
    Line,
    /// Seasoned soldier.
    Veteran,
    /// Non-commissioned officer.
    Sergeant,
}

impl OpponentType {
    /// Every opponent type, weakest first.
    pub const ALL: [OpponentType; 4] = [
        OpponentType::Conscript,
        OpponentType::Line,
        OpponentType::Veteran,
        OpponentType::Sergeant,
    ];

    /// Base chance to land a blow before modifiers.
    pub fn base_hit_rate(self) -> f64 {
        match self {
            Self::Conscript => 0.35,
            Self::Line => 0.45,
            Self::Veteran => 0.55,
            Self::Sergeant => 0.60,
        }
    }

    /// Health fraction at or below which this type breaks and is out of the
    /// fight. `None` means it fights to the death.
    pub fn break_threshold(self) -> Option<f64> {
        match self {
            Self::Conscript => Some(0.15),
            Self::Line => Some(0.10),
            Self::Veteran | Self::Sergeant => None,
        }
    }

    /// Elan used when this type blocks.
    pub fn elan(self) -> i32 {
        match self {
            Self::Conscript => 15,
            Self::Line => 30,
            Self::Veteran => 45,
            Self::Sergeant => 50,
        }
    }

    /// Parse a type name (case-insensitive).
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "conscript" => Some(Self::Conscript),
            "line" => Some(Self::Line),
            "veteran" => Some(Self::Veteran),
            "sergeant" => Some(Self::Sergeant),
            _ => None,
        }
    }
}

impl std::fmt::Display for OpponentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Conscript => write!(f, "conscript"),
            Self::Line => write!(f, "line"),
            Self::Veteran => write!(f, "veteran"),
            Self::Sergeant => write!(f, "sergeant"),
        }
    }
}

/// An enemy soldier in the encounter roster.
///
/// Stays in `MeleeState::opponents` for its whole life so indices remain
/// stable; defeat only removes it from targeting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeleeOpponent {
    /// Display name.
    pub name: String,
    /// Soldier grade.
    pub kind: OpponentType,
    /// Hit points.
    pub health: Vital,
    /// Stamina pool.
    pub stamina: Vital,
    /// Accumulated fatigue.
    pub fatigue: Vital,
    /// Physical strength (scales damage).
    pub strength: i32,
    /// Limb injuries.
    pub wounds: Wounds,
    /// Remaining stunned turns.
    pub stun_turns: u32,
    /// Guard raised on its last action.
    pub guarding: bool,
}

impl MeleeOpponent {
    /// A fresh opponent at full health and stamina.
    pub fn new(
        name: impl Into<String>,
        kind: OpponentType,
        max_health: i32,
        max_stamina: i32,
        strength: i32,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            health: Vital::full(max_health),
            stamina: Vital::full(max_stamina),
            fatigue: Vital::empty(max_stamina * 2),
            strength,
            wounds: Wounds::default(),
            stun_turns: 0,
            guarding: false,
        }
    }

    /// Whether a stun is in effect.
    pub fn is_stunned(&self) -> bool {
        self.stun_turns > 0
    }

    /// Dead, or broken at its type's threshold.
    ///
    /// This is the single defeat predicate used by targeting, backfill and
    /// victory checks.
    pub fn is_defeated(&self) -> bool {
        if self.health.is_empty() {
            return true;
        }
        match self.kind.break_threshold() {
            Some(threshold) => self.health.fraction() <= threshold,
            None => false,
        }
    }

    /// Defeated while still alive.
    pub fn is_routed(&self) -> bool {
        self.is_defeated() && !self.health.is_empty()
    }
}
