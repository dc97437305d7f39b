//! Structured melee log.
//!
//! Entries are narrative-agnostic records; turning them into prose is a
//! front-end concern. `description` is a terse mechanical summary.

use serde::{Deserialize, Serialize};

use crate::catalog::{BodyPart, CombatantId, CombatantSnapshot, MeleeAction, Stance};

/// Which step of the round produced an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Wave events and backfill.
    Waves,
    /// The player's action.
    Player,
    /// Allies' actions.
    Allies,
    /// Enemies' actions.
    Enemies,
    /// End-of-round bookkeeping.
    Cleanup,
}

/// How a strike resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrikeOutcome {
    /// The hit roll failed.
    Missed,
    /// Landed on a guard and was fully blocked.
    Blocked,
    /// Landed through a failed block at reduced damage.
    BlockFailed,
    /// Landed cleanly.
    Hit,
}

impl StrikeOutcome {
    /// Whether damage was dealt.
    pub fn landed(self) -> bool {
        matches!(self, Self::Hit | Self::BlockFailed)
    }
}

/// A status effect a landed blow inflicted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusEffect {
    /// Head blow killed outright.
    InstantKill,
    /// Stunned for one turn.
    Stunned,
    /// Arm injured.
    ArmInjured,
    /// Leg injured.
    LegInjured,
}

/// One resolved strike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackRecord {
    /// Who struck.
    pub attacker: CombatantId,
    /// Who was struck at.
    pub defender: CombatantId,
    /// Move used.
    pub action: MeleeAction,
    /// Aimed body part.
    pub body_part: BodyPart,
    /// Probability the hit roll had to beat.
    pub hit_chance: f64,
    /// Resolution.
    pub outcome: StrikeOutcome,
    /// Damage dealt (0 unless landed).
    pub damage: i32,
    /// Free attack granted by the defender dropping their guard.
    pub free: bool,
    /// Effects inflicted.
    pub effects: Vec<StatusEffect>,
    /// Defender state afterwards.
    pub defender_after: CombatantSnapshot,
}

/// What happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogKind {
    /// A strike was resolved.
    Attack(AttackRecord),
    /// Guard raised.
    Guard {
        /// Who guarded.
        actor: CombatantId,
    },
    /// Stamina recovered.
    Respite {
        /// Who rested.
        actor: CombatantId,
        /// Stamina restored.
        restored: i32,
    },
    /// Reload step taken.
    Reload {
        /// Steps completed toward loading.
        progress: u8,
        /// Musket now loaded.
        loaded: bool,
    },
    /// Feint drained a target's stamina.
    Feint {
        /// Who feinted.
        actor: CombatantId,
        /// Who was feinted.
        target: CombatantId,
        /// Stamina drained.
        drained: i32,
    },
    /// A stunned combatant lost its action.
    StunnedTurn {
        /// Who was stunned.
        actor: CombatantId,
    },
    /// Player changed stance.
    StanceChanged {
        /// New stance.
        stance: Stance,
    },
    /// An opponent was killed or broke.
    OpponentDefeated {
        /// Roster slot.
        index: usize,
        /// Name.
        name: String,
        /// Broke and fled rather than died.
        routed: bool,
    },
    /// An ally fell.
    AllyFell {
        /// Ally slot.
        index: usize,
        /// Name.
        name: String,
    },
    /// The player fell.
    PlayerFell,
    /// A pooled opponent entered the fight.
    EnemyArrived {
        /// Roster slot.
        index: usize,
        /// Name.
        name: String,
    },
    /// An ally joined from a wave event.
    AllyJoined {
        /// Ally slot.
        index: usize,
        /// Name.
        name: String,
    },
    /// The active-enemy cap rose.
    MaxEnemiesRaised {
        /// New cap.
        max: usize,
    },
    /// A wave event was consumed without effect.
    WaveSkipped {
        /// Index in the wave schedule.
        event: usize,
        /// Why it did nothing.
        reason: String,
    },
}

/// A log record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Round the entry belongs to.
    pub round: u32,
    /// Step of the round.
    pub phase: Phase,
    /// What happened.
    pub kind: LogKind,
    /// Terse mechanical summary.
    pub description: String,
}

impl LogEntry {
    /// Create an entry.
    pub fn new(round: u32, phase: Phase, kind: LogKind, description: impl Into<String>) -> Self {
        Self {
            round,
            phase,
            kind,
            description: description.into(),
        }
    }

    /// The attack record, if this entry is a strike.
    pub fn attack(&self) -> Option<&AttackRecord> {
        match &self.kind {
            LogKind::Attack(record) => Some(record),
            _ => None,
        }
    }
}

/// Why morale moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoraleReason {
    /// An opponent was defeated.
    OpponentDefeated,
    /// An ally fell.
    AllyFell,
    /// The player took a heavy blow.
    HeavyHit,
    /// Reinforcements arrived.
    AllyJoined,
}

/// A morale delta applied to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoraleChange {
    /// Delta actually applied after clamping.
    pub amount: i32,
    /// Cause.
    pub reason: MoraleReason,
}

impl MoraleReason {
    /// Nominal delta for this cause.
    pub fn delta(self) -> i32 {
        match self {
            Self::OpponentDefeated => 8,
            Self::AllyFell => -10,
            Self::HeavyHit => -5,
            Self::AllyJoined => 5,
        }
    }
}

/// Player damage at or above which morale drops.
pub const HEAVY_HIT_DAMAGE: i32 = 20;

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> CombatantSnapshot {
        CombatantSnapshot {
            id: CombatantId::Opponent(0),
            name: "Fritz".into(),
            health: 60,
            max_health: 80,
            stamina: 70,
            max_stamina: 100,
            stunned: false,
            fighting: true,
        }
    }

    #[test]
    fn landed_outcomes() {
        assert!(StrikeOutcome::Hit.landed());
        assert!(StrikeOutcome::BlockFailed.landed());
        assert!(!StrikeOutcome::Blocked.landed());
        assert!(!StrikeOutcome::Missed.landed());
    }

    #[test]
    fn attack_accessor() {
        let record = AttackRecord {
            attacker: CombatantId::Player,
            defender: CombatantId::Opponent(0),
            action: MeleeAction::BayonetThrust,
            body_part: BodyPart::Torso,
            hit_chance: 0.5,
            outcome: StrikeOutcome::Hit,
            damage: 20,
            free: false,
            effects: Vec::new(),
            defender_after: snapshot(),
        };
        let entry = LogEntry::new(1, Phase::Player, LogKind::Attack(record), "thrust");
        assert_eq!(entry.attack().map(|a| a.damage), Some(20));
        let guard = LogEntry::new(
            1,
            Phase::Player,
            LogKind::Guard {
                actor: CombatantId::Player,
            },
            "guard",
        );
        assert!(guard.attack().is_none());
    }

    #[test]
    fn morale_deltas_have_expected_signs() {
        assert!(MoraleReason::OpponentDefeated.delta() > 0);
        assert!(MoraleReason::AllyJoined.delta() > 0);
        assert!(MoraleReason::AllyFell.delta() < 0);
        assert!(MoraleReason::HeavyHit.delta() < 0);
    }

    #[test]
    fn entry_serializes_with_tag() {
        let entry = LogEntry::new(2, Phase::Waves, LogKind::MaxEnemiesRaised { max: 3 }, "");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["kind"]["type"], "max_enemies_raised");
        assert_eq!(json["phase"], "waves");
    }
}
