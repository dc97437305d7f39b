//! The encounter root.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::ai::MeleeHistory;
use crate::catalog::Stance;
use crate::error::{MeleeError, MeleeResult};
use crate::log::LogEntry;

use super::Wounds;
use super::ally::MeleeAlly;
use super::opponent::MeleeOpponent;
use super::wave::WaveEvent;

/// Terminal result of an encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeleeOutcome {
    /// Every opponent defeated and the pool empty.
    Victory,
    /// The player fell.
    Defeat,
    /// The player held out long enough under the survival rule.
    Survived,
}

impl std::fmt::Display for MeleeOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Victory => write!(f, "victory"),
            Self::Defeat => write!(f, "defeat"),
            Self::Survived => write!(f, "survived"),
        }
    }
}

/// The player's in-melee status flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStatus {
    /// Current posture.
    pub stance: Stance,
    /// Guard raised this round.
    pub guarding: bool,
    /// Remaining stunned turns.
    pub stun_turns: u32,
    /// Limb injuries.
    pub wounds: Wounds,
    /// Next attack is a riposte after a clean block.
    pub riposte: bool,
    /// Consecutive reload steps taken.
    pub reload_progress: u8,
}

/// Mutable state of one melee encounter.
///
/// Invariants: `active_enemies.len() <= max_active_enemies`; every index in
/// `active_enemies` and `enemy_pool` is unique and addresses `opponents`;
/// `processed_waves` only grows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeleeState {
    /// Full roster. Never shrinks, so indices stay valid.
    pub opponents: Vec<MeleeOpponent>,
    /// Allies that have joined.
    pub allies: Vec<MeleeAlly>,
    /// Presentation pointer for the UI. Never used for targeting.
    pub current_opponent: usize,
    /// Strikes exchanged so far.
    pub exchange_count: u32,
    /// Opponents defeated so far.
    pub kill_count: u32,
    /// Rounds resolved so far.
    pub round_number: u32,
    /// Opponents currently engaged.
    pub active_enemies: Vec<usize>,
    /// Opponents waiting to engage, in arrival order.
    pub enemy_pool: Vec<usize>,
    /// Cap on simultaneously engaged opponents.
    pub max_active_enemies: usize,
    /// Scripted events.
    pub wave_events: Vec<WaveEvent>,
    /// Indices of events already consumed.
    pub processed_waves: BTreeSet<usize>,
    /// Player status flags.
    pub player: PlayerStatus,
    /// Entries from the most recent round.
    pub round_log: Vec<LogEntry>,
    /// Recent actions for AI variety and feint bonuses.
    #[serde(default)]
    pub history: MeleeHistory,
    /// Set once the encounter is over.
    #[serde(default)]
    pub outcome: Option<MeleeOutcome>,
}

impl MeleeState {
    /// Build an encounter: the first `max_active` opponents engage, the rest
    /// wait in the pool in roster order.
    pub fn new(opponents: Vec<MeleeOpponent>, max_active: usize) -> Self {
        let split = max_active.min(opponents.len());
        let active_enemies: Vec<usize> = (0..split).collect();
        let enemy_pool: Vec<usize> = (split..opponents.len()).collect();
        Self {
            opponents,
            allies: Vec::new(),
            current_opponent: 0,
            exchange_count: 0,
            kill_count: 0,
            round_number: 0,
            active_enemies,
            enemy_pool,
            max_active_enemies: max_active,
            wave_events: Vec::new(),
            processed_waves: BTreeSet::new(),
            player: PlayerStatus::default(),
            round_log: Vec::new(),
            history: MeleeHistory::new(),
            outcome: None,
        }
    }

    /// Add allies present from the start.
    pub fn with_allies(mut self, allies: Vec<MeleeAlly>) -> Self {
        self.allies = allies;
        self
    }

    /// Attach a wave schedule.
    pub fn with_wave_events(mut self, events: Vec<WaveEvent>) -> Self {
        self.wave_events = events;
        self
    }

    /// Set the player's opening stance.
    pub fn with_stance(mut self, stance: Stance) -> Self {
        self.player.stance = stance;
        self
    }

    /// Active opponents still in the fight, in engagement order.
    pub fn live_enemy_indices(&self) -> Vec<usize> {
        self.active_enemies
            .iter()
            .copied()
            .filter(|&i| self.opponents.get(i).is_some_and(|o| !o.is_defeated()))
            .collect()
    }

    /// Allies still fighting.
    pub fn live_ally_indices(&self) -> Vec<usize> {
        self.allies
            .iter()
            .enumerate()
            .filter(|(_, a)| a.is_active())
            .map(|(i, _)| i)
            .collect()
    }

    /// Opponents not yet defeated, engaged or pooled.
    pub fn remaining_opponents(&self) -> usize {
        self.active_enemies
            .iter()
            .chain(self.enemy_pool.iter())
            .filter(|&&i| self.opponents.get(i).is_some_and(|o| !o.is_defeated()))
            .count()
    }

    /// Every opponent defeated and nobody left to arrive.
    pub fn all_defeated(&self) -> bool {
        self.remaining_opponents() == 0
    }

    /// Whether the encounter has ended.
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Check the roster bookkeeping: every engaged or pooled index names a
    /// real opponent and appears once across both lists, and no more
    /// opponents are engaged than the cap allows.
    pub fn validate(&self) -> MeleeResult<()> {
        let broken = |msg: String| Err(MeleeError::InconsistentEncounter(msg));
        if self.active_enemies.len() > self.max_active_enemies {
            return broken(format!(
                "{} opponents engaged but the cap is {}",
                self.active_enemies.len(),
                self.max_active_enemies
            ));
        }
        let mut seen = BTreeSet::new();
        for &index in self.active_enemies.iter().chain(&self.enemy_pool) {
            if index >= self.opponents.len() {
                return broken(format!(
                    "opponent index {index} out of range ({} in roster)",
                    self.opponents.len()
                ));
            }
            if !seen.insert(index) {
                return broken(format!("opponent index {index} listed twice"));
            }
        }
        Ok(())
    }

    /// Move the UI pointer to a live opponent if it points at a defeated one.
    pub fn refresh_current_opponent(&mut self) {
        let pointing_at_live = self
            .opponents
            .get(self.current_opponent)
            .is_some_and(|o| !o.is_defeated())
            && self.active_enemies.contains(&self.current_opponent);
        if !pointing_at_live {
            if let Some(&first) = self.live_enemy_indices().first() {
                self.current_opponent = first;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::opponent::OpponentType;

    fn roster(n: usize) -> Vec<MeleeOpponent> {
        (0..n)
            .map(|i| MeleeOpponent::new(format!("Soldier {i}"), OpponentType::Line, 80, 120, 50))
            .collect()
    }

    #[test]
    fn new_splits_active_and_pool() {
        let state = MeleeState::new(roster(5), 2);
        assert_eq!(state.active_enemies, vec![0, 1]);
        assert_eq!(state.enemy_pool, vec![2, 3, 4]);
        assert_eq!(state.remaining_opponents(), 5);
    }

    #[test]
    fn small_roster_has_empty_pool() {
        let state = MeleeState::new(roster(1), 3);
        assert_eq!(state.active_enemies, vec![0]);
        assert!(state.enemy_pool.is_empty());
    }

    #[test]
    fn live_indices_skip_defeated() {
        let mut state = MeleeState::new(roster(3), 3);
        state.opponents[1].health.set(0);
        assert_eq!(state.live_enemy_indices(), vec![0, 2]);
        assert_eq!(state.remaining_opponents(), 2);
        assert!(!state.all_defeated());
    }

    #[test]
    fn all_defeated_needs_empty_pool() {
        let mut state = MeleeState::new(roster(2), 1);
        state.opponents[0].health.set(0);
        assert!(!state.all_defeated());
        state.opponents[1].health.set(0);
        assert!(state.all_defeated());
    }

    #[test]
    fn fresh_state_is_consistent() {
        assert!(MeleeState::new(roster(5), 2).validate().is_ok());
        assert!(MeleeState::new(Vec::new(), 2).validate().is_ok());
    }

    #[test]
    fn duplicate_active_index_is_rejected() {
        let mut state = MeleeState::new(roster(1), 2);
        state.active_enemies = vec![0, 0];
        assert!(matches!(
            state.validate(),
            Err(MeleeError::InconsistentEncounter(msg)) if msg.contains("twice")
        ));
    }

    #[test]
    fn index_in_both_lists_is_rejected() {
        let mut state = MeleeState::new(roster(3), 2);
        state.enemy_pool.push(1);
        assert!(state.validate().is_err());
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let mut state = MeleeState::new(roster(2), 1);
        state.enemy_pool.push(9);
        assert!(matches!(
            state.validate(),
            Err(MeleeError::InconsistentEncounter(msg)) if msg.contains("out of range")
        ));
    }

    #[test]
    fn over_cap_is_rejected() {
        let mut state = MeleeState::new(roster(3), 1);
        state.active_enemies = vec![0, 1];
        state.enemy_pool = vec![2];
        assert!(state.validate().is_err());
    }

    #[test]
    fn ui_pointer_moves_off_the_dead() {
        let mut state = MeleeState::new(roster(2), 2);
        state.opponents[0].health.set(0);
        state.refresh_current_opponent();
        assert_eq!(state.current_opponent, 1);
    }
}
