//! Encounter driver: runs rounds until the fight ends.
//!
//! The driver plays the caller's part. It picks the player's intent through
//! a [`PlayerPolicy`] and spends grace charges when the player falls.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::catalog::{BodyPart, MeleeAction, Stance};
use crate::config::MeleeConfig;
use crate::error::MeleeResult;
use crate::log::LogEntry;
use crate::random::RandomSource;
use crate::round::{AllyDeath, PlayerIntent, resolve_melee_round};
use crate::state::{BattleState, MeleeOutcome, NpcRoster};

/// Chooses the player's intent each round.
pub trait PlayerPolicy {
    /// Decide what the player does this round.
    fn choose(&mut self, battle: &BattleState, rng: &mut dyn RandomSource) -> PlayerIntent;
}

/// A simple heuristic fighter.
///
/// Rests when winded, fires a loaded musket, takes ripostes, finishes off
/// weakened opponents with a lunge and otherwise thrusts at the torso. In a
/// defensive stance it guards some of the time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoPolicy {
    /// Stance the policy fights in.
    pub stance: Stance,
}

impl Default for AutoPolicy {
    fn default() -> Self {
        Self {
            stance: Stance::Balanced,
        }
    }
}

impl AutoPolicy {
    /// A policy fighting in `stance`.
    pub fn new(stance: Stance) -> Self {
        Self { stance }
    }
}

/// Stamina fraction below which the policy rests.
const REST_BELOW: f64 = 0.2;
/// Opponent health fraction below which the policy lunges to finish.
const FINISH_BELOW: f64 = 0.35;
/// How often a defensive policy guards.
const DEFENSIVE_GUARD: f64 = 0.3;

impl PlayerPolicy for AutoPolicy {
    fn choose(&mut self, battle: &BattleState, rng: &mut dyn RandomSource) -> PlayerIntent {
        let melee = &battle.melee;
        let live = melee.live_enemy_indices();
        let target = live.iter().copied().min_by(|&a, &b| {
            melee.opponents[a]
                .health
                .fraction()
                .total_cmp(&melee.opponents[b].health.fraction())
        });

        let action = if battle.player.stamina.fraction() < REST_BELOW {
            MeleeAction::Respite
        } else if battle.player.musket_loaded {
            MeleeAction::Shoot
        } else if melee.player.riposte {
            MeleeAction::BayonetThrust
        } else if self.stance == Stance::Defensive && rng.chance(DEFENSIVE_GUARD) {
            MeleeAction::Guard
        } else if target.is_some_and(|t| melee.opponents[t].health.fraction() < FINISH_BELOW)
            || self.stance == Stance::Aggressive
        {
            MeleeAction::AggressiveLunge
        } else {
            MeleeAction::BayonetThrust
        };

        let mut intent = PlayerIntent::new(action, BodyPart::Torso).with_stance(self.stance);
        intent.target = target;
        intent
    }
}

/// Summary of a driven encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterReport {
    /// Rounds resolved.
    pub rounds: u32,
    /// How it ended. `None` if the round cap ran out first.
    pub outcome: Option<MeleeOutcome>,
    /// Opponents defeated.
    pub kill_count: u32,
    /// Player health at the end.
    pub player_health: i32,
    /// Net morale change.
    pub morale_total: i32,
    /// Allies lost.
    pub ally_deaths: Vec<AllyDeath>,
    /// Grace charges spent.
    pub graces_used: u32,
    /// Every log entry, in order.
    pub log: Vec<LogEntry>,
}

/// Run an encounter with a `StdRng` seeded from the config.
pub fn run_encounter(
    battle: &mut BattleState,
    policy: &mut dyn PlayerPolicy,
    npcs: &NpcRoster,
    config: &MeleeConfig,
) -> MeleeResult<EncounterReport> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    run_encounter_with(battle, policy, npcs, config, &mut rng)
}

/// Run an encounter against an explicit random source.
pub fn run_encounter_with(
    battle: &mut BattleState,
    policy: &mut dyn PlayerPolicy,
    npcs: &NpcRoster,
    config: &MeleeConfig,
    rng: &mut dyn RandomSource,
) -> MeleeResult<EncounterReport> {
    let mut report = EncounterReport {
        rounds: 0,
        outcome: None,
        kill_count: 0,
        player_health: battle.player.health.current,
        morale_total: 0,
        ally_deaths: Vec::new(),
        graces_used: 0,
        log: Vec::new(),
    };

    while report.rounds < config.max_rounds {
        let intent = policy.choose(battle, rng);
        let result = resolve_melee_round(battle, &intent, npcs, config, rng)?;
        report.rounds += 1;
        report.morale_total += result.morale_total();
        report.ally_deaths.extend(result.ally_deaths);
        report.log.extend(result.log);

        match result.outcome {
            Some(MeleeOutcome::Defeat) if report.graces_used < config.grace_charges => {
                report.graces_used += 1;
                grant_grace(battle);
                tracing::info!(round = result.round, "grace spent, the player fights on");
            }
            Some(outcome) => {
                report.outcome = Some(outcome);
                break;
            }
            None => {}
        }
    }

    report.kill_count = battle.melee.kill_count;
    report.player_health = battle.player.health.current;
    tracing::info!(
        rounds = report.rounds,
        outcome = ?report.outcome,
        kills = report.kill_count,
        "encounter finished"
    );
    Ok(report)
}

/// Last-chance recovery: half health, stun cleared, fight reopened.
fn grant_grace(battle: &mut BattleState) {
    let half = (battle.player.health.max / 2).max(1);
    battle.player.health.set(half);
    battle.melee.player.stun_turns = 0;
    battle.melee.outcome = None;
}
