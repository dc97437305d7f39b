//! Turn-based melee combat core for a Napoleonic war game.
//!
//! Resolves bayonet fights round by round: hit, block and damage math over a
//! static action catalog, NPC decision making for opponents and allies,
//! scripted reinforcement waves, and a round resolver that ties them
//! together in a fixed phase order. All randomness flows through an
//! injectable [`RandomSource`], so every encounter can be replayed.

pub mod ai;
pub mod catalog;
/// Configuration for resolving and driving an encounter.
pub mod config;
pub mod driver;
pub mod error;
pub mod log;
pub mod math;
pub mod presets;
pub mod random;
pub mod round;
pub mod state;
pub mod stats;
pub mod vital;
pub mod waves;

pub use ai::{MeleeHistory, choose_ally_ai, choose_enemy_target, choose_melee_ai};
pub use catalog::{BodyPart, CombatantId, MeleeAction, Stance};
pub use config::{MeleeConfig, SurvivalRule};
pub use driver::{AutoPolicy, EncounterReport, PlayerPolicy, run_encounter};
pub use error::{MeleeError, MeleeResult};
pub use log::{LogEntry, LogKind, MoraleChange, MoraleReason, Phase, StrikeOutcome};
pub use random::{RandomSource, ScriptedRandom};
pub use round::{AllyDeath, PlayerIntent, RoundResult, resolve_melee_round};
pub use state::{BattleState, MeleeOutcome, MeleeState, NpcRoster, Player};
pub use vital::Vital;
pub use waves::{backfill_enemies, is_opponent_defeated, process_wave_events};
