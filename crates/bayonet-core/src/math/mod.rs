//! Combat math: hit, block and damage formulas plus strike resolution.
//!
//! Everything here is pure apart from the random draws. Applying results to
//! the encounter is the round resolver's job.

pub mod damage;
pub mod hit;
pub mod strike;

pub use damage::{calc_damage, roll_status_effects};
pub use hit::{calc_block_chance, calc_enemy_hit_chance, calc_hit_chance, npc_base_hit_rate};
pub use strike::{Strike, StrikeAttacker, StrikeResult, resolve_strike};

use crate::catalog::{MeleeAction, Stance};
use crate::state::Wounds;

/// Stamina cost of an action after stance and leg-wound multipliers.
///
/// Only positive costs are scaled. NPCs pass `None` for stance.
pub fn stamina_cost(action: MeleeAction, stance: Option<Stance>, wounds: Wounds) -> i32 {
    let base = action.def().stamina;
    if base <= 0 {
        return base;
    }
    let stance_factor = stance.map_or(1.0, |s| s.def().stamina_cost);
    (base as f64 * stance_factor * wounds.stamina_cost_factor()).round() as i32
}

/// Stamina a respite restores given the resting combatant's fatigue.
pub fn respite_restore(fatigue: i32, max_fatigue: i32) -> i32 {
    let recovery = -MeleeAction::Respite.def().stamina;
    let fraction = if max_fatigue > 0 {
        (fatigue.max(0) as f64 / max_fatigue as f64).min(1.0)
    } else {
        0.0
    };
    (recovery as f64 * (1.0 - 0.5 * fraction)).round() as i32
}

/// Fatigue accrued from spending `cost` stamina.
pub fn fatigue_gain(cost: i32) -> i32 {
    if cost > 0 { cost / 2 } else { 0 }
}
