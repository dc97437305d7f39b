//! Resolution of a single strike against a possibly guarding defender.

use crate::catalog::{BodyPart, MeleeAction};
use crate::log::{StatusEffect, StrikeOutcome};
use crate::random::RandomSource;

use super::damage::{calc_damage, roll_status_effects};

/// Damage multiplier when a block fails.
pub const FAILED_BLOCK_FACTOR: f64 = 0.85;

/// Attacker inputs for a damage roll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrikeAttacker {
    /// Current stamina.
    pub stamina: i32,
    /// Maximum stamina.
    pub max_stamina: i32,
    /// Physical strength.
    pub strength: i32,
}

/// Everything known before the dice are rolled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strike {
    /// Move used.
    pub action: MeleeAction,
    /// Aimed body part.
    pub body_part: BodyPart,
    /// Probability of landing.
    pub hit_chance: f64,
    /// Block probability if the defender is guarding and may block.
    pub block_chance: Option<f64>,
    /// Extra multiplier on damage, `1.0` for ordinary strikes.
    pub damage_scale: f64,
    /// Attacker inputs for the damage roll.
    pub attacker: StrikeAttacker,
    /// Defender's current health, for instant kills.
    pub defender_health: i32,
}

/// The dice result of a strike. Nothing is applied yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrikeResult {
    /// How the strike resolved.
    pub outcome: StrikeOutcome,
    /// Damage to apply.
    pub damage: i32,
    /// Effects to apply.
    pub effects: Vec<StatusEffect>,
}

impl StrikeResult {
    fn without_damage(outcome: StrikeOutcome) -> Self {
        Self {
            outcome,
            damage: 0,
            effects: Vec::new(),
        }
    }
}

/// Roll a strike.
///
/// Draw order is fixed: hit roll, then block roll if the defender guards,
/// then the damage roll, then status effects. A clean block deals nothing;
/// a failed block deals 85%.
pub fn resolve_strike(strike: &Strike, rng: &mut dyn RandomSource) -> StrikeResult {
    if !rng.chance(strike.hit_chance) {
        return StrikeResult::without_damage(StrikeOutcome::Missed);
    }

    let mut outcome = StrikeOutcome::Hit;
    if let Some(block_chance) = strike.block_chance {
        if rng.chance(block_chance) {
            return StrikeResult::without_damage(StrikeOutcome::Blocked);
        }
        outcome = StrikeOutcome::BlockFailed;
    }

    let raw = calc_damage(
        strike.action,
        strike.body_part,
        strike.attacker.stamina,
        strike.attacker.max_stamina,
        strike.attacker.strength,
        rng,
    );
    let mut scale = strike.damage_scale;
    if outcome == StrikeOutcome::BlockFailed {
        scale *= FAILED_BLOCK_FACTOR;
    }
    let mut damage = if (scale - 1.0).abs() < f64::EPSILON {
        raw
    } else {
        ((raw as f64 * scale).round() as i32).max(1)
    };

    let effects = roll_status_effects(strike.action, strike.body_part, rng);
    if effects.contains(&StatusEffect::InstantKill) {
        damage = damage.max(strike.defender_health);
    }

    StrikeResult {
        outcome,
        damage,
        effects,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedRandom;

    fn strike(block: Option<f64>) -> Strike {
        Strike {
            action: MeleeAction::BayonetThrust,
            body_part: BodyPart::Torso,
            hit_chance: 0.6,
            block_chance: block,
            damage_scale: 1.0,
            attacker: StrikeAttacker {
                stamina: 100,
                max_stamina: 100,
                strength: 50,
            },
            defender_health: 80,
        }
    }

    #[test]
    fn miss_draws_once() {
        let mut rng = ScriptedRandom::constant(0.9);
        let result = resolve_strike(&strike(Some(0.5)), &mut rng);
        assert_eq!(result.outcome, StrikeOutcome::Missed);
        assert_eq!(result.damage, 0);
        assert_eq!(rng.draws(), 1);
    }

    #[test]
    fn clean_block_deals_nothing() {
        let mut rng = ScriptedRandom::new(vec![0.0, 0.1]);
        let result = resolve_strike(&strike(Some(0.5)), &mut rng);
        assert_eq!(result.outcome, StrikeOutcome::Blocked);
        assert_eq!(result.damage, 0);
        assert!(result.effects.is_empty());
    }

    #[test]
    fn failed_block_scales_the_unblocked_roll() {
        // hit, failed block, damage draw, no stun.
        let mut rng = ScriptedRandom::new(vec![0.0, 0.99, 0.5, 0.99]);
        let result = resolve_strike(&strike(Some(0.5)), &mut rng);
        assert_eq!(result.outcome, StrikeOutcome::BlockFailed);

        let mut unblocked = ScriptedRandom::constant(0.5);
        let raw = calc_damage(MeleeAction::BayonetThrust, BodyPart::Torso, 100, 100, 50, &mut unblocked);
        assert_eq!(result.damage, (raw as f64 * 0.85).round() as i32);
    }

    #[test]
    fn unguarded_defender_takes_full_blow() {
        let mut rng = ScriptedRandom::new(vec![0.0, 0.5, 0.99]);
        let result = resolve_strike(&strike(None), &mut rng);
        assert_eq!(result.outcome, StrikeOutcome::Hit);
        assert_eq!(result.damage, 20);
    }

    #[test]
    fn instant_kill_takes_remaining_health() {
        let mut s = strike(None);
        s.body_part = BodyPart::Head;
        s.defender_health = 95;
        let mut rng = ScriptedRandom::new(vec![0.0, 0.5, 0.0]);
        let result = resolve_strike(&s, &mut rng);
        assert!(result.effects.contains(&StatusEffect::InstantKill));
        assert_eq!(result.damage, 95);
    }

    #[test]
    fn scaled_free_attack() {
        let mut s = strike(None);
        s.damage_scale = 0.7;
        let mut rng = ScriptedRandom::new(vec![0.0, 0.5, 0.99]);
        let result = resolve_strike(&s, &mut rng);
        assert_eq!(result.damage, 14);
    }
}
