//! Damage rolls and status effects of landed blows.

use crate::catalog::{BodyPart, MeleeAction};
use crate::log::StatusEffect;
use crate::random::RandomSource;

/// Stamina fraction below which blows lose a quarter of their force.
pub const EXHAUSTION_THRESHOLD: f64 = 0.25;
/// Damage multiplier for an exhausted attacker.
pub const EXHAUSTION_FACTOR: f64 = 0.75;
/// Flat chance a head hit kills outright.
pub const INSTANT_KILL_CHANCE: f64 = 0.10;
/// Base chance a head hit stuns.
pub const HEAD_STUN_CHANCE: f64 = 0.35;
/// Chance an arm hit injures the arm.
pub const ARM_INJURY_CHANCE: f64 = 0.15;
/// Chance a leg hit injures the leg.
pub const LEG_INJURY_CHANCE: f64 = 0.10;

/// Damage of a landed blow, always at least 1.
///
/// Draws once from the body part's range, then scales by the action's
/// multiplier and `0.75 + strength/200`. Below a quarter stamina the blow
/// loses 25%.
pub fn calc_damage(
    action: MeleeAction,
    body_part: BodyPart,
    attacker_stamina: i32,
    attacker_max_stamina: i32,
    attacker_strength: i32,
    rng: &mut dyn RandomSource,
) -> i32 {
    let part = body_part.def();
    let base = rng.range_inclusive(part.damage_min, part.damage_max) as f64;
    let strength_factor = 0.75 + attacker_strength as f64 / 200.0;
    let mut damage = base * action.def().damage_mod * strength_factor;
    let stamina_fraction = if attacker_max_stamina > 0 {
        attacker_stamina.max(0) as f64 / attacker_max_stamina as f64
    } else {
        1.0
    };
    if stamina_fraction < EXHAUSTION_THRESHOLD {
        damage *= EXHAUSTION_FACTOR;
    }
    (damage.round() as i32).max(1)
}

/// Roll the side effects of a landed blow.
///
/// A head hit first rolls the instant kill; only if that fails does it roll
/// the stun. Elsewhere a stunning action (butt strike) rolls its own stun,
/// and arms and legs roll their injuries.
pub fn roll_status_effects(
    action: MeleeAction,
    body_part: BodyPart,
    rng: &mut dyn RandomSource,
) -> Vec<StatusEffect> {
    let stun_bonus = action.def().stun_bonus;
    let mut effects = Vec::new();
    match body_part {
        BodyPart::Head => {
            if rng.chance(INSTANT_KILL_CHANCE) {
                effects.push(StatusEffect::InstantKill);
            } else if rng.chance(HEAD_STUN_CHANCE + stun_bonus) {
                effects.push(StatusEffect::Stunned);
            }
        }
        BodyPart::Torso | BodyPart::Arms | BodyPart::Legs => {
            if stun_bonus > 0.0 && rng.chance(stun_bonus) {
                effects.push(StatusEffect::Stunned);
            }
            if body_part == BodyPart::Arms && rng.chance(ARM_INJURY_CHANCE) {
                effects.push(StatusEffect::ArmInjured);
            }
            if body_part == BodyPart::Legs && rng.chance(LEG_INJURY_CHANCE) {
                effects.push(StatusEffect::LegInjured);
            }
        }
    }
    effects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedRandom;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn torso_thrust_mid_roll() {
        // Range 15..=25, draw 0.5 -> 20; strength 50 -> x1.0.
        let mut rng = ScriptedRandom::constant(0.5);
        let dmg = calc_damage(MeleeAction::BayonetThrust, BodyPart::Torso, 100, 100, 50, &mut rng);
        assert_eq!(dmg, 20);
    }

    #[test]
    fn lunge_hits_harder() {
        let mut rng = ScriptedRandom::constant(0.5);
        let dmg = calc_damage(MeleeAction::AggressiveLunge, BodyPart::Torso, 100, 100, 50, &mut rng);
        assert_eq!(dmg, 30);
    }

    #[test]
    fn exhaustion_blunts() {
        let mut rng = ScriptedRandom::constant(0.5);
        let dmg = calc_damage(MeleeAction::BayonetThrust, BodyPart::Torso, 20, 100, 50, &mut rng);
        assert_eq!(dmg, 15);
    }

    #[test]
    fn head_instant_kill_skips_stun_roll() {
        let mut rng = ScriptedRandom::constant(0.0);
        let effects = roll_status_effects(MeleeAction::BayonetThrust, BodyPart::Head, &mut rng);
        assert_eq!(effects, vec![StatusEffect::InstantKill]);
        assert_eq!(rng.draws(), 1);
    }

    #[test]
    fn head_stun_when_no_kill() {
        let mut rng = ScriptedRandom::new(vec![0.5, 0.2]);
        let effects = roll_status_effects(MeleeAction::BayonetThrust, BodyPart::Head, &mut rng);
        assert_eq!(effects, vec![StatusEffect::Stunned]);
    }

    #[test]
    fn butt_strike_stuns_off_the_head() {
        let mut rng = ScriptedRandom::constant(0.1);
        let effects = roll_status_effects(MeleeAction::ButtStrike, BodyPart::Torso, &mut rng);
        assert_eq!(effects, vec![StatusEffect::Stunned]);
        let mut rng = ScriptedRandom::constant(0.1);
        let effects = roll_status_effects(MeleeAction::BayonetThrust, BodyPart::Torso, &mut rng);
        assert!(effects.is_empty());
    }

    #[test]
    fn limb_injuries() {
        let mut rng = ScriptedRandom::constant(0.05);
        assert_eq!(
            roll_status_effects(MeleeAction::BayonetThrust, BodyPart::Arms, &mut rng),
            vec![StatusEffect::ArmInjured]
        );
        assert_eq!(
            roll_status_effects(MeleeAction::BayonetThrust, BodyPart::Legs, &mut rng),
            vec![StatusEffect::LegInjured]
        );
    }

    #[test]
    fn instant_kill_rate_near_ten_percent() {
        let mut rng = StdRng::seed_from_u64(11);
        let kills = (0..5000)
            .filter(|_| {
                roll_status_effects(MeleeAction::BayonetThrust, BodyPart::Head, &mut rng)
                    .contains(&StatusEffect::InstantKill)
            })
            .count();
        assert!((350..650).contains(&kills), "got {kills}");
    }

    proptest! {
        #[test]
        fn damage_is_at_least_one(
            action_idx in 0usize..8,
            part_idx in 0usize..4,
            stamina in 0i32..=300,
            max_stamina in 0i32..=300,
            strength in -200i32..300,
            draw in 0.0f64..1.0,
        ) {
            let mut rng = ScriptedRandom::constant(draw);
            let dmg = calc_damage(
                MeleeAction::ALL[action_idx],
                BodyPart::ALL[part_idx],
                stamina,
                max_stamina,
                strength,
                &mut rng,
            );
            prop_assert!(dmg >= 1);
        }
    }
}
