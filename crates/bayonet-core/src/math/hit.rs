//! Hit and block probabilities.

use crate::catalog::{BodyPart, CombatantKind, CombatantRef, MeleeAction, Stance};
use crate::stats::fatigue_term;

/// Base player hit chance before modifiers.
pub const BASE_HIT: f64 = 0.35;
/// Bonus for a riposte after a clean block.
pub const RIPOSTE_BONUS: f64 = 0.15;
/// Weight of missing morale in the player's hit chance.
pub const MORALE_PENALTY: f64 = 0.15;
/// Penalty for striking with an injured arm.
pub const ARM_INJURY_PENALTY: f64 = 0.10;
/// NPC bonus for striking right after a feint.
pub const FEINT_BONUS: f64 = 0.25;
/// Base block chance before modifiers.
pub const BASE_BLOCK: f64 = 0.10;

/// Player hit chance bounds.
pub const PLAYER_HIT_RANGE: (f64, f64) = (0.05, 0.95);
/// NPC hit chance bounds.
pub const NPC_HIT_RANGE: (f64, f64) = (0.15, 0.85);
/// Block chance bounds.
pub const BLOCK_RANGE: (f64, f64) = (0.05, 0.95);

/// The player's chance to land `action` on `body_part`, in `[0.05, 0.95]`.
///
/// Skill is musketry for ranged actions and elan otherwise, scaled by 1/120.
/// Missing morale costs up to 0.15 and tiredness adds the fatigue debuff.
pub fn calc_hit_chance(
    stance: Stance,
    action: MeleeAction,
    body_part: BodyPart,
    attacker: &CombatantRef,
    is_riposte: bool,
) -> f64 {
    let skill = if action.is_ranged() {
        attacker.musketry
    } else {
        attacker.elan
    };
    let mut chance = BASE_HIT
        + stance.def().attack
        + action.def().hit_bonus
        + body_part.def().hit_mod
        + skill as f64 / 120.0
        - (1.0 - attacker.morale_fraction()) * MORALE_PENALTY
        + fatigue_term(attacker.stamina, attacker.max_stamina);
    if is_riposte {
        chance += RIPOSTE_BONUS;
    }
    if attacker.arm_injured {
        chance -= ARM_INJURY_PENALTY;
    }
    chance.clamp(PLAYER_HIT_RANGE.0, PLAYER_HIT_RANGE.1)
}

/// An NPC's chance to land a blow, in `[0.15, 0.85]`.
pub fn calc_enemy_hit_chance(
    base_hit_rate: f64,
    action: MeleeAction,
    body_part: BodyPart,
    feinted: bool,
    arm_injured: bool,
) -> f64 {
    let mut chance = base_hit_rate + action.def().hit_bonus + body_part.def().hit_mod;
    if feinted {
        chance += FEINT_BONUS;
    }
    if arm_injured {
        chance -= ARM_INJURY_PENALTY;
    }
    chance.clamp(NPC_HIT_RANGE.0, NPC_HIT_RANGE.1)
}

/// Base hit rate of a non-player attacker.
///
/// Opponents use their grade; allies `0.30 + elan/200`. The player strikes
/// through [`calc_hit_chance`] and never reaches this; a player view falls
/// back to the player's base term.
pub fn npc_base_hit_rate(attacker: &CombatantRef) -> f64 {
    debug_assert!(
        !matches!(attacker.kind, CombatantKind::Player),
        "player strikes use calc_hit_chance"
    );
    match attacker.kind {
        CombatantKind::Opponent(kind) => kind.base_hit_rate(),
        CombatantKind::Ally(_) => 0.30 + attacker.elan as f64 / 200.0,
        CombatantKind::Player => BASE_HIT + attacker.elan as f64 / 120.0,
    }
}

/// Chance a guarding defender fully blocks a landed blow, in `[0.05, 0.95]`.
///
/// NPC defenders fight without a stance and pass [`Stance::Balanced`].
pub fn calc_block_chance(stance: Stance, defender: &CombatantRef) -> f64 {
    let chance = BASE_BLOCK
        + stance.def().defense
        + defender.elan as f64 / 85.0
        + fatigue_term(defender.stamina, defender.max_stamina);
    chance.clamp(BLOCK_RANGE.0, BLOCK_RANGE.1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{MeleeOpponent, MeleeState, OpponentType, Player};
    use proptest::prelude::*;

    fn player_ref() -> CombatantRef {
        CombatantRef::from_player(&Player::new("Lefebvre"), &MeleeState::new(Vec::new(), 1))
    }

    fn arb_stance() -> impl Strategy<Value = Stance> {
        prop::sample::select(Stance::ALL.to_vec())
    }

    fn arb_action() -> impl Strategy<Value = MeleeAction> {
        prop::sample::select(MeleeAction::ALL.to_vec())
    }

    fn arb_part() -> impl Strategy<Value = BodyPart> {
        prop::sample::select(BodyPart::ALL.to_vec())
    }

    #[test]
    fn torso_thrust_baseline() {
        // 0.35 + 35/120 with full morale and stamina.
        let chance = calc_hit_chance(
            Stance::Balanced,
            MeleeAction::BayonetThrust,
            BodyPart::Torso,
            &player_ref(),
            false,
        );
        assert!((chance - (0.35 + 35.0 / 120.0)).abs() < 1e-9);
    }

    #[test]
    fn riposte_adds_bonus() {
        let p = player_ref();
        let plain = calc_hit_chance(Stance::Balanced, MeleeAction::BayonetThrust, BodyPart::Arms, &p, false);
        let riposte = calc_hit_chance(Stance::Balanced, MeleeAction::BayonetThrust, BodyPart::Arms, &p, true);
        assert!((riposte - plain - RIPOSTE_BONUS).abs() < 1e-9);
    }

    #[test]
    fn low_morale_and_fatigue_hurt() {
        let mut p = player_ref();
        let fresh = calc_hit_chance(Stance::Balanced, MeleeAction::BayonetThrust, BodyPart::Torso, &p, false);
        p.morale = 0;
        p.stamina = 10;
        let tired = calc_hit_chance(Stance::Balanced, MeleeAction::BayonetThrust, BodyPart::Torso, &p, false);
        assert!((fresh - tired - (MORALE_PENALTY + 0.15)).abs() < 1e-9);
    }

    #[test]
    fn shoot_uses_musketry() {
        let mut p = player_ref();
        p.musketry = 95;
        p.elan = 0;
        let shot = calc_hit_chance(Stance::Balanced, MeleeAction::Shoot, BodyPart::Torso, &p, false);
        let thrust = calc_hit_chance(Stance::Balanced, MeleeAction::BayonetThrust, BodyPart::Torso, &p, false);
        assert!(shot > thrust);
    }

    #[test]
    fn feint_and_arm_injury_on_npc_chance() {
        let base = calc_enemy_hit_chance(0.45, MeleeAction::BayonetThrust, BodyPart::Torso, false, false);
        let feinted = calc_enemy_hit_chance(0.45, MeleeAction::BayonetThrust, BodyPart::Torso, true, false);
        let hurt = calc_enemy_hit_chance(0.45, MeleeAction::BayonetThrust, BodyPart::Torso, false, true);
        assert!((feinted - base - FEINT_BONUS).abs() < 1e-9);
        assert!((base - hurt - ARM_INJURY_PENALTY).abs() < 1e-9);
    }

    #[test]
    fn opponent_base_rate_is_grade() {
        let opponent = MeleeOpponent::new("Fritz", OpponentType::Sergeant, 100, 150, 60);
        let o = CombatantRef::from_opponent(&opponent);
        assert!((npc_base_hit_rate(&o) - 0.60).abs() < 1e-9);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "player strikes use calc_hit_chance")]
    fn player_is_not_an_npc_attacker() {
        npc_base_hit_rate(&player_ref());
    }

    #[test]
    fn defensive_stance_blocks_better() {
        let p = player_ref();
        let defensive = calc_block_chance(Stance::Defensive, &p);
        let aggressive = calc_block_chance(Stance::Aggressive, &p);
        assert!(defensive > aggressive);
    }

    proptest! {
        #[test]
        fn player_hit_chance_bounded(
            stance in arb_stance(),
            action in arb_action(),
            part in arb_part(),
            elan in 0i32..200,
            musketry in 0i32..200,
            morale in 0i32..=100,
            stamina in 0i32..=200,
            riposte in any::<bool>(),
            arm in any::<bool>(),
        ) {
            let mut p = player_ref();
            p.elan = elan;
            p.musketry = musketry;
            p.morale = morale;
            p.stamina = stamina;
            p.arm_injured = arm;
            let chance = calc_hit_chance(stance, action, part, &p, riposte);
            prop_assert!((0.05..=0.95).contains(&chance));
        }

        #[test]
        fn npc_hit_chance_bounded(
            base in 0.0f64..1.0,
            action in arb_action(),
            part in arb_part(),
            feinted in any::<bool>(),
            arm in any::<bool>(),
        ) {
            let chance = calc_enemy_hit_chance(base, action, part, feinted, arm);
            prop_assert!((0.15..=0.85).contains(&chance));
        }

        #[test]
        fn block_chance_bounded(stance in arb_stance(), elan in 0i32..300, stamina in 0i32..=200) {
            let mut p = player_ref();
            p.elan = elan;
            p.stamina = stamina;
            let chance = calc_block_chance(stance, &p);
            prop_assert!((0.05..=0.95).contains(&chance));
        }
    }
}
