//! Ally action and target selection.

use serde::{Deserialize, Serialize};

use crate::catalog::{BodyPart, MeleeAction};
use crate::random::{RandomSource, weighted};
use crate::state::{AllyPersonality, MeleeAlly, MeleeOpponent};

use super::{forced_choice, roll_body_part};

const AGGRESSIVE_WEIGHTS: [(MeleeAction, f64); 4] = [
    (MeleeAction::AggressiveLunge, 40.0),
    (MeleeAction::BayonetThrust, 40.0),
    (MeleeAction::ButtStrike, 10.0),
    (MeleeAction::Guard, 10.0),
];

const BALANCED_WEIGHTS: [(MeleeAction, f64); 4] = [
    (MeleeAction::BayonetThrust, 45.0),
    (MeleeAction::Guard, 25.0),
    (MeleeAction::AggressiveLunge, 15.0),
    (MeleeAction::ButtStrike, 15.0),
];

const CAUTIOUS_WEIGHTS: [(MeleeAction, f64); 4] = [
    (MeleeAction::Guard, 40.0),
    (MeleeAction::BayonetThrust, 40.0),
    (MeleeAction::ButtStrike, 10.0),
    (MeleeAction::AggressiveLunge, 10.0),
];

/// An ally's move and the opponent it is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllyChoice {
    /// Move to make.
    pub action: MeleeAction,
    /// Where to aim.
    pub body_part: BodyPart,
    /// Roster index of the targeted opponent, always one of `live`.
    pub target: usize,
}

/// Pick an ally's move.
///
/// The target is always the live opponent with the lowest health fraction,
/// ties going to the earliest index. Personality only shapes the action.
/// Returns `None` when nothing is left to fight.
pub fn choose_ally_ai(
    ally: &MeleeAlly,
    opponents: &[MeleeOpponent],
    live: &[usize],
    rng: &mut dyn RandomSource,
) -> Option<AllyChoice> {
    let target = weakest(opponents, live)?;

    if let Some(forced) = forced_choice(ally.is_stunned(), ally.stamina.current) {
        return Some(AllyChoice {
            action: forced.action,
            body_part: forced.body_part,
            target,
        });
    }

    let table = match ally.personality {
        AllyPersonality::Aggressive => &AGGRESSIVE_WEIGHTS,
        AllyPersonality::Balanced => &BALANCED_WEIGHTS,
        AllyPersonality::Cautious => &CAUTIOUS_WEIGHTS,
    };
    Some(AllyChoice {
        action: weighted(rng, table),
        body_part: roll_body_part(rng),
        target,
    })
}

fn weakest(opponents: &[MeleeOpponent], live: &[usize]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for &idx in live {
        let Some(opponent) = opponents.get(idx) else {
            continue;
        };
        let fraction = opponent.health.fraction();
        let better = match best {
            None => true,
            Some((best_idx, best_fraction)) => {
                fraction < best_fraction || (fraction == best_fraction && idx < best_idx)
            }
        };
        if better {
            best = Some((idx, fraction));
        }
    }
    best.map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{AllyTemplate, OpponentType};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn ally(personality: AllyPersonality) -> MeleeAlly {
        MeleeAlly::from_template(&AllyTemplate {
            name: "Duval".into(),
            npc_id: None,
            personality,
            max_health: 90,
            max_stamina: 150,
            strength: 45,
            elan: 30,
        })
    }

    fn roster(healths: &[i32]) -> Vec<MeleeOpponent> {
        healths
            .iter()
            .enumerate()
            .map(|(i, &h)| {
                let mut o = MeleeOpponent::new(format!("Soldier {i}"), OpponentType::Line, 100, 100, 50);
                o.health.set(h);
                o
            })
            .collect()
    }

    #[test]
    fn always_targets_weakest() {
        let mut rng = StdRng::seed_from_u64(9);
        let opponents = roster(&[90, 40, 70]);
        for personality in AllyPersonality::ALL {
            let a = ally(personality);
            for _ in 0..100 {
                let choice = choose_ally_ai(&a, &opponents, &[0, 1, 2], &mut rng).unwrap();
                assert_eq!(choice.target, 1);
            }
        }
    }

    #[test]
    fn ties_go_to_lowest_index() {
        let mut rng = StdRng::seed_from_u64(10);
        let opponents = roster(&[90, 50, 50]);
        let choice = choose_ally_ai(&ally(AllyPersonality::Balanced), &opponents, &[2, 1, 0], &mut rng).unwrap();
        assert_eq!(choice.target, 1);
    }

    #[test]
    fn empty_live_set_yields_nothing() {
        let mut rng = StdRng::seed_from_u64(11);
        let opponents = roster(&[90]);
        assert!(choose_ally_ai(&ally(AllyPersonality::Aggressive), &opponents, &[], &mut rng).is_none());
    }

    #[test]
    fn exhausted_ally_rests_but_keeps_target() {
        let mut rng = StdRng::seed_from_u64(12);
        let opponents = roster(&[90, 60]);
        let mut a = ally(AllyPersonality::Aggressive);
        a.stamina.set(10);
        let choice = choose_ally_ai(&a, &opponents, &[0, 1], &mut rng).unwrap();
        assert_eq!(choice.action, MeleeAction::Respite);
        assert_eq!(choice.body_part, BodyPart::Torso);
        assert_eq!(choice.target, 1);
    }

    #[test]
    fn cautious_guards_more_than_aggressive() {
        let mut rng = StdRng::seed_from_u64(13);
        let opponents = roster(&[90]);
        let count_guards = |a: &MeleeAlly, rng: &mut StdRng| {
            (0..1000)
                .filter(|_| {
                    choose_ally_ai(a, &opponents, &[0], rng).map(|c| c.action) == Some(MeleeAction::Guard)
                })
                .count()
        };
        let cautious = count_guards(&ally(AllyPersonality::Cautious), &mut rng);
        let aggressive = count_guards(&ally(AllyPersonality::Aggressive), &mut rng);
        assert!(cautious > aggressive * 2, "cautious {cautious}, aggressive {aggressive}");
    }
}
