//! Opponent action selection.

use crate::catalog::{CombatantId, MeleeAction};
use crate::random::{RandomSource, weighted};
use crate::state::{MeleeOpponent, OpponentType};

use super::{AiChoice, MeleeHistory, forced_choice, roll_body_part};

/// Health fraction below which a conscript loses its nerve.
pub const CONSCRIPT_PANIC: f64 = 0.30;

const CONSCRIPT_PANIC_WEIGHTS: [(MeleeAction, f64); 2] = [
    (MeleeAction::Respite, 60.0),
    (MeleeAction::AggressiveLunge, 40.0),
];

const CONSCRIPT_WEIGHTS: [(MeleeAction, f64); 4] = [
    (MeleeAction::BayonetThrust, 45.0),
    (MeleeAction::Guard, 30.0),
    (MeleeAction::ButtStrike, 15.0),
    (MeleeAction::AggressiveLunge, 10.0),
];

const LINE_WEIGHTS: [(MeleeAction, f64); 5] = [
    (MeleeAction::BayonetThrust, 35.0),
    (MeleeAction::AggressiveLunge, 20.0),
    (MeleeAction::ButtStrike, 20.0),
    (MeleeAction::Guard, 20.0),
    (MeleeAction::Feint, 5.0),
];

const VETERAN_WEIGHTS: [(MeleeAction, f64); 5] = [
    (MeleeAction::AggressiveLunge, 35.0),
    (MeleeAction::BayonetThrust, 30.0),
    (MeleeAction::Feint, 20.0),
    (MeleeAction::ButtStrike, 10.0),
    (MeleeAction::Guard, 5.0),
];

const SERGEANT_WEIGHTS: [(MeleeAction, f64); 5] = [
    (MeleeAction::AggressiveLunge, 35.0),
    (MeleeAction::Feint, 25.0),
    (MeleeAction::BayonetThrust, 25.0),
    (MeleeAction::ButtStrike, 10.0),
    (MeleeAction::Guard, 5.0),
];

/// Pick an opponent's move.
///
/// `index` identifies the opponent in `history`. Veterans and sergeants
/// consult the history so they never repeat an attack three times running.
pub fn choose_melee_ai(
    index: usize,
    opponent: &MeleeOpponent,
    history: &MeleeHistory,
    rng: &mut dyn RandomSource,
) -> AiChoice {
    if let Some(forced) = forced_choice(opponent.is_stunned(), opponent.stamina.current) {
        return forced;
    }

    let action = match opponent.kind {
        OpponentType::Conscript if opponent.health.fraction() < CONSCRIPT_PANIC => {
            weighted(rng, &CONSCRIPT_PANIC_WEIGHTS)
        }
        OpponentType::Conscript => weighted(rng, &CONSCRIPT_WEIGHTS),
        OpponentType::Line => weighted(rng, &LINE_WEIGHTS),
        OpponentType::Veteran => weighted(rng, &VETERAN_WEIGHTS),
        OpponentType::Sergeant => weighted(rng, &SERGEANT_WEIGHTS),
    };

    let action = match opponent.kind {
        OpponentType::Veteran | OpponentType::Sergeant
            if action.is_attack() && history.would_triple(CombatantId::Opponent(index), action) =>
        {
            if action == MeleeAction::BayonetThrust {
                MeleeAction::Feint
            } else {
                MeleeAction::BayonetThrust
            }
        }
        _ => action,
    };

    AiChoice {
        action,
        body_part: roll_body_part(rng),
    }
}
