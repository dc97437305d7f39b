//! Enemy target selection.

use crate::catalog::CombatantId;
use crate::random::RandomSource;
use crate::state::{MeleeAlly, MeleeOpponent, OpponentType, Player};

struct Candidate {
    id: CombatantId,
    health_fraction: f64,
    strength: i32,
}

/// How an opponent grade leans when allies are present.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Bias {
    Player(f64),
    Weakest(f64),
    Strongest(f64),
}

fn bias(kind: OpponentType) -> Bias {
    match kind {
        OpponentType::Sergeant => Bias::Player(0.70),
        OpponentType::Line => Bias::Player(0.55),
        OpponentType::Conscript => Bias::Weakest(0.70),
        OpponentType::Veteran => Bias::Strongest(0.70),
    }
}

/// Pick who an opponent strikes at.
///
/// With no ally standing the player is the only choice. Otherwise the
/// grade's bias is honoured with its probability and the remainder is a
/// uniform pick over the player and every live ally.
pub fn choose_enemy_target(
    opponent: &MeleeOpponent,
    player: &Player,
    allies: &[MeleeAlly],
    rng: &mut dyn RandomSource,
) -> CombatantId {
    let mut candidates = vec![Candidate {
        id: CombatantId::Player,
        health_fraction: player.health.fraction(),
        strength: player.strength,
    }];
    candidates.extend(
        allies
            .iter()
            .enumerate()
            .filter(|(_, a)| a.is_active())
            .map(|(i, a)| Candidate {
                id: CombatantId::Ally(i),
                health_fraction: a.health.fraction(),
                strength: a.strength,
            }),
    );
    if candidates.len() == 1 {
        return CombatantId::Player;
    }

    let favoured = match bias(opponent.kind) {
        Bias::Player(p) if rng.chance(p) => Some(CombatantId::Player),
        Bias::Weakest(p) if rng.chance(p) => weakest(&candidates),
        Bias::Strongest(p) if rng.chance(p) => strongest(&candidates),
        _ => None,
    };
    favoured.unwrap_or_else(|| candidates[rng.pick(candidates.len())].id)
}

fn weakest(candidates: &[Candidate]) -> Option<CombatantId> {
    candidates
        .iter()
        .min_by(|a, b| a.health_fraction.total_cmp(&b.health_fraction))
        .map(|c| c.id)
}

fn strongest(candidates: &[Candidate]) -> Option<CombatantId> {
    candidates
        .iter()
        .max_by(|a, b| {
            a.health_fraction
                .total_cmp(&b.health_fraction)
                .then(a.strength.cmp(&b.strength))
        })
        .map(|c| c.id)
}
