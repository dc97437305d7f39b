//! NPC decision making.
//!
//! The AI reads the encounter and returns a choice; it never mutates state.
//! The round resolver applies whatever comes back.

pub mod ally;
pub mod enemy;
pub mod history;
pub mod target;

pub use ally::choose_ally_ai;
pub use enemy::choose_melee_ai;
pub use history::MeleeHistory;
pub use target::choose_enemy_target;

use serde::{Deserialize, Serialize};

use crate::catalog::{BodyPart, MeleeAction};
use crate::random::{RandomSource, weighted};

/// At or below this stamina an NPC always rests.
pub const STAMINA_FLOOR: i32 = 15;

/// Enemy body-part aim distribution.
pub const BODY_PART_WEIGHTS: [(BodyPart, f64); 4] = [
    (BodyPart::Torso, 60.0),
    (BodyPart::Arms, 20.0),
    (BodyPart::Legs, 15.0),
    (BodyPart::Head, 5.0),
];

/// An NPC's chosen move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiChoice {
    /// Move to make.
    pub action: MeleeAction,
    /// Where to aim.
    pub body_part: BodyPart,
}

impl AiChoice {
    /// A choice aimed at the torso.
    pub fn torso(action: MeleeAction) -> Self {
        Self {
            action,
            body_part: BodyPart::Torso,
        }
    }
}

/// Roll an aim point from [`BODY_PART_WEIGHTS`].
pub fn roll_body_part(rng: &mut dyn RandomSource) -> BodyPart {
    weighted(rng, &BODY_PART_WEIGHTS)
}

/// The forced choices shared by every NPC: stunned combatants guard and
/// exhausted ones rest.
pub fn forced_choice(stunned: bool, stamina: i32) -> Option<AiChoice> {
    if stunned {
        Some(AiChoice::torso(MeleeAction::Guard))
    } else if stamina <= STAMINA_FLOOR {
        Some(AiChoice::torso(MeleeAction::Respite))
    } else {
        None
    }
}
