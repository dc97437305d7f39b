//! Static balance tables and combatant views.
//!
//! Stances, actions and body parts are enum-keyed lookups into immutable
//! tables; combat math, AI and any front end read the same numbers.

pub mod action;
pub mod body;
pub mod combatant;
pub mod stance;

pub use action::{ActionDef, MeleeAction};
pub use body::{BodyPart, BodyPartDef};
pub use combatant::{CombatantId, CombatantKind, CombatantRef, CombatantSnapshot};
pub use stance::{Stance, StanceDef};
