//! Friendly combatants fighting beside the player.

use serde::{Deserialize, Serialize};

use crate::vital::Vital;

use super::Wounds;

/// Temperament steering an ally's choice of moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllyPersonality {
    /// Favours lunges and thrusts.
    Aggressive,
    /// Mixes attack and guard.
    #[default]
    Balanced,
    /// Guards often, rarely lunges.
    Cautious,
}

impl AllyPersonality {
    /// Every personality.
    pub const ALL: [AllyPersonality; 3] = [
        AllyPersonality::Aggressive,
        AllyPersonality::Balanced,
        AllyPersonality::Cautious,
    ];
}

impl std::fmt::Display for AllyPersonality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Aggressive => write!(f, "aggressive"),
            Self::Balanced => write!(f, "balanced"),
            Self::Cautious => write!(f, "cautious"),
        }
    }
}

/// Blueprint an ally is materialized from when a wave event fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllyTemplate {
    /// Display name.
    pub name: String,
    /// Narrative NPC this ally stands for, if any.
    #[serde(default)]
    pub npc_id: Option<String>,
    /// Temperament.
    #[serde(default)]
    pub personality: AllyPersonality,
    /// Maximum health.
    pub max_health: i32,
    /// Maximum stamina.
    pub max_stamina: i32,
    /// Physical strength.
    pub strength: i32,
    /// Fighting spirit.
    pub elan: i32,
}

impl AllyTemplate {
    /// A template with no name or no health cannot produce a fighter.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() && self.max_health > 0 && self.max_stamina >= 0
    }
}

/// An ally taking part in the melee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeleeAlly {
    /// Display name.
    pub name: String,
    /// Narrative NPC this ally stands for, if any.
    pub npc_id: Option<String>,
    /// Temperament.
    pub personality: AllyPersonality,
    /// Hit points.
    pub health: Vital,
    /// Stamina pool.
    pub stamina: Vital,
    /// Accumulated fatigue.
    pub fatigue: Vital,
    /// Physical strength.
    pub strength: i32,
    /// Fighting spirit.
    pub elan: i32,
    /// Limb injuries.
    pub wounds: Wounds,
    /// Remaining stunned turns.
    pub stun_turns: u32,
    /// Guard raised on its last action.
    pub guarding: bool,
    /// False once health reaches zero.
    pub alive: bool,
}

impl MeleeAlly {
    /// Materialize a fresh ally from a template.
    pub fn from_template(template: &AllyTemplate) -> Self {
        Self {
            name: template.name.clone(),
            npc_id: template.npc_id.clone(),
            personality: template.personality,
            health: Vital::full(template.max_health),
            stamina: Vital::full(template.max_stamina),
            fatigue: Vital::empty(template.max_stamina * 2),
            strength: template.strength,
            elan: template.elan,
            wounds: Wounds::default(),
            stun_turns: 0,
            guarding: false,
            alive: true,
        }
    }

    /// Whether a stun is in effect.
    pub fn is_stunned(&self) -> bool {
        self.stun_turns > 0
    }

    /// Alive with health left.
    pub fn is_active(&self) -> bool {
        self.alive && !self.health.is_empty()
    }

    /// Whether this ally is a named narrative character.
    pub fn is_named(&self) -> bool {
        self.npc_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> AllyTemplate {
        AllyTemplate {
            name: "Pierre".into(),
            npc_id: Some("pierre".into()),
            personality: AllyPersonality::Aggressive,
            max_health: 90,
            max_stamina: 160,
            strength: 55,
            elan: 40,
        }
    }

    #[test]
    fn from_template_starts_fresh() {
        let ally = MeleeAlly::from_template(&template());
        assert_eq!(ally.health.current, 90);
        assert_eq!(ally.stamina.current, 160);
        assert!(ally.is_active());
        assert!(ally.is_named());
        assert!(!ally.is_stunned());
    }

    #[test]
    fn template_validity() {
        assert!(template().is_valid());
        let mut nameless = template();
        nameless.name = "  ".into();
        assert!(!nameless.is_valid());
        let mut lifeless = template();
        lifeless.max_health = 0;
        assert!(!lifeless.is_valid());
    }

    #[test]
    fn template_defaults_from_json() {
        let json = r#"{"name":"Jean","max_health":80,"max_stamina":150,"strength":45,"elan":30}"#;
        let t: AllyTemplate = serde_json::from_str(json).unwrap();
        assert_eq!(t.personality, AllyPersonality::Balanced);
        assert!(t.npc_id.is_none());
    }
}
