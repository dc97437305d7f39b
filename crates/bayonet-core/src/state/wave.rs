//! Scripted wave events and the narrative NPC references they consult.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::ally::AllyTemplate;

/// What a wave event does when it fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WaveEventKind {
    /// An ally joins the fight.
    AddAlly {
        /// Blueprint for the ally. `None` marks a broken script entry.
        template: Option<AllyTemplate>,
        /// Narrative role the ally stands for, resolved through the role map.
        #[serde(default)]
        role: Option<String>,
        /// Start the ally wounded if their NPC was hurt in the line phase.
        #[serde(default)]
        carry_wound: bool,
    },
    /// More enemies may engage at once.
    IncreaseMaxEnemies {
        /// New active-enemy cap. Never lowers the current cap.
        max: usize,
    },
}

/// A round-triggered script entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveEvent {
    /// Fires once `round_number >= at_round`.
    pub at_round: u32,
    /// Effect of the event.
    pub kind: WaveEventKind,
    /// Role whose NPC must still be alive for the event to fire.
    #[serde(default)]
    pub requires_alive: Option<String>,
}

impl WaveEvent {
    /// An ally arrival at `at_round`.
    pub fn add_ally(at_round: u32, template: AllyTemplate) -> Self {
        Self {
            at_round,
            kind: WaveEventKind::AddAlly {
                template: Some(template),
                role: None,
                carry_wound: false,
            },
            requires_alive: None,
        }
    }

    /// Escalation of the active-enemy cap at `at_round`.
    pub fn increase_max_enemies(at_round: u32, max: usize) -> Self {
        Self {
            at_round,
            kind: WaveEventKind::IncreaseMaxEnemies { max },
            requires_alive: None,
        }
    }

    /// Tie the event to a narrative role: the ally stands for that role's
    /// NPC, and the event is skipped if that NPC is dead.
    pub fn for_role(mut self, role: impl Into<String>, carry_wound: bool) -> Self {
        let role = role.into();
        if let WaveEventKind::AddAlly {
            role: slot,
            carry_wound: carry,
            ..
        } = &mut self.kind
        {
            *slot = Some(role.clone());
            *carry = carry_wound;
        }
        self.requires_alive = Some(role);
        self
    }
}

/// Status of a narrative NPC as known to the wider battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpcRef {
    /// Stable NPC identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Still alive.
    pub alive: bool,
    /// Hurt during an earlier phase of the battle.
    pub wounded: bool,
}

/// Narrative NPCs plus the role assignments wave scripts refer to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NpcRoster {
    /// Known NPCs.
    pub npcs: Vec<NpcRef>,
    /// Role name to NPC id.
    pub roles: HashMap<String, String>,
}

impl NpcRoster {
    /// An empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an NPC and bind it to a role.
    pub fn with_npc(mut self, role: impl Into<String>, npc: NpcRef) -> Self {
        self.roles.insert(role.into(), npc.id.clone());
        self.npcs.push(npc);
        self
    }

    /// Resolve a role to its NPC.
    pub fn npc_for_role(&self, role: &str) -> Option<&NpcRef> {
        let id = self.roles.get(role)?;
        self.npcs.iter().find(|n| &n.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ally::AllyPersonality;

    fn template() -> AllyTemplate {
        AllyTemplate {
            name: "Jean-Baptiste".into(),
            npc_id: Some("jb".into()),
            personality: AllyPersonality::Balanced,
            max_health: 80,
            max_stamina: 150,
            strength: 50,
            elan: 35,
        }
    }

    #[test]
    fn for_role_sets_condition_and_link() {
        let event = WaveEvent::add_ally(3, template()).for_role("neighbour", true);
        assert_eq!(event.requires_alive.as_deref(), Some("neighbour"));
        match event.kind {
            WaveEventKind::AddAlly {
                role, carry_wound, ..
            } => {
                assert_eq!(role.as_deref(), Some("neighbour"));
                assert!(carry_wound);
            }
            WaveEventKind::IncreaseMaxEnemies { .. } => panic!("wrong kind"),
        }
    }

    #[test]
    fn roster_resolves_roles() {
        let roster = NpcRoster::new().with_npc(
            "neighbour",
            NpcRef {
                id: "jb".into(),
                name: "Jean-Baptiste".into(),
                alive: true,
                wounded: false,
            },
        );
        assert_eq!(
            roster.npc_for_role("neighbour").map(|n| n.name.as_str()),
            Some("Jean-Baptiste")
        );
        assert!(roster.npc_for_role("captain").is_none());
    }

    #[test]
    fn event_json_shape() {
        let event = WaveEvent::increase_max_enemies(4, 3);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"]["type"], "increase_max_enemies");
        assert_eq!(json["kind"]["max"], 3);
        let back: WaveEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }
}
