//! Ready-made encounters.
//!
//! These stand in for the battle-specific encounter builder: each returns a
//! `BattleState` with a roster, a pool, and a wave schedule.

use crate::error::{MeleeError, MeleeResult};
use crate::state::{
    AllyPersonality, AllyTemplate, BattleState, MeleeAlly, MeleeOpponent, MeleeState, NpcRef,
    NpcRoster, OpponentType, Player, WaveEvent,
};

/// A named encounter.
#[derive(Debug, Clone, Copy)]
pub struct Preset {
    /// Lookup name.
    pub name: &'static str,
    /// One-line summary.
    pub description: &'static str,
    build: fn() -> BattleState,
}

impl Preset {
    /// Build a fresh copy of the encounter.
    pub fn build(&self) -> BattleState {
        (self.build)()
    }
}

/// Every preset, in display order.
pub const PRESETS: [Preset; 3] = [
    Preset {
        name: "terrain_melee",
        description: "Scrub and rocks: two engage at a time, Pierre may come up at round 3",
        build: terrain_melee,
    },
    Preset {
        name: "battery_skirmish",
        description: "Rushing a gun line: one at a time until the battery wakes, then three",
        build: battery_skirmish,
    },
    Preset {
        name: "duel",
        description: "One sergeant, no help on either side",
        build: duel,
    },
];

/// Names of every preset.
pub fn preset_names() -> impl Iterator<Item = &'static str> {
    PRESETS.iter().map(|p| p.name)
}

/// Build a preset by name.
pub fn preset_by_name(name: &str) -> MeleeResult<BattleState> {
    PRESETS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
        .map(Preset::build)
        .ok_or_else(|| MeleeError::UnknownPreset(name.to_string()))
}

/// Standard opponent of a grade.
pub fn opponent(name: &str, kind: OpponentType) -> MeleeOpponent {
    let (health, stamina, strength) = match kind {
        OpponentType::Conscript => (70, 100, 40),
        OpponentType::Line => (80, 120, 50),
        OpponentType::Veteran => (95, 150, 60),
        OpponentType::Sergeant => (100, 160, 65),
    };
    MeleeOpponent::new(name, kind, health, stamina, strength)
}

/// Pierre, the player's file partner.
pub fn pierre() -> AllyTemplate {
    AllyTemplate {
        name: "Pierre".into(),
        npc_id: Some("pierre".into()),
        personality: AllyPersonality::Aggressive,
        max_health: 90,
        max_stamina: 160,
        strength: 55,
        elan: 45,
    }
}

/// Jean-Baptiste, steady and careful.
pub fn jean_baptiste() -> AllyTemplate {
    AllyTemplate {
        name: "Jean-Baptiste".into(),
        npc_id: Some("jean_baptiste".into()),
        personality: AllyPersonality::Cautious,
        max_health: 85,
        max_stamina: 150,
        strength: 45,
        elan: 30,
    }
}

/// An unnamed soldier from the company.
pub fn line_ally(name: &str) -> AllyTemplate {
    AllyTemplate {
        name: name.into(),
        npc_id: None,
        personality: AllyPersonality::Balanced,
        max_health: 80,
        max_stamina: 140,
        strength: 45,
        elan: 30,
    }
}

/// The narrative NPCs the presets' wave scripts refer to, both alive and
/// Pierre wounded in the firing line.
pub fn preset_npcs() -> NpcRoster {
    NpcRoster::new()
        .with_npc(
            "pierre",
            NpcRef {
                id: "pierre".into(),
                name: "Pierre".into(),
                alive: true,
                wounded: true,
            },
        )
        .with_npc(
            "jean_baptiste",
            NpcRef {
                id: "jean_baptiste".into(),
                name: "Jean-Baptiste".into(),
                alive: true,
                wounded: false,
            },
        )
}

/// Melee in broken ground.
pub fn terrain_melee() -> BattleState {
    let roster = vec![
        opponent("Hans", OpponentType::Conscript),
        opponent("Karl", OpponentType::Line),
        opponent("Josef", OpponentType::Conscript),
        opponent("Franz", OpponentType::Line),
        opponent("Matthias", OpponentType::Veteran),
    ];
    let melee = MeleeState::new(roster, 2)
        .with_allies(vec![MeleeAlly::from_template(&line_ally("Duval"))])
        .with_wave_events(vec![
            WaveEvent::add_ally(3, pierre()).for_role("pierre", true),
            WaveEvent::increase_max_enemies(5, 3),
        ]);
    BattleState::new(Player::new("Private Lefebvre"), melee)
}

/// Storming a battery.
pub fn battery_skirmish() -> BattleState {
    let roster = vec![
        opponent("Gunner Weber", OpponentType::Conscript),
        opponent("Gunner Braun", OpponentType::Conscript),
        opponent("Leopold", OpponentType::Line),
        opponent("Anton", OpponentType::Veteran),
        opponent("Sergeant Huber", OpponentType::Sergeant),
        opponent("Stefan", OpponentType::Line),
    ];
    let melee = MeleeState::new(roster, 1).with_wave_events(vec![
        WaveEvent::increase_max_enemies(2, 2),
        WaveEvent::add_ally(3, jean_baptiste()).for_role("jean_baptiste", false),
        WaveEvent::add_ally(4, line_ally("Moreau")),
        WaveEvent::increase_max_enemies(6, 3),
    ]);
    BattleState::new(Player::new("Private Lefebvre"), melee)
}

/// A single fight.
pub fn duel() -> BattleState {
    let melee = MeleeState::new(vec![opponent("Sergeant Brandt", OpponentType::Sergeant)], 1);
    BattleState::new(Player::new("Private Lefebvre"), melee)
}
