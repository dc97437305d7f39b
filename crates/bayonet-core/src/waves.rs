//! Wave manager: scripted arrivals, escalation, and enemy backfill.
//!
//! Together with the round resolver this is the only code that mutates
//! `MeleeState`. Opponents move Pooled → Active → Defeated and never back.

use crate::log::{LogEntry, LogKind, Phase};
use crate::state::{MeleeAlly, MeleeState, NpcRoster, WaveEventKind};

/// Health kept by an ally whose NPC was wounded before the melee.
pub const CARRIED_WOUND_FACTOR: f64 = 0.6;

/// The defeat predicate for a roster slot. Out-of-range slots read as
/// defeated so they are never targeted or activated.
pub fn is_opponent_defeated(melee: &MeleeState, index: usize) -> bool {
    melee.opponents.get(index).is_none_or(|o| o.is_defeated())
}

/// Fire every unprocessed wave event whose round has come.
///
/// Each event index is consumed at most once, whether it fired or was
/// skipped, so calling this twice in a round is harmless.
pub fn process_wave_events(melee: &mut MeleeState, npcs: &NpcRoster) -> Vec<LogEntry> {
    let round = melee.round_number;
    let mut log = Vec::new();

    for idx in 0..melee.wave_events.len() {
        if melee.processed_waves.contains(&idx) || melee.wave_events[idx].at_round > round {
            continue;
        }
        melee.processed_waves.insert(idx);
        let event = melee.wave_events[idx].clone();

        if let Some(role) = &event.requires_alive {
            let reason = match npcs.npc_for_role(role) {
                None => Some(format!("no NPC holds role '{role}'")),
                Some(npc) if !npc.alive => Some(format!("{} is dead", npc.name)),
                Some(_) => None,
            };
            if let Some(reason) = reason {
                tracing::info!(event = idx, %reason, "wave event skipped");
                log.push(skipped(round, idx, reason));
                continue;
            }
        }

        match event.kind {
            WaveEventKind::AddAlly {
                template,
                role,
                carry_wound,
            } => {
                let Some(template) = template.filter(|t| t.is_valid()) else {
                    tracing::warn!(event = idx, "wave event has a missing or malformed ally template");
                    log.push(skipped(round, idx, "malformed ally template".to_string()));
                    continue;
                };
                let mut ally = MeleeAlly::from_template(&template);
                if let Some(npc) = role.as_deref().and_then(|r| npcs.npc_for_role(r)) {
                    ally.npc_id = Some(npc.id.clone());
                    if carry_wound && npc.wounded {
                        let carried = (ally.health.max as f64 * CARRIED_WOUND_FACTOR).round() as i32;
                        ally.health.set(carried.max(1));
                    }
                }
                let index = melee.allies.len();
                let name = ally.name.clone();
                tracing::info!(event = idx, ally = %name, "ally joined");
                melee.allies.push(ally);
                log.push(LogEntry::new(
                    round,
                    Phase::Waves,
                    LogKind::AllyJoined {
                        index,
                        name: name.clone(),
                    },
                    format!("{name} joins the fight"),
                ));
            }
            WaveEventKind::IncreaseMaxEnemies { max } => {
                if max <= melee.max_active_enemies {
                    log.push(skipped(
                        round,
                        idx,
                        format!("cap already {}", melee.max_active_enemies),
                    ));
                    continue;
                }
                melee.max_active_enemies = max;
                tracing::info!(event = idx, max, "active enemy cap raised");
                log.push(LogEntry::new(
                    round,
                    Phase::Waves,
                    LogKind::MaxEnemiesRaised { max },
                    format!("up to {max} enemies may engage"),
                ));
            }
        }
    }

    log
}

/// Drop defeated opponents from the active set and top it up from the pool.
///
/// Afterwards `active_enemies.len() <= max_active_enemies`, and the active
/// set is full whenever the pool still holds anyone.
pub fn backfill_enemies(melee: &mut MeleeState) -> Vec<LogEntry> {
    let round = melee.round_number;
    let mut log = Vec::new();

    let opponents = &melee.opponents;
    melee
        .active_enemies
        .retain(|&i| opponents.get(i).is_some_and(|o| !o.is_defeated()));
    melee
        .enemy_pool
        .retain(|&i| opponents.get(i).is_some_and(|o| !o.is_defeated()));

    if melee.active_enemies.len() > melee.max_active_enemies {
        let excess = melee.active_enemies.split_off(melee.max_active_enemies);
        melee.enemy_pool.splice(0..0, excess);
    }

    while melee.active_enemies.len() < melee.max_active_enemies && !melee.enemy_pool.is_empty() {
        let index = melee.enemy_pool.remove(0);
        melee.active_enemies.push(index);
        let name = melee.opponents[index].name.clone();
        tracing::info!(opponent = index, name = %name, "enemy arrived");
        log.push(LogEntry::new(
            round,
            Phase::Waves,
            LogKind::EnemyArrived {
                index,
                name: name.clone(),
            },
            format!("{name} enters the melee"),
        ));
    }

    melee.refresh_current_opponent();
    log
}

fn skipped(round: u32, event: usize, reason: String) -> LogEntry {
    let description = format!("wave event {event} skipped: {reason}");
    LogEntry::new(
        round,
        Phase::Waves,
        LogKind::WaveSkipped { event, reason },
        description,
    )
}
