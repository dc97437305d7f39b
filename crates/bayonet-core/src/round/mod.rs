//! Round resolver.
//!
//! A round runs in a fixed order: waves and backfill, the player, backfill,
//! allies, backfill, enemies, then every surviving stun ticks down by one.
//! The round stops the moment the player falls.

mod allies;
mod enemies;
mod npc;
mod player;

use serde::{Deserialize, Serialize};

use crate::catalog::action::FREE_ATTACK_DAMAGE;
use crate::catalog::{
    BodyPart, CombatantId, CombatantRef, CombatantSnapshot, MeleeAction, Stance,
};
use crate::config::MeleeConfig;
use crate::error::{MeleeError, MeleeResult};
use crate::log::{
    AttackRecord, HEAVY_HIT_DAMAGE, LogEntry, LogKind, MoraleChange, MoraleReason, Phase,
    StatusEffect, StrikeOutcome,
};
use crate::math::{
    Strike, StrikeAttacker, calc_block_chance, calc_enemy_hit_chance, calc_hit_chance,
    fatigue_gain, npc_base_hit_rate, resolve_strike, respite_restore, stamina_cost,
};
use crate::random::RandomSource;
use crate::state::{BattleState, MeleeOutcome, NpcRoster};
use crate::waves::{backfill_enemies, process_wave_events};

/// What the player wants to do this round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerIntent {
    /// Move to make.
    pub action: MeleeAction,
    /// Where to aim.
    pub body_part: BodyPart,
    /// Roster index of the opponent to engage. `None` picks the first live one.
    #[serde(default)]
    pub target: Option<usize>,
    /// Stance to adopt before acting.
    #[serde(default)]
    pub stance: Option<Stance>,
}

impl PlayerIntent {
    /// An intent aimed at whichever opponent is first in line.
    pub fn new(action: MeleeAction, body_part: BodyPart) -> Self {
        Self {
            action,
            body_part,
            target: None,
            stance: None,
        }
    }

    /// Aim at a specific opponent.
    pub fn at(mut self, target: usize) -> Self {
        self.target = Some(target);
        self
    }

    /// Switch stance before acting.
    pub fn with_stance(mut self, stance: Stance) -> Self {
        self.stance = Some(stance);
        self
    }
}

/// An ally lost this round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllyDeath {
    /// Ally name.
    pub name: String,
    /// Whether the ally was a named narrative character.
    pub named: bool,
}

/// Everything a round produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    /// Round number.
    pub round: u32,
    /// Ordered log entries.
    pub log: Vec<LogEntry>,
    /// Morale changes applied to the player.
    pub morale_changes: Vec<MoraleChange>,
    /// Net change in player health.
    pub player_health_delta: i32,
    /// Net change in player stamina.
    pub player_stamina_delta: i32,
    /// Allies who fell.
    pub ally_deaths: Vec<AllyDeath>,
    /// Opponents defeated this round.
    pub enemies_defeated: u32,
    /// Set when the encounter ended this round.
    pub outcome: Option<MeleeOutcome>,
}

impl RoundResult {
    /// Net morale change this round.
    pub fn morale_total(&self) -> i32 {
        self.morale_changes.iter().map(|m| m.amount).sum()
    }
}

/// Resolve one round of melee.
///
/// Caller mistakes (finished encounter, bad target, firing an unloaded
/// musket) are rejected before anything changes. A stunned player's intent
/// is replaced with guard.
pub fn resolve_melee_round(
    battle: &mut BattleState,
    intent: &PlayerIntent,
    npcs: &NpcRoster,
    config: &MeleeConfig,
    rng: &mut dyn RandomSource,
) -> MeleeResult<RoundResult> {
    let intent = validate(battle, intent)?;

    let start_health = battle.player.health.current;
    let start_stamina = battle.player.stamina.current;
    battle.melee.round_number += 1;
    let round = battle.melee.round_number;
    tracing::debug!(round, action = %intent.action, "resolving melee round");

    let mut ctx = RoundCtx {
        battle,
        rng,
        round,
        log: Vec::new(),
        morale_changes: Vec::new(),
        ally_deaths: Vec::new(),
        enemies_defeated: 0,
        acted: Vec::new(),
        player_fell: false,
    };

    if let Some(stance) = intent.stance {
        ctx.change_stance(stance);
    }

    let wave_log = process_wave_events(&mut ctx.battle.melee, npcs);
    let joined = wave_log
        .iter()
        .filter(|e| matches!(e.kind, LogKind::AllyJoined { .. }))
        .count();
    ctx.log.extend(wave_log);
    for _ in 0..joined {
        ctx.adjust_morale(MoraleReason::AllyJoined);
    }
    ctx.backfill();

    ctx.player_phase(&intent);
    if !ctx.player_fell {
        ctx.backfill();
        ctx.allies_phase();
    }
    if !ctx.player_fell {
        ctx.backfill();
        ctx.enemies_phase();
    }
    if !ctx.player_fell {
        ctx.tick_stuns();
    }

    let outcome = ctx.settle(config);
    let RoundCtx {
        battle,
        log,
        morale_changes,
        ally_deaths,
        enemies_defeated,
        ..
    } = ctx;
    battle.melee.round_log = log.clone();

    Ok(RoundResult {
        round,
        log,
        morale_changes,
        player_health_delta: battle.player.health.current - start_health,
        player_stamina_delta: battle.player.stamina.current - start_stamina,
        ally_deaths,
        enemies_defeated,
        outcome,
    })
}

fn validate(battle: &BattleState, intent: &PlayerIntent) -> MeleeResult<PlayerIntent> {
    let melee = &battle.melee;
    if let Some(outcome) = melee.outcome {
        return Err(MeleeError::EncounterFinished(outcome.to_string()));
    }
    if !battle.player.is_alive() {
        return Err(MeleeError::EncounterFinished("the player has fallen".into()));
    }
    if melee.player.stun_turns > 0 {
        return Ok(PlayerIntent {
            action: MeleeAction::Guard,
            body_part: BodyPart::Torso,
            target: None,
            stance: intent.stance,
        });
    }
    if intent.action == MeleeAction::Shoot && !battle.player.musket_loaded {
        return Err(MeleeError::ActionUnavailable("the musket is not loaded".into()));
    }
    if let Some(target) = intent.target {
        if target >= melee.opponents.len() {
            return Err(MeleeError::OpponentOutOfRange(target));
        }
        if !melee.live_enemy_indices().contains(&target) {
            return Err(MeleeError::InvalidTarget(target));
        }
    }
    Ok(*intent)
}

/// Mutable working set for one round.
struct RoundCtx<'a> {
    battle: &'a mut BattleState,
    rng: &'a mut dyn RandomSource,
    round: u32,
    log: Vec<LogEntry>,
    morale_changes: Vec<MoraleChange>,
    ally_deaths: Vec<AllyDeath>,
    enemies_defeated: u32,
    acted: Vec<CombatantId>,
    player_fell: bool,
}

impl RoundCtx<'_> {
    fn push(&mut self, phase: Phase, kind: LogKind, description: impl Into<String>) {
        self.log
            .push(LogEntry::new(self.round, phase, kind, description));
    }

    fn backfill(&mut self) {
        let entries = backfill_enemies(&mut self.battle.melee);
        self.log.extend(entries);
    }

    fn change_stance(&mut self, stance: Stance) {
        if self.battle.melee.player.stance == stance {
            return;
        }
        self.battle.melee.player.stance = stance;
        self.push(
            Phase::Player,
            LogKind::StanceChanged { stance },
            format!("stance now {stance}"),
        );
    }

    fn adjust_morale(&mut self, reason: MoraleReason) {
        let amount = self.battle.player.morale.adjust(reason.delta());
        self.morale_changes.push(MoraleChange { amount, reason });
    }

    fn view(&self, id: CombatantId) -> Option<CombatantRef> {
        let melee = &self.battle.melee;
        match id {
            CombatantId::Player => Some(CombatantRef::from_player(&self.battle.player, melee)),
            CombatantId::Opponent(i) => melee.opponents.get(i).map(CombatantRef::from_opponent),
            CombatantId::Ally(i) => melee.allies.get(i).map(CombatantRef::from_ally),
        }
    }

    fn snapshot(&self, id: CombatantId) -> Option<CombatantSnapshot> {
        let melee = &self.battle.melee;
        match id {
            CombatantId::Player => Some(CombatantSnapshot::of_player(&self.battle.player, melee)),
            CombatantId::Opponent(i) => melee
                .opponents
                .get(i)
                .map(|o| CombatantSnapshot::of_opponent(i, o)),
            CombatantId::Ally(i) => melee.allies.get(i).map(|a| CombatantSnapshot::of_ally(i, a)),
        }
    }

    fn is_guarding(&self, id: CombatantId) -> bool {
        let melee = &self.battle.melee;
        match id {
            CombatantId::Player => melee.player.guarding,
            CombatantId::Opponent(i) => melee.opponents.get(i).is_some_and(|o| o.guarding),
            CombatantId::Ally(i) => melee.allies.get(i).is_some_and(|a| a.guarding),
        }
    }

    fn set_guarding(&mut self, id: CombatantId, guarding: bool) {
        let melee = &mut self.battle.melee;
        match id {
            CombatantId::Player => melee.player.guarding = guarding,
            CombatantId::Opponent(i) => {
                if let Some(o) = melee.opponents.get_mut(i) {
                    o.guarding = guarding;
                }
            }
            CombatantId::Ally(i) => {
                if let Some(a) = melee.allies.get_mut(i) {
                    a.guarding = guarding;
                }
            }
        }
    }

    /// Pay for an action. Respite restores instead. Returns the stamina
    /// restored, if any.
    fn pay_stamina(&mut self, id: CombatantId, action: MeleeAction) -> i32 {
        let (stance, wounds) = match id {
            CombatantId::Player => (Some(self.battle.melee.player.stance), self.battle.melee.player.wounds),
            CombatantId::Opponent(i) => match self.battle.melee.opponents.get(i) {
                Some(o) => (None, o.wounds),
                None => return 0,
            },
            CombatantId::Ally(i) => match self.battle.melee.allies.get(i) {
                Some(a) => (None, a.wounds),
                None => return 0,
            },
        };
        let cost = stamina_cost(action, stance, wounds);
        let Some((stamina, fatigue)) = self.pools_mut(id) else {
            return 0;
        };
        if cost > 0 {
            stamina.adjust(-cost);
            fatigue.adjust(fatigue_gain(cost));
            0
        } else {
            let restored = respite_restore(fatigue.current, fatigue.max);
            stamina.adjust(restored)
        }
    }

    fn pools_mut(
        &mut self,
        id: CombatantId,
    ) -> Option<(&mut crate::vital::Vital, &mut crate::vital::Vital)> {
        match id {
            CombatantId::Player => {
                let p = &mut self.battle.player;
                Some((&mut p.stamina, &mut p.fatigue))
            }
            CombatantId::Opponent(i) => self
                .battle
                .melee
                .opponents
                .get_mut(i)
                .map(|o| (&mut o.stamina, &mut o.fatigue)),
            CombatantId::Ally(i) => self
                .battle
                .melee
                .allies
                .get_mut(i)
                .map(|a| (&mut a.stamina, &mut a.fatigue)),
        }
    }

    /// Drain a feint target's stamina. Returns the amount drained.
    fn drain_stamina(&mut self, id: CombatantId, amount: i32) -> i32 {
        match self.pools_mut(id) {
            Some((stamina, _)) => -stamina.adjust(-amount),
            None => 0,
        }
    }

    fn record_action(&mut self, id: CombatantId, action: MeleeAction) {
        self.battle.melee.history.record(id, action);
        self.acted.push(id);
    }

    /// Resolve a strike and apply it. Free strikes skip blocking and deal
    /// reduced damage.
    fn strike(
        &mut self,
        phase: Phase,
        attacker: CombatantId,
        defender: CombatantId,
        action: MeleeAction,
        body_part: BodyPart,
        free: bool,
    ) -> StrikeOutcome {
        let (att, def) = (self.view(attacker), self.view(defender));
        debug_assert!(
            att.is_some() && def.is_some(),
            "strike between unknown combatants {attacker} -> {defender}"
        );
        let (Some(att), Some(def)) = (att, def) else {
            return StrikeOutcome::Missed;
        };

        let hit_chance = match attacker {
            CombatantId::Player => {
                let riposte = std::mem::take(&mut self.battle.melee.player.riposte);
                calc_hit_chance(self.battle.melee.player.stance, action, body_part, &att, riposte)
            }
            _ => calc_enemy_hit_chance(
                npc_base_hit_rate(&att),
                action,
                body_part,
                self.battle.melee.history.feinted_last(attacker),
                att.arm_injured,
            ),
        };
        let block_chance = if !free && self.is_guarding(defender) {
            let stance = match defender {
                CombatantId::Player => self.battle.melee.player.stance,
                _ => Stance::Balanced,
            };
            Some(calc_block_chance(stance, &def))
        } else {
            None
        };

        let strike = Strike {
            action,
            body_part,
            hit_chance,
            block_chance,
            damage_scale: if free { FREE_ATTACK_DAMAGE } else { 1.0 },
            attacker: StrikeAttacker {
                stamina: att.stamina,
                max_stamina: att.max_stamina,
                strength: att.strength,
            },
            defender_health: def.health,
        };
        let result = resolve_strike(&strike, &mut *self.rng);
        self.battle.melee.exchange_count += 1;

        if result.outcome == StrikeOutcome::Blocked && defender == CombatantId::Player {
            self.battle.melee.player.riposte = true;
        }

        let was_defeated = self.is_down(defender);
        if result.outcome.landed() {
            self.apply_damage(defender, result.damage);
            for effect in &result.effects {
                self.inflict(defender, *effect);
            }
        }

        tracing::debug!(
            round = self.round,
            %attacker,
            %defender,
            %action,
            chance = hit_chance,
            outcome = ?result.outcome,
            damage = result.damage,
            "strike resolved"
        );

        let description = match result.outcome {
            StrikeOutcome::Missed => format!("{} {action} at {} misses", att.name, def.name),
            StrikeOutcome::Blocked => format!("{} blocks {}'s {action}", def.name, att.name),
            StrikeOutcome::BlockFailed => format!(
                "{} {action} breaks {}'s guard for {}",
                att.name, def.name, result.damage
            ),
            StrikeOutcome::Hit => format!(
                "{} {action} hits {} {body_part} for {}",
                att.name, def.name, result.damage
            ),
        };
        let Some(defender_after) = self.snapshot(defender) else {
            return result.outcome;
        };
        self.push(
            phase,
            LogKind::Attack(AttackRecord {
                attacker,
                defender,
                action,
                body_part,
                hit_chance,
                outcome: result.outcome,
                damage: result.damage,
                free,
                effects: result.effects.clone(),
                defender_after,
            }),
            description,
        );

        if result.outcome.landed() {
            self.after_damage(phase, defender, result.damage, was_defeated);
        }
        result.outcome
    }

    fn is_down(&self, id: CombatantId) -> bool {
        let melee = &self.battle.melee;
        match id {
            CombatantId::Player => !self.battle.player.is_alive(),
            CombatantId::Opponent(i) => melee.opponents.get(i).is_none_or(|o| o.is_defeated()),
            CombatantId::Ally(i) => melee.allies.get(i).is_none_or(|a| !a.is_active()),
        }
    }

    fn apply_damage(&mut self, id: CombatantId, damage: i32) {
        let melee = &mut self.battle.melee;
        let health = match id {
            CombatantId::Player => Some(&mut self.battle.player.health),
            CombatantId::Opponent(i) => melee.opponents.get_mut(i).map(|o| &mut o.health),
            CombatantId::Ally(i) => melee.allies.get_mut(i).map(|a| &mut a.health),
        };
        if let Some(health) = health {
            health.adjust(-damage);
        }
    }

    /// Apply a status effect. A stun always costs exactly one of the
    /// victim's own turns.
    fn inflict(&mut self, id: CombatantId, effect: StatusEffect) {
        let turns = if self.acted.contains(&id) { 2 } else { 1 };
        let melee = &mut self.battle.melee;
        let (stun, wounds) = match id {
            CombatantId::Player => (&mut melee.player.stun_turns, &mut melee.player.wounds),
            CombatantId::Opponent(i) => match melee.opponents.get_mut(i) {
                Some(o) => (&mut o.stun_turns, &mut o.wounds),
                None => return,
            },
            CombatantId::Ally(i) => match melee.allies.get_mut(i) {
                Some(a) => (&mut a.stun_turns, &mut a.wounds),
                None => return,
            },
        };
        match effect {
            StatusEffect::Stunned => *stun = (*stun).max(turns),
            StatusEffect::ArmInjured => wounds.arm = true,
            StatusEffect::LegInjured => wounds.leg = true,
            StatusEffect::InstantKill => {}
        }
    }

    /// Morale, kill counting and death bookkeeping after a landed blow.
    fn after_damage(&mut self, phase: Phase, defender: CombatantId, damage: i32, was_down: bool) {
        match defender {
            CombatantId::Player => {
                if damage >= HEAVY_HIT_DAMAGE {
                    self.adjust_morale(MoraleReason::HeavyHit);
                }
                if !self.battle.player.is_alive() {
                    self.player_fell = true;
                    let name = self.battle.player.name.clone();
                    tracing::info!(round = self.round, "player fell");
                    self.push(phase, LogKind::PlayerFell, format!("{name} falls"));
                }
            }
            CombatantId::Opponent(index) => {
                if was_down || !self.is_down(defender) {
                    return;
                }
                let Some(opponent) = self.battle.melee.opponents.get(index) else {
                    return;
                };
                let name = opponent.name.clone();
                let routed = opponent.is_routed();
                self.battle.melee.kill_count += 1;
                self.battle.melee.history.forget(defender);
                self.enemies_defeated += 1;
                self.adjust_morale(MoraleReason::OpponentDefeated);
                tracing::info!(round = self.round, opponent = index, routed, "opponent defeated");
                let description = if routed {
                    format!("{name} breaks and flees")
                } else {
                    format!("{name} is down")
                };
                self.push(
                    phase,
                    LogKind::OpponentDefeated {
                        index,
                        name,
                        routed,
                    },
                    description,
                );
            }
            CombatantId::Ally(index) => {
                if was_down || !self.is_down(defender) {
                    return;
                }
                let Some(ally) = self.battle.melee.allies.get_mut(index) else {
                    return;
                };
                ally.alive = false;
                let death = AllyDeath {
                    name: ally.name.clone(),
                    named: ally.is_named(),
                };
                self.battle.melee.history.forget(defender);
                tracing::info!(round = self.round, ally = index, "ally fell");
                self.adjust_morale(MoraleReason::AllyFell);
                self.push(
                    phase,
                    LogKind::AllyFell {
                        index,
                        name: death.name.clone(),
                    },
                    format!("{} falls", death.name),
                );
                self.ally_deaths.push(death);
            }
        }
    }

    fn tick_stuns(&mut self) {
        let melee = &mut self.battle.melee;
        melee.player.stun_turns = melee.player.stun_turns.saturating_sub(1);
        for o in melee.opponents.iter_mut().filter(|o| !o.is_defeated()) {
            o.stun_turns = o.stun_turns.saturating_sub(1);
        }
        for a in melee.allies.iter_mut().filter(|a| a.is_active()) {
            a.stun_turns = a.stun_turns.saturating_sub(1);
        }
    }

    fn settle(&mut self, config: &MeleeConfig) -> Option<MeleeOutcome> {
        let melee = &self.battle.melee;
        let outcome = if self.player_fell {
            Some(MeleeOutcome::Defeat)
        } else if melee.all_defeated() {
            Some(MeleeOutcome::Victory)
        } else if config
            .survival
            .is_some_and(|rule| rule.applies(self.battle.player.health.current, melee))
        {
            Some(MeleeOutcome::Survived)
        } else {
            None
        };
        if let Some(outcome) = outcome {
            tracing::info!(round = self.round, %outcome, "encounter over");
            self.battle.melee.outcome = Some(outcome);
        }
        outcome
    }
}
