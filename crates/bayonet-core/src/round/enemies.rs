use crate::ai::{choose_enemy_target, choose_melee_ai};
use crate::catalog::CombatantId;

use super::RoundCtx;
use super::npc::NpcTurn;

impl RoundCtx<'_> {
    pub(super) fn enemies_phase(&mut self) {
        for index in self.battle.melee.live_enemy_indices() {
            let melee = &self.battle.melee;
            let Some(opponent) = melee.opponents.get(index) else {
                continue;
            };
            if opponent.is_defeated() {
                continue;
            }
            let choice = choose_melee_ai(index, opponent, &melee.history, &mut *self.rng);
            let target = if choice.action.needs_target() {
                choose_enemy_target(opponent, &self.battle.player, &melee.allies, &mut *self.rng)
            } else {
                CombatantId::Player
            };
            debug_assert!(
                !self.is_down(target),
                "enemy AI picked a fallen target {target}"
            );
            self.npc_turn(NpcTurn {
                actor: CombatantId::Opponent(index),
                target,
                action: choice.action,
                body_part: choice.body_part,
            });
            if self.player_fell {
                return;
            }
        }
    }
}
