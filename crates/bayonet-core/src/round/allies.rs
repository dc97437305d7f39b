use crate::ai::choose_ally_ai;
use crate::catalog::CombatantId;

use super::RoundCtx;
use super::npc::NpcTurn;

impl RoundCtx<'_> {
    pub(super) fn allies_phase(&mut self) {
        for index in self.battle.melee.live_ally_indices() {
            let live = self.battle.melee.live_enemy_indices();
            if live.is_empty() {
                return;
            }
            let Some(ally) = self.battle.melee.allies.get(index) else {
                continue;
            };
            if !ally.is_active() {
                continue;
            }
            let choice = choose_ally_ai(ally, &self.battle.melee.opponents, &live, &mut *self.rng);
            let Some(choice) = choice else {
                return;
            };
            debug_assert!(
                live.contains(&choice.target),
                "ally AI picked opponent #{} outside the live set",
                choice.target
            );
            let target = if live.contains(&choice.target) {
                choice.target
            } else {
                live[0]
            };
            self.npc_turn(NpcTurn {
                actor: CombatantId::Ally(index),
                target: CombatantId::Opponent(target),
                action: choice.action,
                body_part: choice.body_part,
            });
            if self.player_fell {
                return;
            }
        }
    }
}
