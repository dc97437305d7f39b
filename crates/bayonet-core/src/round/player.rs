use crate::catalog::action::{FEINT_STAMINA_DRAIN, RELOAD_STEPS};
use crate::catalog::{BodyPart, CombatantId, MeleeAction};
use crate::log::{LogKind, Phase};

use super::{PlayerIntent, RoundCtx};

impl RoundCtx<'_> {
    pub(super) fn player_phase(&mut self, intent: &PlayerIntent) {
        let live = self.battle.melee.live_enemy_indices();
        if live.is_empty() {
            return;
        }
        let me = CombatantId::Player;
        self.set_guarding(me, false);

        if self.battle.melee.player.stun_turns > 0 {
            let name = self.battle.player.name.clone();
            self.push(
                Phase::Player,
                LogKind::StunnedTurn { actor: me },
                format!("{name} is stunned and can only guard"),
            );
        }

        let action = intent.action;
        let target = intent
            .target
            .filter(|t| live.contains(t))
            .unwrap_or(live[0]);
        let target_id = CombatantId::Opponent(target);

        let restored = self.pay_stamina(me, action);
        if action != MeleeAction::Reload {
            self.battle.melee.player.reload_progress = 0;
        }
        self.record_action(me, action);

        match action {
            MeleeAction::Guard => {
                self.set_guarding(me, true);
                self.push(Phase::Player, LogKind::Guard { actor: me }, "guard raised");
            }
            MeleeAction::Respite => {
                self.push(
                    Phase::Player,
                    LogKind::Respite {
                        actor: me,
                        restored,
                    },
                    format!("catches breath, +{restored} stamina"),
                );
                self.free_attack(target);
            }
            MeleeAction::Reload => {
                let status = &mut self.battle.melee.player;
                status.reload_progress = status.reload_progress.saturating_add(1);
                let progress = status.reload_progress;
                let loaded = progress >= RELOAD_STEPS;
                if loaded {
                    status.reload_progress = 0;
                    self.battle.player.musket_loaded = true;
                }
                self.push(
                    Phase::Player,
                    LogKind::Reload { progress, loaded },
                    if loaded {
                        "musket loaded".to_string()
                    } else {
                        format!("reloading ({progress}/{RELOAD_STEPS})")
                    },
                );
                self.free_attack(target);
            }
            MeleeAction::Feint => {
                let drained = self.drain_stamina(target_id, FEINT_STAMINA_DRAIN);
                let name = self.battle.melee.opponents[target].name.clone();
                self.push(
                    Phase::Player,
                    LogKind::Feint {
                        actor: me,
                        target: target_id,
                        drained,
                    },
                    format!("feints at {name}, -{drained} stamina"),
                );
            }
            MeleeAction::BayonetThrust
            | MeleeAction::AggressiveLunge
            | MeleeAction::ButtStrike
            | MeleeAction::Shoot => {
                if action == MeleeAction::Shoot {
                    self.battle.player.musket_loaded = false;
                }
                self.strike(Phase::Player, me, target_id, action, intent.body_part, false);
            }
        }
    }

    /// The engaged opponent punishes a dropped guard.
    fn free_attack(&mut self, target: usize) {
        let able = self
            .battle
            .melee
            .opponents
            .get(target)
            .is_some_and(|o| !o.is_defeated() && !o.is_stunned());
        if !able {
            return;
        }
        self.strike(
            Phase::Player,
            CombatantId::Opponent(target),
            CombatantId::Player,
            MeleeAction::BayonetThrust,
            BodyPart::Torso,
            true,
        );
    }
}
