use crate::catalog::action::FEINT_STAMINA_DRAIN;
use crate::catalog::{BodyPart, CombatantId, MeleeAction};
use crate::log::{LogKind, Phase};

use super::RoundCtx;

/// One NPC action, already decided by the AI.
pub(super) struct NpcTurn {
    pub actor: CombatantId,
    pub target: CombatantId,
    pub action: MeleeAction,
    pub body_part: BodyPart,
}

impl RoundCtx<'_> {
    /// Carry out an ally's or opponent's chosen action.
    pub(super) fn npc_turn(&mut self, turn: NpcTurn) {
        let NpcTurn {
            actor,
            target,
            action,
            body_part,
        } = turn;
        let phase = match actor {
            CombatantId::Ally(_) => Phase::Allies,
            _ => Phase::Enemies,
        };
        let Some(view) = self.view(actor) else {
            return;
        };
        self.set_guarding(actor, false);

        if view.stunned {
            self.push(
                phase,
                LogKind::StunnedTurn { actor },
                format!("{} is stunned", view.name),
            );
        }

        let restored = self.pay_stamina(actor, action);
        match action {
            MeleeAction::Guard => {
                self.set_guarding(actor, true);
                self.push(phase, LogKind::Guard { actor }, format!("{} guards", view.name));
            }
            MeleeAction::Respite => {
                self.push(
                    phase,
                    LogKind::Respite { actor, restored },
                    format!("{} catches breath, +{restored} stamina", view.name),
                );
            }
            MeleeAction::Feint => {
                let drained = self.drain_stamina(target, FEINT_STAMINA_DRAIN);
                self.push(
                    phase,
                    LogKind::Feint {
                        actor,
                        target,
                        drained,
                    },
                    format!("{} feints, -{drained} stamina to {target}", view.name),
                );
            }
            MeleeAction::Reload => {}
            MeleeAction::BayonetThrust
            | MeleeAction::AggressiveLunge
            | MeleeAction::ButtStrike
            | MeleeAction::Shoot => {
                self.strike(phase, actor, target, action, body_part, false);
            }
        }
        self.record_action(actor, action);
    }
}
