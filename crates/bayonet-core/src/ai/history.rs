//! Per-encounter action history.
//!
//! Lives on `MeleeState`, so two encounters simulated side by side never see
//! each other's patterns.

use serde::{Deserialize, Serialize};

use crate::catalog::{CombatantId, MeleeAction};

/// How many recent actions are kept per combatant.
pub const HISTORY_DEPTH: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Trail {
    actor: CombatantId,
    recent: Vec<MeleeAction>,
}

/// Recent actions of every combatant in an encounter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeleeHistory {
    trails: Vec<Trail>,
}

impl MeleeHistory {
    /// An empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an action, keeping the last [`HISTORY_DEPTH`].
    pub fn record(&mut self, actor: CombatantId, action: MeleeAction) {
        let idx = match self.trails.iter().position(|t| t.actor == actor) {
            Some(idx) => idx,
            None => {
                self.trails.push(Trail {
                    actor,
                    recent: Vec::with_capacity(HISTORY_DEPTH),
                });
                self.trails.len() - 1
            }
        };
        let recent = &mut self.trails[idx].recent;
        recent.push(action);
        if recent.len() > HISTORY_DEPTH {
            recent.remove(0);
        }
    }

    /// Recent actions, oldest first.
    pub fn recent(&self, actor: CombatantId) -> &[MeleeAction] {
        self.trails
            .iter()
            .find(|t| t.actor == actor)
            .map(|t| t.recent.as_slice())
            .unwrap_or(&[])
    }

    /// The most recent action.
    pub fn last(&self, actor: CombatantId) -> Option<MeleeAction> {
        self.recent(actor).last().copied()
    }

    /// Whether the actor's previous action was a feint.
    pub fn feinted_last(&self, actor: CombatantId) -> bool {
        self.last(actor) == Some(MeleeAction::Feint)
    }

    /// Whether choosing `action` would make it three in a row.
    pub fn would_triple(&self, actor: CombatantId, action: MeleeAction) -> bool {
        let recent = self.recent(actor);
        recent.len() >= 2 && recent[recent.len() - 2..].iter().all(|a| *a == action)
    }

    /// Forget a combatant.
    pub fn forget(&mut self, actor: CombatantId) {
        self.trails.retain(|t| t.actor != actor);
    }

    /// Number of combatants tracked.
    pub fn len(&self) -> usize {
        self.trails.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.trails.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_bounded_trail() {
        let mut h = MeleeHistory::new();
        let who = CombatantId::Opponent(0);
        for action in [
            MeleeAction::Guard,
            MeleeAction::Feint,
            MeleeAction::BayonetThrust,
            MeleeAction::AggressiveLunge,
        ] {
            h.record(who, action);
        }
        assert_eq!(
            h.recent(who),
            &[
                MeleeAction::Feint,
                MeleeAction::BayonetThrust,
                MeleeAction::AggressiveLunge
            ]
        );
        assert_eq!(h.last(who), Some(MeleeAction::AggressiveLunge));
    }

    #[test]
    fn feint_mark() {
        let mut h = MeleeHistory::new();
        let who = CombatantId::Ally(1);
        assert!(!h.feinted_last(who));
        h.record(who, MeleeAction::Feint);
        assert!(h.feinted_last(who));
        h.record(who, MeleeAction::BayonetThrust);
        assert!(!h.feinted_last(who));
    }

    #[test]
    fn triple_detection() {
        let mut h = MeleeHistory::new();
        let who = CombatantId::Opponent(3);
        h.record(who, MeleeAction::AggressiveLunge);
        assert!(!h.would_triple(who, MeleeAction::AggressiveLunge));
        h.record(who, MeleeAction::AggressiveLunge);
        assert!(h.would_triple(who, MeleeAction::AggressiveLunge));
        assert!(!h.would_triple(who, MeleeAction::Feint));
    }

    #[test]
    fn actors_are_isolated() {
        let mut h = MeleeHistory::new();
        h.record(CombatantId::Opponent(0), MeleeAction::Feint);
        assert!(h.recent(CombatantId::Opponent(1)).is_empty());
        h.forget(CombatantId::Opponent(0));
        assert!(h.is_empty());
    }
}
