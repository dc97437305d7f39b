//! The eight melee actions and their cost/effect profiles.

use serde::{Deserialize, Serialize};

/// A combat move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeleeAction {
    /// Standard bayonet thrust.
    BayonetThrust,
    /// Committed lunge: heavy damage, harder to land.
    AggressiveLunge,
    /// Musket-butt blow: accurate, light, can stun.
    ButtStrike,
    /// Drains the target's stamina and sets up the next blow.
    Feint,
    /// Block incoming attacks until the next action.
    Guard,
    /// Catch breath: restores stamina but invites a free attack.
    Respite,
    /// Fire a loaded musket.
    Shoot,
    /// Work the ramrod; two in a row load the musket.
    Reload,
}

/// Balance profile of an action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionDef {
    /// Stamina spent. Negative restores.
    pub stamina: i32,
    /// Added to hit chance.
    pub hit_bonus: f64,
    /// Multiplier on the body part's damage roll.
    pub damage_mod: f64,
    /// Whether the action is a damaging attack.
    pub is_attack: bool,
    /// Added to the stun chance of a landed blow.
    pub stun_bonus: f64,
}

/// Stamina drained from the target of a feint.
pub const FEINT_STAMINA_DRAIN: i32 = 25;

/// Damage fraction of the free attack granted by respite and reload.
pub const FREE_ATTACK_DAMAGE: f64 = 0.70;

/// Consecutive reloads needed to load the musket.
pub const RELOAD_STEPS: u8 = 2;

const BAYONET_THRUST: ActionDef = ActionDef {
    stamina: 20,
    hit_bonus: 0.0,
    damage_mod: 1.0,
    is_attack: true,
    stun_bonus: 0.0,
};

const AGGRESSIVE_LUNGE: ActionDef = ActionDef {
    stamina: 38,
    hit_bonus: -0.10,
    damage_mod: 1.5,
    is_attack: true,
    stun_bonus: 0.0,
};

const BUTT_STRIKE: ActionDef = ActionDef {
    stamina: 26,
    hit_bonus: 0.15,
    damage_mod: 0.6,
    is_attack: true,
    stun_bonus: 0.20,
};

const FEINT: ActionDef = ActionDef {
    stamina: 14,
    hit_bonus: 0.0,
    damage_mod: 0.0,
    is_attack: false,
    stun_bonus: 0.0,
};

const GUARD: ActionDef = ActionDef {
    stamina: 6,
    hit_bonus: 0.0,
    damage_mod: 0.0,
    is_attack: false,
    stun_bonus: 0.0,
};

const RESPITE: ActionDef = ActionDef {
    stamina: -35,
    hit_bonus: 0.0,
    damage_mod: 0.0,
    is_attack: false,
    stun_bonus: 0.0,
};

const SHOOT: ActionDef = ActionDef {
    stamina: 8,
    hit_bonus: 0.10,
    damage_mod: 2.0,
    is_attack: true,
    stun_bonus: 0.0,
};

const RELOAD: ActionDef = ActionDef {
    stamina: 14,
    hit_bonus: 0.0,
    damage_mod: 0.0,
    is_attack: false,
    stun_bonus: 0.0,
};

impl MeleeAction {
    /// Every action, in display order.
    pub const ALL: [MeleeAction; 8] = [
        MeleeAction::BayonetThrust,
        MeleeAction::AggressiveLunge,
        MeleeAction::ButtStrike,
        MeleeAction::Feint,
        MeleeAction::Guard,
        MeleeAction::Respite,
        MeleeAction::Shoot,
        MeleeAction::Reload,
    ];

    /// The balance profile for this action.
    pub fn def(self) -> &'static ActionDef {
        match self {
            Self::BayonetThrust => &BAYONET_THRUST,
            Self::AggressiveLunge => &AGGRESSIVE_LUNGE,
            Self::ButtStrike => &BUTT_STRIKE,
            Self::Feint => &FEINT,
            Self::Guard => &GUARD,
            Self::Respite => &RESPITE,
            Self::Shoot => &SHOOT,
            Self::Reload => &RELOAD,
        }
    }

    /// Shorthand for `def().is_attack`.
    pub fn is_attack(self) -> bool {
        self.def().is_attack
    }

    /// Ranged actions roll musketry instead of elan.
    pub fn is_ranged(self) -> bool {
        matches!(self, Self::Shoot)
    }

    /// Actions that drop the player's guard and invite a free attack.
    pub fn grants_free_attack(self) -> bool {
        matches!(self, Self::Respite | Self::Reload)
    }

    /// Actions aimed at a particular opponent.
    pub fn needs_target(self) -> bool {
        self.is_attack() || matches!(self, Self::Feint)
    }

    /// Parse a snake_case or spaced action name.
    pub fn from_name(s: &str) -> Option<Self> {
        let key = s.trim().to_lowercase().replace([' ', '-'], "_");
        Self::ALL.into_iter().find(|a| a.to_string() == key)
    }
}

impl std::fmt::Display for MeleeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::BayonetThrust => "bayonet_thrust",
            Self::AggressiveLunge => "aggressive_lunge",
            Self::ButtStrike => "butt_strike",
            Self::Feint => "feint",
            Self::Guard => "guard",
            Self::Respite => "respite",
            Self::Shoot => "shoot",
            Self::Reload => "reload",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn respite_is_the_only_restoring_action() {
        for action in MeleeAction::ALL {
            if action == MeleeAction::Respite {
                assert!(action.def().stamina < 0);
            } else {
                assert!(action.def().stamina >= 0, "{action} restores stamina");
            }
        }
    }

    #[test]
    fn attacks_carry_damage() {
        for action in MeleeAction::ALL {
            let def = action.def();
            assert_eq!(def.is_attack, def.damage_mod > 0.0, "{action}");
        }
    }

    #[test]
    fn butt_strike_can_stun() {
        assert!(MeleeAction::ButtStrike.def().stun_bonus > 0.0);
        assert!(MeleeAction::BayonetThrust.def().stun_bonus.abs() < f64::EPSILON);
    }

    #[test]
    fn free_attack_triggers() {
        let granting: Vec<_> = MeleeAction::ALL
            .into_iter()
            .filter(|a| a.grants_free_attack())
            .collect();
        assert_eq!(granting, vec![MeleeAction::Respite, MeleeAction::Reload]);
    }

    #[test]
    fn feint_targets_but_does_not_attack() {
        assert!(MeleeAction::Feint.needs_target());
        assert!(!MeleeAction::Feint.is_attack());
        assert!(!MeleeAction::Guard.needs_target());
    }

    #[test]
    fn parse_names() {
        assert_eq!(
            MeleeAction::from_name("Aggressive Lunge"),
            Some(MeleeAction::AggressiveLunge)
        );
        assert_eq!(
            MeleeAction::from_name("butt-strike"),
            Some(MeleeAction::ButtStrike)
        );
        assert_eq!(MeleeAction::from_name("charge"), None);
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&MeleeAction::BayonetThrust).unwrap();
        assert_eq!(json, "\"bayonet_thrust\"");
    }
}
