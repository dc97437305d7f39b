//! Combat postures.

use serde::{Deserialize, Serialize};

/// The player's posture, trading attack odds against defence and stamina.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stance {
    /// Press the attack: better odds to hit, easier to be hit, more tiring.
    Aggressive,
    /// No modifiers.
    #[default]
    Balanced,
    /// Hang back: worse odds to hit, better blocks, less tiring.
    Defensive,
}

/// Modifiers a stance applies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StanceDef {
    /// Added to hit chance.
    pub attack: f64,
    /// Added to block chance.
    pub defense: f64,
    /// Multiplier on positive stamina costs.
    pub stamina_cost: f64,
}

const AGGRESSIVE: StanceDef = StanceDef {
    attack: 0.20,
    defense: -0.15,
    stamina_cost: 1.2,
};

const BALANCED: StanceDef = StanceDef {
    attack: 0.0,
    defense: 0.0,
    stamina_cost: 1.0,
};

const DEFENSIVE: StanceDef = StanceDef {
    attack: -0.15,
    defense: 0.20,
    stamina_cost: 0.8,
};

impl Stance {
    /// Every stance, in display order.
    pub const ALL: [Stance; 3] = [Stance::Aggressive, Stance::Balanced, Stance::Defensive];

    /// The modifier table for this stance.
    pub fn def(self) -> &'static StanceDef {
        match self {
            Self::Aggressive => &AGGRESSIVE,
            Self::Balanced => &BALANCED,
            Self::Defensive => &DEFENSIVE,
        }
    }

    /// Parse a stance name (case-insensitive).
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "aggressive" => Some(Self::Aggressive),
            "balanced" => Some(Self::Balanced),
            "defensive" => Some(Self::Defensive),
            _ => None,
        }
    }
}

impl std::fmt::Display for Stance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Aggressive => write!(f, "aggressive"),
            Self::Balanced => write!(f, "balanced"),
            Self::Defensive => write!(f, "defensive"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggressive_trades_defense_for_attack() {
        let a = Stance::Aggressive.def();
        assert!(a.attack > 0.0);
        assert!(a.defense < 0.0);
        assert!(a.stamina_cost > 1.0);
    }

    #[test]
    fn defensive_mirrors_aggressive() {
        let d = Stance::Defensive.def();
        assert!(d.attack < 0.0);
        assert!(d.defense > 0.0);
        assert!(d.stamina_cost < 1.0);
    }

    #[test]
    fn balanced_is_neutral() {
        assert_eq!(*Stance::default().def(), BALANCED);
    }

    #[test]
    fn from_name_roundtrips_display() {
        for stance in Stance::ALL {
            assert_eq!(Stance::from_name(&stance.to_string()), Some(stance));
        }
        assert_eq!(Stance::from_name("reckless"), None);
    }
}
