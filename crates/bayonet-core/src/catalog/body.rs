//! Body targets.

use serde::{Deserialize, Serialize};

/// Where a blow is aimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyPart {
    /// Hardest to hit; may stun or kill outright.
    Head,
    /// Easiest to hit.
    Torso,
    /// May injure the arm.
    Arms,
    /// May injure the leg.
    Legs,
}

/// Hit modifier and damage range for a body part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyPartDef {
    /// Added to hit chance.
    pub hit_mod: f64,
    /// Lowest base damage.
    pub damage_min: i32,
    /// Highest base damage (inclusive).
    pub damage_max: i32,
}

impl BodyPart {
    /// Every body part, in display order.
    pub const ALL: [BodyPart; 4] = [
        BodyPart::Head,
        BodyPart::Torso,
        BodyPart::Arms,
        BodyPart::Legs,
    ];

    /// The modifier table for this body part.
    pub fn def(self) -> &'static BodyPartDef {
        match self {
            Self::Head => &HEAD,
            Self::Torso => &TORSO,
            Self::Arms => &ARMS,
            Self::Legs => &LEGS,
        }
    }

    /// Parse a body part name (case-insensitive).
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "head" => Some(Self::Head),
            "torso" | "body" => Some(Self::Torso),
            "arms" | "arm" => Some(Self::Arms),
            "legs" | "leg" => Some(Self::Legs),
            _ => None,
        }
    }
}

const HEAD: BodyPartDef = BodyPartDef {
    hit_mod: -0.25,
    damage_min: 25,
    damage_max: 35,
};

const TORSO: BodyPartDef = BodyPartDef {
    hit_mod: 0.0,
    damage_min: 15,
    damage_max: 25,
};

const ARMS: BodyPartDef = BodyPartDef {
    hit_mod: -0.10,
    damage_min: 10,
    damage_max: 15,
};

const LEGS: BodyPartDef = BodyPartDef {
    hit_mod: -0.15,
    damage_min: 10,
    damage_max: 20,
};

impl std::fmt::Display for BodyPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Head => write!(f, "head"),
            Self::Torso => write!(f, "torso"),
            Self::Arms => write!(f, "arms"),
            Self::Legs => write!(f, "legs"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn head_hardest_torso_easiest() {
        let hardest = BodyPart::ALL
            .iter()
            .min_by(|a, b| a.def().hit_mod.total_cmp(&b.def().hit_mod))
            .copied();
        let easiest = BodyPart::ALL
            .iter()
            .max_by(|a, b| a.def().hit_mod.total_cmp(&b.def().hit_mod))
            .copied();
        assert_eq!(hardest, Some(BodyPart::Head));
        assert_eq!(easiest, Some(BodyPart::Torso));
    }

    #[test]
    fn ranges_are_ordered() {
        for part in BodyPart::ALL {
            let d = part.def();
            assert!(d.damage_min >= 1);
            assert!(d.damage_min <= d.damage_max, "{part}");
        }
    }

    #[test]
    fn parse_aliases() {
        assert_eq!(BodyPart::from_name("Leg"), Some(BodyPart::Legs));
        assert_eq!(BodyPart::from_name("body"), Some(BodyPart::Torso));
        assert_eq!(BodyPart::from_name("tail"), None);
    }
}
