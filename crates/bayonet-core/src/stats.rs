//! Stat utilities shared with the wider battle model.

/// Percentage penalty for fighting tired: `0`, `-5`, `-10` or `-15`.
///
/// Bands are on the stamina fraction: at or above 75% no penalty, then one
/// step per quarter.
pub fn fatigue_debuff(stamina: i32, max_stamina: i32) -> i32 {
    if max_stamina <= 0 {
        return 0;
    }
    let fraction = stamina.max(0) as f64 / max_stamina as f64;
    if fraction >= 0.75 {
        0
    } else if fraction >= 0.50 {
        -5
    } else if fraction >= 0.25 {
        -10
    } else {
        -15
    }
}

/// [`fatigue_debuff`] as an additive probability term.
pub fn fatigue_term(stamina: i32, max_stamina: i32) -> f64 {
    fatigue_debuff(stamina, max_stamina) as f64 / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debuff_bands() {
        assert_eq!(fatigue_debuff(100, 100), 0);
        assert_eq!(fatigue_debuff(75, 100), 0);
        assert_eq!(fatigue_debuff(74, 100), -5);
        assert_eq!(fatigue_debuff(50, 100), -5);
        assert_eq!(fatigue_debuff(30, 100), -10);
        assert_eq!(fatigue_debuff(10, 100), -15);
        assert_eq!(fatigue_debuff(0, 100), -15);
    }

    #[test]
    fn zero_max_is_neutral() {
        assert_eq!(fatigue_debuff(0, 0), 0);
    }

    #[test]
    fn term_is_fractional() {
        assert!((fatigue_term(10, 100) + 0.15).abs() < 1e-9);
    }
}
