//! Clamped vital statistics (health, stamina, fatigue, morale).
//!
//! Every mutation goes through [`Vital::adjust`] or [`Vital::set`], which
//! clamp to `0..=max` immediately. A negative reading is never observable.

use serde::{Deserialize, Serialize};

/// A non-negative value with an upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vital {
    /// Current value.
    pub current: i32,
    /// Maximum value.
    pub max: i32,
}

impl Vital {
    /// A vital starting at its maximum.
    pub fn full(max: i32) -> Self {
        let max = max.max(0);
        Self { current: max, max }
    }

    /// A vital with an explicit starting value, clamped into range.
    pub fn new(current: i32, max: i32) -> Self {
        let max = max.max(0);
        Self {
            current: current.clamp(0, max),
            max,
        }
    }

    /// A vital starting empty.
    pub fn empty(max: i32) -> Self {
        Self::new(0, max)
    }

    /// Adjust by `delta`, clamping. Returns the change actually applied.
    pub fn adjust(&mut self, delta: i32) -> i32 {
        let before = self.current;
        self.current = (self.current.saturating_add(delta)).clamp(0, self.max);
        self.current - before
    }

    /// Overwrite the current value, clamping.
    pub fn set(&mut self, value: i32) {
        self.current = value.clamp(0, self.max);
    }

    /// True at zero.
    pub fn is_empty(&self) -> bool {
        self.current <= 0
    }

    /// True at the maximum.
    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    /// Filled fraction in `0.0..=1.0`. A zero-max vital reads as full.
    pub fn fraction(&self) -> f64 {
        if self.max <= 0 {
            return 1.0;
        }
        self.current as f64 / self.max as f64
    }
}

impl std::fmt::Display for Vital {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.current, self.max)
    }
}
