//! Percentage value object (0-100 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A whole-number value between 0 and 100 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(u8);

impl Percentage {
    /// Zero percent.
    pub const ZERO: Self = Self(0);

    /// One hundred percent.
    pub const HUNDRED: Self = Self(100);

    /// Creates a new Percentage, clamping to valid range.
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// `floor(100 * part / whole)`, clamped to 100.
    ///
    /// A zero `whole` yields zero.
    pub fn from_ratio(part: u64, whole: u64) -> Self {
        if whole == 0 {
            return Self::ZERO;
        }
        let scaled = u128::from(part) * 100 / u128::from(whole);
        Self(scaled.min(100) as u8)
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// True once the value has reached 100.
    pub fn is_complete(&self) -> bool {
        self.0 >= 100
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_new_clamps_to_100() {
        assert_eq!(Percentage::new(50).value(), 50);
        assert_eq!(Percentage::new(101).value(), 100);
        assert_eq!(Percentage::new(255).value(), 100);
    }

    #[test]
    fn from_ratio_truncates() {
        assert_eq!(Percentage::from_ratio(1, 3).value(), 33);
        assert_eq!(Percentage::from_ratio(2, 3).value(), 66);
        assert_eq!(Percentage::from_ratio(99, 100).value(), 99);
    }

    #[test]
    fn from_ratio_clamps_overshoot() {
        assert_eq!(Percentage::from_ratio(105, 100), Percentage::HUNDRED);
        assert_eq!(Percentage::from_ratio(u64::MAX, 1), Percentage::HUNDRED);
    }

    #[test]
    fn from_ratio_of_zero_whole_is_zero() {
        assert_eq!(Percentage::from_ratio(10, 0), Percentage::ZERO);
    }

    #[test]
    fn is_complete_only_at_hundred() {
        assert!(Percentage::HUNDRED.is_complete());
        assert!(!Percentage::new(99).is_complete());
    }

    #[test]
    fn percentage_displays_and_serializes() {
        assert_eq!(format!("{}", Percentage::new(75)), "75%");
        assert_eq!(serde_json::to_string(&Percentage::new(42)).unwrap(), "42");
    }
}
