use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::ops::{Add, Sub};

/// 4-tuple of elemental resistances.
///
/// Addition is component-wise and unsaturated; callers guarantee components
/// stay within the table dimensions. Subtraction clamps each component at
/// zero, which is what lets the dynamic program treat requirements as
/// "at least" thresholds on the table boundary.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Resistance {
    pub fire: u16,
    pub cold: u16,
    pub lightning: u16,
    pub chaos: u16,
}

impl Resistance {
    pub const fn new(fire: u16, cold: u16, lightning: u16, chaos: u16) -> Self {
        Self {
            fire,
            cold,
            lightning,
            chaos,
        }
    }

    pub const fn zero() -> Self {
        Self::new(0, 0, 0, 0)
    }

    fn all_le(&self, other: &Self) -> bool {
        self.fire <= other.fire
            && self.cold <= other.cold
            && self.lightning <= other.lightning
            && self.chaos <= other.chaos
    }
}

impl Add for Resistance {
    type Output = Resistance;

    fn add(self, other: Resistance) -> Resistance {
        Resistance::new(
            self.fire + other.fire,
            self.cold + other.cold,
            self.lightning + other.lightning,
            self.chaos + other.chaos,
        )
    }
}

impl Sub for Resistance {
    type Output = Resistance;

    /// Component-wise subtraction saturating at zero.
    fn sub(self, other: Resistance) -> Resistance {
        Resistance::new(
            self.fire.saturating_sub(other.fire),
            self.cold.saturating_sub(other.cold),
            self.lightning.saturating_sub(other.lightning),
            self.chaos.saturating_sub(other.chaos),
        )
    }
}

/// Component-wise partial order: `a <= b` holds iff every component of `a`
/// is `<=` the corresponding component of `b`. Mixed tuples are incomparable.
impl PartialOrd for Resistance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            Some(Ordering::Equal)
        } else if self.all_le(other) {
            Some(Ordering::Less)
        } else if other.all_le(self) {
            Some(Ordering::Greater)
        } else {
            None
        }
    }
}
