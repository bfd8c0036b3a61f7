use crate::{Resistance, Slot};
use serde::{Deserialize, Serialize};

/// Cost of a recipe. The interpretation of the value is up to the caller;
/// the solver only ever adds and compares costs.
pub type Cost = f64;

/// Sentinel cost of an infeasible assignment, larger than any finite sum.
pub const COST_INF: Cost = f64::INFINITY;

/// A crafting recipe: the resistances it grants, what it costs and the
/// slots it can be applied to.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Recipe {
    pub resistances: Resistance,
    pub cost: Cost,
    pub slots: Slot,
}

impl Recipe {
    pub const fn new(resistances: Resistance, cost: Cost, slots: Slot) -> Self {
        Self {
            resistances,
            cost,
            slots,
        }
    }

    /// The "leave this slot alone" recipe. Catalogs keep it at index 0.
    pub const fn null() -> Self {
        Self::new(Resistance::zero(), 0.0, Slot::ALL)
    }

    /// A null recipe grants nothing; only such entries are hidden from
    /// printed assignments.
    pub fn is_null(&self) -> bool {
        self.resistances == Resistance::zero()
    }

    pub fn applies_to(&self, slot: Slot) -> bool {
        self.slots.intersects(slot)
    }
}
