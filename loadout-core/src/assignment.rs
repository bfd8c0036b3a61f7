use crate::{Cost, Recipe, Resistance, Slot, COST_INF};
use serde::{Deserialize, Serialize};

/// One chosen recipe and the physical slot it goes into.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SlotAssignment {
    pub slot: Slot,
    pub recipe: Recipe,
}

/// Assignment of recipes to equipment slots.
///
/// An infeasible problem is reported as an assignment with `cost == COST_INF`
/// and an empty list; it is a valid result, not an error.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Assignment {
    pub assignments: Vec<SlotAssignment>,
    pub cost: Cost,
}

impl Assignment {
    pub fn invalid() -> Self {
        Self {
            assignments: Vec::new(),
            cost: COST_INF,
        }
    }

    pub fn empty() -> Self {
        Self {
            assignments: Vec::new(),
            cost: 0.0,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.cost < COST_INF
    }

    /// Sum of the resistances granted by every listed recipe.
    pub fn total_resistances(&self) -> Resistance {
        self.assignments
            .iter()
            .fold(Resistance::zero(), |total, a| total + a.recipe.resistances)
    }
}

impl Default for Assignment {
    fn default() -> Self {
        Self::invalid()
    }
}
