use crate::{Resistance, Slot};
use serde::{Deserialize, Serialize};

/// A currently equipped item. Only the reassignment planner looks at these.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Equipment {
    pub slot: Slot,
    /// Resistances crafted onto the item. Forfeited if the item is re-crafted.
    pub crafted: Resistance,
    /// Resistances the item rolls on its own.
    pub base: Resistance,
    pub is_craftable: bool,
    /// True iff this item replaces an old item in the same slot.
    pub is_new: bool,
}

impl Equipment {
    pub const fn new(
        slot: Slot,
        crafted: Resistance,
        base: Resistance,
        is_craftable: bool,
        is_new: bool,
    ) -> Self {
        Self {
            slot,
            crafted,
            base,
            is_craftable,
            is_new,
        }
    }

    pub fn all_resistances(&self) -> Resistance {
        self.crafted + self.base
    }
}
