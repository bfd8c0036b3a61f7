//! Data model shared by the solver engines and the CLI: resistance 4-tuples,
//! equipment slot masks, crafting recipes and the dense linearization of the
//! 4D resistance grid used by the dynamic program.

mod assignment;
mod equipment;
mod grid;
mod recipe;
mod resistance;
mod slot;

pub use assignment::{Assignment, SlotAssignment};
pub use equipment::Equipment;
pub use grid::ResistanceGrid;
pub use recipe::{Cost, Recipe, COST_INF};
pub use resistance::Resistance;
pub use slot::{Slot, UnknownSlotError};
