//! Minimum-cost assignment of crafting recipes to equipment slots.
//!
//! The solvers run a dynamic program over the dense 4D resistance grid: for
//! each slot in turn, every grid cell asks which applicable recipe reaches it
//! most cheaply from the previous layer. [`ParallelSolver`] sweeps the grid
//! with a work-stealing thread pool; [`CudaSolver`] (behind the `cuda`
//! feature) runs one device thread per cell.

#[cfg(feature = "cuda")]
mod cuda;
mod error;
mod parallel;
mod reassign;

#[cfg(feature = "cuda")]
pub use cuda::CudaSolver;
pub use error::{SolverError, SolverResult};
pub use parallel::ParallelSolver;
pub use reassign::find_minimal_reassignment;

use loadout_core::{Assignment, Cost, Recipe, Resistance, ResistanceGrid, Slot, SlotAssignment};

/// Maximal number of equipment slots a single solve can take.
pub const MAX_SLOT_COUNT: usize = 16;

/// Maximal number of recipe variants, bounded by the 8-bit back-pointer
/// indices the cost tables store.
pub const MAX_RECIPE_COUNT: usize = u8::MAX as usize;

/// A minimum-cost assignment engine.
///
/// Engines own their tables; a solve reuses the buffers of the previous one
/// and grows them when the requirement does. They are movable but not
/// copyable, and a single engine must not run two solves at once (which
/// `&mut self` already enforces).
pub trait AssignmentSolver {
    /// Identifier of this engine.
    fn name(&self) -> &'static str;

    /// Allocate tables for requirements up to `max_required`. Solving above
    /// the initialized bound is allowed and grows the tables.
    fn initialize(&mut self, max_required: Resistance, max_recipes: usize);

    /// Find the cheapest assignment of `recipes` to `slots` whose summed
    /// resistances are at least `required` in every component.
    ///
    /// Catalogs should keep the null recipe at index 0 so that leaving a
    /// slot empty is always an option. Returns `Assignment::invalid()` when
    /// no combination reaches `required`.
    fn solve(
        &mut self,
        required: Resistance,
        slots: &[Slot],
        recipes: &[Recipe],
    ) -> SolverResult<Assignment>;
}

/// Check the problem bounds shared by every engine.
fn check_limits(slots: &[Slot], recipes: &[Recipe]) -> SolverResult<()> {
    if recipes.len() > MAX_RECIPE_COUNT {
        return Err(SolverError::TooManyRecipes {
            count: recipes.len(),
            max: MAX_RECIPE_COUNT,
        });
    }
    if slots.len() > MAX_SLOT_COUNT {
        return Err(SolverError::TooManySlots {
            count: slots.len(),
            max: MAX_SLOT_COUNT,
        });
    }
    Ok(())
}

/// Recover the chosen recipes from the per-step back-pointer slabs.
///
/// Starting at the requirement cell, each step records which recipe the best
/// path used; stepping to the predecessor cell is a saturating subtraction
/// of that recipe's resistances. Null recipes are dropped from the listing,
/// their zero cost is already part of `cost`.
fn walk_back(
    grid: &ResistanceGrid,
    required: Resistance,
    slots: &[Slot],
    recipes: &[Recipe],
    back_pointers: &[Vec<u8>],
    cost: Cost,
) -> Assignment {
    let mut picks = Vec::with_capacity(slots.len());
    let mut value = required;
    for step in (0..slots.len()).rev() {
        let recipe = recipes[back_pointers[step][grid.index_of(value)] as usize];
        value = value - recipe.resistances;
        picks.push(SlotAssignment {
            slot: slots[step],
            recipe,
        });
    }
    picks.reverse();
    picks.retain(|pick| !pick.recipe.is_null());
    Assignment {
        assignments: picks,
        cost,
    }
}
