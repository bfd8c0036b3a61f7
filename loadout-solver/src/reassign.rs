use crate::{AssignmentSolver, SolverError, SolverResult, MAX_SLOT_COUNT};
use loadout_core::{Assignment, Equipment, Recipe, Resistance};
use logging_timer::time;

/// Decide which equipped items to re-craft so that the character reaches
/// `target` resistances after swapping in the new items.
///
/// Items marked new replace the old item in the same slot; the baseline is
/// updated with the difference and the replaced items drop out of the
/// candidate set. Every non-empty subset of the remaining candidates is then
/// solved as an ordinary assignment problem. Re-crafting an item forfeits
/// whatever was crafted on it, so each subset's requirement grows by the
/// crafted resistances it gives up.
///
/// Subsets are enumerated in ascending binary order and ties keep the first
/// subset encountered, which makes the result deterministic. The candidate
/// count is capped at [`MAX_SLOT_COUNT`]; the `2^k` enumeration makes much
/// smaller caps advisable anyway.
#[time]
pub fn find_minimal_reassignment<S: AssignmentSolver + ?Sized>(
    solver: &mut S,
    current: Resistance,
    target: Resistance,
    items: &[Equipment],
    recipes: &[Recipe],
) -> SolverResult<Assignment> {
    solver.initialize(target, recipes.len());

    // Apply the replacements to the baseline; everything else stays a
    // candidate for crafting.
    let mut baseline = current;
    let mut candidates: Vec<&Equipment> = Vec::with_capacity(items.len());
    for item in items {
        if item.is_new {
            candidates.push(item);
        } else if let Some(replacement) = items
            .iter()
            .find(|other| other.is_new && other.slot == item.slot)
        {
            baseline = baseline - item.all_resistances() + replacement.all_resistances();
        } else {
            candidates.push(item);
        }
    }

    if candidates.len() > MAX_SLOT_COUNT {
        return Err(SolverError::TooManySlots {
            count: candidates.len(),
            max: MAX_SLOT_COUNT,
        });
    }

    let missing = target - baseline;
    if missing == Resistance::zero() {
        return Ok(Assignment::empty());
    }

    let mut best = Assignment::invalid();
    let mut slots = Vec::with_capacity(candidates.len());
    for subset in 1u32..(1u32 << candidates.len()) {
        let mut required = missing;
        slots.clear();
        for (bit, item) in candidates.iter().enumerate() {
            if subset & (1 << bit) != 0 {
                slots.push(item.slot);
                // Re-crafting wipes what is currently crafted on the item.
                required = required + item.crafted;
            }
        }

        let assignment = solver.solve(required, &slots, recipes)?;
        if assignment.cost < best.cost {
            best = assignment;
        }
    }

    Ok(best)
}
