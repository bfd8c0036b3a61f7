use crate::{check_limits, walk_back, AssignmentSolver, SolverResult, MAX_SLOT_COUNT};
use loadout_core::{Assignment, Cost, Recipe, Resistance, ResistanceGrid, Slot, COST_INF};
use logging_timer::time;
use rayon::prelude::*;

// Cells handed to one worker at a time. Large enough to amortize task
// dispatch, small enough to keep all cores busy on mid-sized grids.
const TILE_CELLS: usize = 4096;

/// Dynamic programming engine that sweeps the resistance grid with a
/// work-stealing thread pool.
///
/// The cost table is double buffered; the back-pointer slabs are kept per
/// slot step because reconstruction walks all of them. Within one step every
/// tile owns a disjoint range of cells and only reads the previous layer, so
/// no synchronization beyond the end-of-sweep join is needed.
#[derive(Default)]
pub struct ParallelSolver {
    best_cost: Vec<Cost>,
    next_cost: Vec<Cost>,
    back_pointers: Vec<Vec<u8>>,
}

impl ParallelSolver {
    pub fn new() -> Self {
        Self::default()
    }

    fn reserve(&mut self, cells: usize, slot_count: usize) {
        if self.best_cost.len() < cells {
            log::debug!("growing cost tables to {} cells", cells);
            self.best_cost.resize(cells, COST_INF);
            self.next_cost.resize(cells, COST_INF);
        }
        if self.back_pointers.len() < slot_count {
            self.back_pointers.resize_with(slot_count, Vec::new);
        }
        for slab in &mut self.back_pointers[..slot_count] {
            if slab.len() < cells {
                slab.resize(cells, 0);
            }
        }
    }
}

impl AssignmentSolver for ParallelSolver {
    fn name(&self) -> &'static str {
        "parallel"
    }

    fn initialize(&mut self, max_required: Resistance, _max_recipes: usize) {
        let cells = ResistanceGrid::new(max_required).cell_count();
        self.reserve(cells, MAX_SLOT_COUNT);
    }

    #[time]
    fn solve(
        &mut self,
        required: Resistance,
        slots: &[Slot],
        recipes: &[Recipe],
    ) -> SolverResult<Assignment> {
        check_limits(slots, recipes)?;

        let grid = ResistanceGrid::new(required);
        let cells = grid.cell_count();
        self.reserve(cells, slots.len());

        self.best_cost[..cells].fill(COST_INF);
        self.best_cost[grid.index_of(Resistance::zero())] = 0.0;

        for (step, &slot) in slots.iter().enumerate() {
            // Recipes that can go into this slot, in catalog order so that
            // ties keep resolving to the lowest index.
            let applicable: Vec<(u8, Recipe)> = recipes
                .iter()
                .enumerate()
                .filter(|(_, recipe)| recipe.applies_to(slot))
                .map(|(index, recipe)| (index as u8, *recipe))
                .collect();

            {
                let prev = &self.best_cost[..cells];
                let next = &mut self.next_cost[..cells];
                let pointers = &mut self.back_pointers[step][..cells];

                next.par_chunks_mut(TILE_CELLS)
                    .zip(pointers.par_chunks_mut(TILE_CELLS))
                    .enumerate()
                    .for_each(|(tile, (tile_costs, tile_pointers))| {
                        let base = tile * TILE_CELLS;
                        for (offset, (cost, pointer)) in tile_costs
                            .iter_mut()
                            .zip(tile_pointers.iter_mut())
                            .enumerate()
                        {
                            let value = grid.resistance_at(base + offset);

                            let mut cheapest = COST_INF;
                            let mut chosen = 0u8;
                            for &(index, recipe) in &applicable {
                                // Saturating subtraction turns requirements
                                // the recipe overshoots into a zero floor on
                                // that axis.
                                let from = grid.index_of(value - recipe.resistances);
                                let candidate = prev[from] + recipe.cost;
                                if candidate < cheapest {
                                    cheapest = candidate;
                                    chosen = index;
                                }
                            }
                            *cost = cheapest;
                            *pointer = chosen;
                        }
                    });
            }

            std::mem::swap(&mut self.best_cost, &mut self.next_cost);
        }

        let cost = self.best_cost[grid.index_of(required)];
        if cost >= COST_INF {
            return Ok(Assignment::invalid());
        }
        Ok(walk_back(
            &grid,
            required,
            slots,
            recipes,
            &self.back_pointers,
            cost,
        ))
    }
}
