use crate::{check_limits, walk_back, AssignmentSolver, SolverResult, MAX_SLOT_COUNT};
use anyhow::{anyhow, Result};
use cudarc::driver::*;
use cudarc::nvrtc::compile_ptx;
use loadout_core::{Assignment, Cost, Recipe, Resistance, ResistanceGrid, Slot, COST_INF};
use logging_timer::time;
use std::sync::Arc;

const KERNEL_SRC: &str = include_str!("kernels/assignment.cu");
const BLOCK_SIZE: u32 = 256;

/// Dynamic programming engine that runs the grid sweep on a CUDA device.
///
/// The host drives the sequential loop over slots and issues one kernel
/// launch per step; each device thread owns one grid cell. Recipes and the
/// base cost layer are uploaded when a solve starts, the final cost layer
/// and the back-pointer slabs are downloaded when it ends, and nothing
/// crosses the bus in between. Device buffers are acquired in `initialize`
/// and released when the engine is dropped.
pub struct CudaSolver {
    stream: Arc<CudaStream>,
    step_kernel: CudaFunction,
    d_best_cost: CudaSlice<Cost>,
    d_next_cost: CudaSlice<Cost>,
    d_back_pointers: Vec<CudaSlice<u8>>,
    host_cost: Vec<Cost>,
    capacity: usize,
    _ctx: Arc<CudaContext>,
}

impl CudaSolver {
    /// Compile the step kernel and set up buffers on the given device.
    pub fn new(device: usize) -> Result<Self> {
        let ptx = compile_ptx(KERNEL_SRC)
            .map_err(|e| anyhow!("failed to compile the assignment kernel: {:?}", e))?;
        let ctx = CudaContext::new(device)
            .map_err(|e| anyhow!("failed to open CUDA device {}: {:?}", device, e))?;
        let module = ctx
            .load_module(ptx)
            .map_err(|e| anyhow!("failed to load the assignment module: {:?}", e))?;
        let stream = ctx.default_stream();
        let step_kernel = module
            .load_function("assignment_step")
            .map_err(|e| anyhow!("failed to load the assignment kernel: {:?}", e))?;

        let d_best_cost = stream
            .alloc_zeros::<Cost>(1)
            .map_err(|e| anyhow!("failed to allocate device buffers: {:?}", e))?;
        let d_next_cost = stream
            .alloc_zeros::<Cost>(1)
            .map_err(|e| anyhow!("failed to allocate device buffers: {:?}", e))?;
        let d_back_pointers = (0..MAX_SLOT_COUNT)
            .map(|_| stream.alloc_zeros::<u8>(1))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow!("failed to allocate device buffers: {:?}", e))?;

        Ok(Self {
            stream,
            step_kernel,
            d_best_cost,
            d_next_cost,
            d_back_pointers,
            host_cost: vec![COST_INF; 1],
            capacity: 1,
            _ctx: ctx,
        })
    }

    // Allocation failure on the device is fatal.
    fn reserve(&mut self, cells: usize) {
        if cells <= self.capacity {
            return;
        }
        log::debug!("growing device tables to {} cells", cells);
        self.d_best_cost = self
            .stream
            .alloc_zeros::<Cost>(cells)
            .expect("failed to grow the device cost table");
        self.d_next_cost = self
            .stream
            .alloc_zeros::<Cost>(cells)
            .expect("failed to grow the device cost table");
        self.d_back_pointers = (0..MAX_SLOT_COUNT)
            .map(|_| stream_alloc_bytes(&self.stream, cells))
            .collect();
        self.host_cost = vec![COST_INF; cells];
        self.capacity = cells;
    }
}

fn stream_alloc_bytes(stream: &Arc<CudaStream>, cells: usize) -> CudaSlice<u8> {
    stream
        .alloc_zeros::<u8>(cells)
        .expect("failed to grow the device back-pointer slabs")
}

impl AssignmentSolver for CudaSolver {
    fn name(&self) -> &'static str {
        "cuda"
    }

    fn initialize(&mut self, max_required: Resistance, _max_recipes: usize) {
        let cells = ResistanceGrid::new(max_required).cell_count();
        self.reserve(cells);
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
        self.reserve(cells);

        // Upload the base layer: zero resistances cost nothing, everything
        // else is unreachable with no slots used.
        self.host_cost.fill(COST_INF);
        self.host_cost[grid.index_of(Resistance::zero())] = 0.0;
        self.stream
            .memcpy_htod(&self.host_cost, &mut self.d_best_cost)
            .expect("failed to upload the base cost layer");

        // Upload the recipe catalog.
        let mut resistances = Vec::with_capacity(recipes.len() * 4);
        for recipe in recipes {
            resistances.extend_from_slice(&[
                recipe.resistances.fire,
                recipe.resistances.cold,
                recipe.resistances.lightning,
                recipe.resistances.chaos,
            ]);
        }
        let costs: Vec<Cost> = recipes.iter().map(|recipe| recipe.cost).collect();
        let masks: Vec<u32> = recipes.iter().map(|recipe| recipe.slots.bits()).collect();
        let d_resistances = self
            .stream
            .memcpy_stod(&resistances)
            .expect("failed to upload the recipe catalog");
        let d_costs = self
            .stream
            .memcpy_stod(&costs)
            .expect("failed to upload the recipe catalog");
        let d_masks = self
            .stream
            .memcpy_stod(&masks)
            .expect("failed to upload the recipe catalog");

        // The kernel never needs the fire dimension; fire is whatever is
        // left after peeling off the three inner axes.
        let [_, dim_cold, dim_lightning, dim_chaos] = grid.dims().map(|d| d as u32);
        let cell_count = cells as u32;
        let recipe_count = recipes.len() as u32;
        let cfg = LaunchConfig {
            grid_dim: ((cell_count + BLOCK_SIZE - 1) / BLOCK_SIZE, 1, 1),
            block_dim: (BLOCK_SIZE, 1, 1),
            shared_mem_bytes: 0,
        };

        for (step, &slot) in slots.iter().enumerate() {
            let slot_mask = slot.bits();
            unsafe {
                self.stream
                    .launch_builder(&self.step_kernel)
                    .arg(&self.d_best_cost)
                    .arg(&mut self.d_next_cost)
                    .arg(&mut self.d_back_pointers[step])
                    .arg(&d_resistances)
                    .arg(&d_costs)
                    .arg(&d_masks)
                    .arg(&recipe_count)
                    .arg(&slot_mask)
                    .arg(&dim_cold)
                    .arg(&dim_lightning)
                    .arg(&dim_chaos)
                    .arg(&cell_count)
                    .launch(cfg.clone())
                    .expect("failed to launch the assignment kernel");
            }
            self.stream
                .synchronize()
                .expect("failed to synchronize the assignment kernel");
            std::mem::swap(&mut self.d_best_cost, &mut self.d_next_cost);
        }

        // Download the final layer and look up the answer.
        let final_cost = self
            .stream
            .memcpy_dtov(&self.d_best_cost)
            .expect("failed to download the final cost layer");
        let cost = final_cost[grid.index_of(required)];
        if cost >= COST_INF {
            return Ok(Assignment::invalid());
        }

        let mut back_pointers = Vec::with_capacity(slots.len());
        for slab in &self.d_back_pointers[..slots.len()] {
            back_pointers.push(
                self.stream
                    .memcpy_dtov(slab)
                    .expect("failed to download the back-pointer slabs"),
            );
        }
        Ok(walk_back(
            &grid,
            required,
            slots,
            recipes,
            &back_pointers,
            cost,
        ))
    }
}
