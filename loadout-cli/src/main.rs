mod input;
mod report;

use anyhow::{anyhow, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use loadout_core::{Resistance, ResistanceGrid, Slot};
use loadout_solver::{
    find_minimal_reassignment, AssignmentSolver, ParallelSolver, MAX_RECIPE_COUNT,
};
use std::path::PathBuf;
use std::time::Instant;

const MAX_ARMOUR_SLOTS: usize = 7;
const MAX_JEWELERY_SLOTS: usize = 3;
const MAX_TABLE_CELLS: usize = 10_000_000;

fn cli() -> Command {
    Command::new("loadout")
        .about("Finds the cheapest set of crafting recipes that reaches a resistance target")
        .arg_required_else_help(true)
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .help("file with all available recipes")
                .required(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("equip")
                .short('e')
                .long("equip")
                .help("file with equipped items; enables reassignment mode")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("armour")
                .short('a')
                .long("armour")
                .help("number of armour slots")
                .default_value("7")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("jewelery")
                .short('j')
                .long("jewelery")
                .help("number of jewelery slots")
                .default_value("3")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("required")
                .short('r')
                .long("required")
                .help("required resistances (in order: fire, cold, lightning, and chaos)")
                .required(true)
                .num_args(1..=4)
                .value_parser(value_parser!(u16)),
        )
        .arg(
            Arg::new("current")
                .short('c')
                .long("current")
                .help("current resistances, needed with --equip")
                .num_args(1..=4)
                .value_parser(value_parser!(u16)),
        )
        .arg(
            Arg::new("gpu")
                .long("gpu")
                .help("solve on the CUDA engine (needs a build with the 'cuda' feature)")
                .action(ArgAction::SetTrue),
        )
}

fn main() {
    env_logger::init();

    if let Err(e) = run(&cli().get_matches()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Collect up to four resistance values; missing components default to 0.
fn gather_resistance(matches: &ArgMatches, name: &str) -> Option<Resistance> {
    let values: Vec<u16> = matches.get_many::<u16>(name)?.copied().collect();
    let mut components = [0u16; 4];
    components[..values.len()].copy_from_slice(&values);
    Some(Resistance::new(
        components[0],
        components[1],
        components[2],
        components[3],
    ))
}

fn print_resistances(label: &str, res: Resistance) {
    println!(
        "{}: {}% fire, {}% cold, {}% lightning, {}% chaos",
        label, res.fire, res.cold, res.lightning, res.chaos
    );
}

fn build_solver(matches: &ArgMatches) -> Result<Box<dyn AssignmentSolver>> {
    if matches.get_flag("gpu") {
        #[cfg(feature = "cuda")]
        {
            return Ok(Box::new(loadout_solver::CudaSolver::new(0)?));
        }
        #[cfg(not(feature = "cuda"))]
        {
            return Err(anyhow!(
                "this build does not include the CUDA engine; rebuild with --features cuda"
            ));
        }
    }
    Ok(Box::new(ParallelSolver::new()))
}

fn run(matches: &ArgMatches) -> Result<()> {
    let recipes = input::read_recipes(matches.get_one::<PathBuf>("input").unwrap())?;
    println!("Loaded {} recipe variants.", recipes.len());
    if recipes.len() > MAX_RECIPE_COUNT {
        return Err(anyhow!(
            "this tool is limited to {} recipe variants, got {}",
            MAX_RECIPE_COUNT,
            recipes.len()
        ));
    }

    let required = gather_resistance(matches, "required").unwrap();
    let cells = ResistanceGrid::new(required).cell_count();
    if cells > MAX_TABLE_CELLS {
        return Err(anyhow!(
            "the requirement needs {} table cells, the limit is {}",
            cells,
            MAX_TABLE_CELLS
        ));
    }

    let mut solver = build_solver(matches)?;
    println!("Engine: {}", solver.name());

    if let Some(equip_path) = matches.get_one::<PathBuf>("equip") {
        let current = gather_resistance(matches, "current")
            .ok_or_else(|| anyhow!("specify current resistances with --equip"))?;
        let items = input::read_equipment(equip_path)?;

        println!("Equipped items: {}", items.len());
        print_resistances("Current", current);
        print_resistances("Required", required);
        println!();

        let start = Instant::now();
        let result =
            find_minimal_reassignment(solver.as_mut(), current, required, &items, &recipes)?;
        report::print_assignment(&result);
        println!("{} ms", start.elapsed().as_millis());
    } else {
        let armour_slots = *matches.get_one::<usize>("armour").unwrap();
        if armour_slots > MAX_ARMOUR_SLOTS {
            return Err(anyhow!(
                "there can be at most {} armour slots",
                MAX_ARMOUR_SLOTS
            ));
        }
        let jewelery_slots = *matches.get_one::<usize>("jewelery").unwrap();
        if jewelery_slots > MAX_JEWELERY_SLOTS {
            return Err(anyhow!(
                "there can be at most {} jewelery slots",
                MAX_JEWELERY_SLOTS
            ));
        }

        let mut slots = vec![Slot::ARMOUR; armour_slots];
        slots.extend(std::iter::repeat(Slot::JEWELRY).take(jewelery_slots));
        log::debug!("slot list: {:?}", slots);

        println!("Armour slots: {}", armour_slots);
        println!("Jewelery slots: {}", jewelery_slots);
        print_resistances("Required", required);
        println!();

        let start = Instant::now();
        solver.initialize(required, recipes.len());
        let result = solver.solve(required, &slots, &recipes)?;
        report::print_assignment(&result);
        println!("{} ms", start.elapsed().as_millis());
    }

    Ok(())
}
