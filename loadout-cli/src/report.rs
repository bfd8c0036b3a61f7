use loadout_core::{Assignment, Resistance};
use std::fmt::Display;

const CELL_WIDTH: usize = 13;
const COLUMNS: usize = 6;

fn print_cell<T: Display>(value: T) {
    print!("{:<width$}", value, width = CELL_WIDTH);
}

fn print_separator() {
    println!("{}", "-".repeat(CELL_WIDTH * COLUMNS));
}

/// Print the chosen recipes as a table with per-axis totals, or
/// `No solution.` for an infeasible result.
pub fn print_assignment(result: &Assignment) {
    if !result.is_valid() {
        println!("No solution.");
        return;
    }

    println!("Found solution with cost {}:", result.cost);

    print_cell("slot");
    print_cell("fire%");
    print_cell("cold%");
    print_cell("lightning%");
    print_cell("chaos%");
    print_cell("cost");
    println!();
    print_separator();

    let mut total = Resistance::zero();
    let mut total_cost = 0.0;
    for entry in &result.assignments {
        print_cell(entry.slot);
        print_cell(entry.recipe.resistances.fire);
        print_cell(entry.recipe.resistances.cold);
        print_cell(entry.recipe.resistances.lightning);
        print_cell(entry.recipe.resistances.chaos);
        print_cell(entry.recipe.cost);
        println!();

        total = total + entry.recipe.resistances;
        total_cost += entry.recipe.cost;
    }

    print_separator();
    print_cell("");
    print_cell(total.fire);
    print_cell(total.cold);
    print_cell(total.lightning);
    print_cell(total.chaos);
    print_cell(total_cost);
    println!();
    println!();
}
