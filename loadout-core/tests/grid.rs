use loadout_core::{Resistance, ResistanceGrid};
use std::collections::HashSet;

#[test]
fn test_cell_count() {
    let grid = ResistanceGrid::new(Resistance::new(3, 2, 0, 4));
    assert_eq!(grid.cell_count(), 4 * 3 * 1 * 5);
    assert_eq!(grid.dims(), [4, 3, 1, 5]);

    let point = ResistanceGrid::new(Resistance::zero());
    assert_eq!(point.cell_count(), 1);
}

#[test]
fn test_index_map_is_a_bijection() {
    let max = Resistance::new(3, 2, 1, 4);
    let grid = ResistanceGrid::new(max);

    let mut seen = HashSet::new();
    for fire in 0..=max.fire {
        for cold in 0..=max.cold {
            for lightning in 0..=max.lightning {
                for chaos in 0..=max.chaos {
                    let value = Resistance::new(fire, cold, lightning, chaos);
                    let index = grid.index_of(value);
                    assert!(index < grid.cell_count());
                    assert!(seen.insert(index), "index {index} assigned twice");
                    assert_eq!(grid.resistance_at(index), value);
                }
            }
        }
    }
    assert_eq!(seen.len(), grid.cell_count());
}

#[test]
fn test_chaos_is_the_innermost_axis() {
    let grid = ResistanceGrid::new(Resistance::new(2, 2, 2, 9));
    let base = grid.index_of(Resistance::new(1, 1, 1, 0));
    assert_eq!(grid.index_of(Resistance::new(1, 1, 1, 1)), base + 1);
}
