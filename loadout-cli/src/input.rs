use anyhow::{anyhow, Context, Result};
use loadout_core::{Equipment, Recipe, Resistance, Slot};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

// Raw recipe CSV row. One row expands to a recipe per rolled value.
#[derive(Debug, Deserialize)]
struct RecipeRecord {
    fire: u16,
    cold: u16,
    lightning: u16,
    chaos: u16,
    value_min: u16,
    value_max: u16,
    cost: f64,
    slot: String,
}

#[derive(Debug, Deserialize)]
struct EquipmentRecord {
    slot: String,
    craft_fire: u16,
    craft_cold: u16,
    craft_lightning: u16,
    craft_chaos: u16,
    base_fire: u16,
    base_cold: u16,
    base_lightning: u16,
    base_chaos: u16,
    is_craftable: u8,
    is_new: u8,
}

pub fn read_recipes(path: &Path) -> Result<Vec<Recipe>> {
    let file =
        File::open(path).with_context(|| format!("cannot open recipe file {}", path.display()))?;
    parse_recipes(file)
}

pub fn read_equipment(path: &Path) -> Result<Vec<Equipment>> {
    let file = File::open(path)
        .with_context(|| format!("cannot open equipment file {}", path.display()))?;
    parse_equipment(file)
}

/// Parse the recipe catalog and expand each row into its value range.
///
/// The axis columns are 0/1 flags; a row with `value_min..=value_max` yields
/// one recipe per value `i`, granting `flag * i` on each axis. The cost of
/// value `i` is the expected number of rolls to hit at least `i`, times the
/// cost of one roll. A null recipe is prepended at index 0.
fn parse_recipes<R: Read>(input: R) -> Result<Vec<Recipe>> {
    let mut recipes = vec![Recipe::null()];

    let mut reader = csv::Reader::from_reader(input);
    for (row, record) in reader.deserialize::<RecipeRecord>().enumerate() {
        let line = row + 2; // line 1 is the header
        let record = record.with_context(|| format!("error on line {}", line))?;

        for (axis, flag) in [
            ("fire", record.fire),
            ("cold", record.cold),
            ("lightning", record.lightning),
            ("chaos", record.chaos),
        ] {
            if flag > 1 {
                return Err(anyhow!(
                    "error on line {}: {} value has to be 0 or 1",
                    line,
                    axis
                ));
            }
        }

        if record.value_min > record.value_max {
            return Err(anyhow!(
                "error on line {}: minimal value must not be greater than maximal value",
                line
            ));
        }

        let slots = match record.slot.as_str() {
            "armour" => Slot::ARMOUR,
            "jewelry" => Slot::JEWELRY,
            "any" => Slot::ALL,
            other => {
                return Err(anyhow!(
                    "error on line {}: unknown slot name '{}'",
                    line,
                    other
                ))
            }
        };

        let span = (record.value_max - record.value_min) as f64 + 1.0;
        for value in record.value_min..=record.value_max {
            let cost = record.cost * span / ((record.value_max - value) as f64 + 1.0);
            recipes.push(Recipe::new(
                Resistance::new(
                    record.fire * value,
                    record.cold * value,
                    record.lightning * value,
                    record.chaos * value,
                ),
                cost,
                slots,
            ));
        }
    }

    Ok(recipes)
}

fn parse_equipment<R: Read>(input: R) -> Result<Vec<Equipment>> {
    let mut items = Vec::new();

    let mut reader = csv::Reader::from_reader(input);
    for (row, record) in reader.deserialize::<EquipmentRecord>().enumerate() {
        let line = row + 2;
        let record = record.with_context(|| format!("error on line {}", line))?;

        let slot: Slot = record
            .slot
            .parse()
            .map_err(|_| anyhow!("error on line {}: unknown slot name '{}'", line, record.slot))?;

        let is_craftable = parse_flag(record.is_craftable, line, "is_craftable")?;
        let is_new = parse_flag(record.is_new, line, "is_new")?;

        items.push(Equipment::new(
            slot,
            Resistance::new(
                record.craft_fire,
                record.craft_cold,
                record.craft_lightning,
                record.craft_chaos,
            ),
            Resistance::new(
                record.base_fire,
                record.base_cold,
                record.base_lightning,
                record.base_chaos,
            ),
            is_craftable,
            is_new,
        ));
    }

    Ok(items)
}

fn parse_flag(value: u8, line: usize, column: &str) -> Result<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(anyhow!(
            "error on line {}: {} value has to be 0 or 1",
            line,
            column
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_rows_expand_to_value_ranges() {
        let data = "\
fire,cold,lightning,chaos,value_min,value_max,cost,slot
1,0,0,0,10,12,3,armour
0,1,1,0,5,5,2,jewelry
";
        let recipes = parse_recipes(data.as_bytes()).unwrap();
        assert_eq!(recipes.len(), 1 + 3 + 1);
        assert!(recipes[0].is_null());

        assert_eq!(recipes[1].resistances, Resistance::new(10, 0, 0, 0));
        assert_eq!(recipes[1].cost, 3.0);
        assert_eq!(recipes[2].resistances, Resistance::new(11, 0, 0, 0));
        assert_eq!(recipes[2].cost, 4.5);
        assert_eq!(recipes[3].resistances, Resistance::new(12, 0, 0, 0));
        assert_eq!(recipes[3].cost, 9.0);
        assert_eq!(recipes[1].slots, Slot::ARMOUR);

        assert_eq!(recipes[4].resistances, Resistance::new(0, 5, 5, 0));
        assert_eq!(recipes[4].cost, 2.0);
        assert_eq!(recipes[4].slots, Slot::JEWELRY);
    }

    #[test]
    fn test_axis_flags_are_validated() {
        let data = "\
fire,cold,lightning,chaos,value_min,value_max,cost,slot
2,0,0,0,10,12,3,armour
";
        let err = parse_recipes(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 2"));
        assert!(err.to_string().contains("fire"));
    }

    #[test]
    fn test_reversed_value_range_is_rejected() {
        let data = "\
fire,cold,lightning,chaos,value_min,value_max,cost,slot
1,0,0,0,12,10,3,any
";
        let err = parse_recipes(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_unknown_recipe_slot_is_rejected() {
        let data = "\
fire,cold,lightning,chaos,value_min,value_max,cost,slot
1,0,0,0,10,12,3,shield
";
        let err = parse_recipes(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("unknown slot name 'shield'"));
    }

    #[test]
    fn test_equipment_rows_parse() {
        let data = "\
slot,craft_fire,craft_cold,craft_lightning,craft_chaos,base_fire,base_cold,base_lightning,base_chaos,is_craftable,is_new
helmet,10,0,0,0,0,10,0,0,1,0
gloves,0,0,0,0,10,0,0,0,1,1
";
        let items = parse_equipment(data.as_bytes()).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].slot, Slot::HELMET);
        assert_eq!(items[0].crafted, Resistance::new(10, 0, 0, 0));
        assert_eq!(items[0].base, Resistance::new(0, 10, 0, 0));
        assert!(items[0].is_craftable);
        assert!(!items[0].is_new);
        assert!(items[1].is_new);
    }

    #[test]
    fn test_equipment_flags_are_validated() {
        let data = "\
slot,craft_fire,craft_cold,craft_lightning,craft_chaos,base_fire,base_cold,base_lightning,base_chaos,is_craftable,is_new
helmet,10,0,0,0,0,10,0,0,1,2
";
        let err = parse_equipment(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 2"));
        assert!(err.to_string().contains("is_new"));
    }
}
