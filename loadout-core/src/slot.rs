use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr};
use std::str::FromStr;

/// Set of equipment slots, one bit per physical slot.
///
/// A recipe carries a `Slot` mask of everything it can be applied to; a
/// physical slot is a mask with exactly one bit set. `ARMOUR`, `JEWELRY` and
/// `ALL` are the usual aggregates.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Slot(u32);

impl Slot {
    pub const NONE: Slot = Slot(0);

    pub const WEAPON1: Slot = Slot(1);
    pub const WEAPON2: Slot = Slot(1 << 1);
    pub const HELMET: Slot = Slot(1 << 2);
    pub const BODY: Slot = Slot(1 << 3);
    pub const RING1: Slot = Slot(1 << 4);
    pub const RING2: Slot = Slot(1 << 5);
    pub const AMULET: Slot = Slot(1 << 6);
    pub const BELT: Slot = Slot(1 << 7);
    pub const GLOVES: Slot = Slot(1 << 8);
    pub const BOOTS: Slot = Slot(1 << 9);

    /// Everything except rings and the amulet.
    pub const ARMOUR: Slot = Slot(
        Slot::WEAPON1.0
            | Slot::WEAPON2.0
            | Slot::HELMET.0
            | Slot::BODY.0
            | Slot::BOOTS.0
            | Slot::GLOVES.0
            | Slot::BELT.0,
    );
    /// Rings and the amulet.
    pub const JEWELRY: Slot = Slot(Slot::RING1.0 | Slot::RING2.0 | Slot::AMULET.0);
    pub const ALL: Slot = Slot(Slot::ARMOUR.0 | Slot::JEWELRY.0);

    pub const fn from_bits(bits: u32) -> Slot {
        Slot(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// True iff the two masks share at least one slot.
    pub const fn intersects(self, other: Slot) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for Slot {
    type Output = Slot;

    fn bitor(self, other: Slot) -> Slot {
        Slot(self.0 | other.0)
    }
}

impl BitAnd for Slot {
    type Output = Slot;

    fn bitand(self, other: Slot) -> Slot {
        Slot(self.0 & other.0)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            Slot::ALL => "any",
            Slot::ARMOUR => "armour",
            Slot::JEWELRY => "jewelry",
            Slot::NONE => "none",
            Slot::WEAPON1 => "weapon1",
            Slot::WEAPON2 => "weapon2",
            Slot::HELMET => "helmet",
            Slot::BODY => "body",
            Slot::GLOVES => "gloves",
            Slot::BOOTS => "boots",
            Slot::BELT => "belt",
            Slot::RING1 => "ring1",
            Slot::RING2 => "ring2",
            Slot::AMULET => "amulet",
            _ => "<unknown>",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSlotError {
    pub name: String,
}

impl fmt::Display for UnknownSlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown slot name '{}'", self.name)
    }
}

impl std::error::Error for UnknownSlotError {}

impl FromStr for Slot {
    type Err = UnknownSlotError;

    fn from_str(name: &str) -> Result<Slot, UnknownSlotError> {
        match name {
            "any" => Ok(Slot::ALL),
            "armour" => Ok(Slot::ARMOUR),
            "jewelry" => Ok(Slot::JEWELRY),
            "none" => Ok(Slot::NONE),
            "weapon1" => Ok(Slot::WEAPON1),
            "weapon2" => Ok(Slot::WEAPON2),
            "helmet" => Ok(Slot::HELMET),
            "body" => Ok(Slot::BODY),
            "gloves" => Ok(Slot::GLOVES),
            "boots" => Ok(Slot::BOOTS),
            "belt" => Ok(Slot::BELT),
            "ring1" => Ok(Slot::RING1),
            "ring2" => Ok(Slot::RING2),
            "amulet" => Ok(Slot::AMULET),
            _ => Err(UnknownSlotError {
                name: name.to_string(),
            }),
        }
    }
}
