use loadout_core::Slot;

#[test]
fn test_slot_name_round_trip() {
    let slots = [
        Slot::NONE,
        Slot::ALL,
        Slot::ARMOUR,
        Slot::JEWELRY,
        Slot::WEAPON1,
        Slot::WEAPON2,
        Slot::HELMET,
        Slot::BODY,
        Slot::GLOVES,
        Slot::BOOTS,
        Slot::BELT,
        Slot::RING1,
        Slot::RING2,
        Slot::AMULET,
    ];
    for slot in slots {
        let name = slot.to_string();
        assert_eq!(name.parse::<Slot>().unwrap(), slot);
    }
}

#[test]
fn test_unnamed_mask_displays_unknown() {
    assert_eq!(Slot::from_bits(17).to_string(), "<unknown>");
    assert_eq!((Slot::WEAPON1 | Slot::RING2).to_string(), "<unknown>");
}

#[test]
fn test_unknown_name_fails_to_parse() {
    assert!("shield".parse::<Slot>().is_err());
    assert!("".parse::<Slot>().is_err());
}

#[test]
fn test_aggregates_cover_their_members() {
    for member in [
        Slot::WEAPON1,
        Slot::WEAPON2,
        Slot::HELMET,
        Slot::BODY,
        Slot::BOOTS,
        Slot::GLOVES,
        Slot::BELT,
    ] {
        assert!(Slot::ARMOUR.intersects(member));
        assert!(!Slot::JEWELRY.intersects(member));
    }
    for member in [Slot::RING1, Slot::RING2, Slot::AMULET] {
        assert!(Slot::JEWELRY.intersects(member));
        assert!(!Slot::ARMOUR.intersects(member));
    }
    assert_eq!(Slot::ARMOUR | Slot::JEWELRY, Slot::ALL);
    assert!(!Slot::NONE.intersects(Slot::ALL));
}
