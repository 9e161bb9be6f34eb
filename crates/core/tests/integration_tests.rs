//! Integration tests for stowage-core.

use stowage_core::{BoxRegion, Coord, Day, Dims, Item, Orientation, Priority, StowedItem};

mod orientation_tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_six_orientations_cover_all_permutations() {
        let dims = Dims::new(1, 2, 3);
        let seen: BTreeSet<(u32, u32, u32)> = Orientation::ALL
            .iter()
            .map(|o| {
                let e = o.apply(dims);
                (e.w, e.d, e.h)
            })
            .collect();

        // Distinct extents, so all six permutations are distinct.
        assert_eq!(seen.len(), 6);
        for triple in &seen {
            let mut sorted = [triple.0, triple.1, triple.2];
            sorted.sort_unstable();
            assert_eq!(sorted, [1, 2, 3]);
        }
    }

    #[test]
    fn test_volume_invariant_under_rotation() {
        let dims = Dims::new(4, 7, 2);
        for orientation in Orientation::ALL {
            assert_eq!(orientation.apply(dims).volume(), dims.volume());
        }
    }

    #[test]
    fn test_round_trip_through_axes() {
        for orientation in Orientation::ALL {
            let (aw, ad, ah) = orientation.axes();
            let rebuilt = Orientation::new(aw, ad, ah).unwrap();
            assert_eq!(rebuilt, orientation);
        }
    }
}

mod item_tests {
    use super::*;

    #[test]
    fn test_stowed_record_carries_rotation() {
        let item = Item::new("ITEM002", "Toolbox", Dims::new(2, 3, 1), 4.5)
            .with_priority(Priority::High)
            .with_expiry(Day(60))
            .with_preferred_zone("Maintenance");

        let orientation = Orientation::new(1, 0, 2).unwrap();
        let stowed = StowedItem::new(&item, Coord::new(4, 2, 0), orientation);

        assert_eq!(stowed.eff_dims, Dims::new(3, 2, 1));
        assert_eq!(stowed.orig_dims, Dims::new(2, 3, 1));
        assert_eq!(
            stowed.region(),
            BoxRegion::new(Coord::new(4, 2, 0), Dims::new(3, 2, 1))
        );
        assert_eq!(stowed.preferred_zone.as_deref(), Some("Maintenance"));
        assert!(!stowed.is_waste);
    }

    #[test]
    fn test_region_stays_inside_container_when_checked() {
        let container = BoxRegion::new(Coord::ORIGIN, Dims::new(10, 8, 5));
        let item = Item::new("ITEM001", "Food Packet", Dims::new(3, 2, 2), 5.0);
        let stowed = StowedItem::new(&item, Coord::new(7, 6, 3), Orientation::IDENTITY);

        assert!(container.contains_box(&stowed.region()));

        let outside = StowedItem::new(&item, Coord::new(8, 6, 3), Orientation::IDENTITY);
        assert!(!container.contains_box(&outside.region()));
    }
}
