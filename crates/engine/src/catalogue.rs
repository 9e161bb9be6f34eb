//! Per-container catalogue of stowed items.
//!
//! The catalogue owns the [`StowedItem`] records and the compact slot
//! keys the grid stores, plus two secondary indexes kept consistent
//! across every add/remove/waste transition: a per-priority id set and
//! an expiry-day index.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::num::NonZeroU32;

use stowage_core::{Day, Error, ItemId, Priority, Result, StowedItem};

use crate::grid::SlotId;

/// Catalogue of the items stowed in one container.
#[derive(Debug, Clone)]
pub struct Catalogue {
    items: BTreeMap<ItemId, StowedItem>,
    slots: HashMap<ItemId, SlotId>,
    ids: HashMap<SlotId, ItemId>,
    by_priority: BTreeMap<Priority, BTreeSet<ItemId>>,
    by_expiry: BTreeMap<Day, BTreeSet<ItemId>>,
    next_slot: u32,
}

impl Default for Catalogue {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalogue {
    /// Creates an empty catalogue.
    pub fn new() -> Self {
        Self {
            items: BTreeMap::new(),
            slots: HashMap::new(),
            ids: HashMap::new(),
            by_priority: BTreeMap::new(),
            by_expiry: BTreeMap::new(),
            next_slot: 1,
        }
    }

    /// Number of stowed items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when nothing is stowed.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True if the id is present.
    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// Looks up a stowed item.
    pub fn get(&self, id: &str) -> Option<&StowedItem> {
        self.items.get(id)
    }

    /// Mutable lookup, for usage and waste transitions. The caller must
    /// not alter position, dimensions, priority or expiry through this;
    /// those fields back the grid and the indexes.
    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut StowedItem> {
        self.items.get_mut(id)
    }

    /// The grid slot of an item.
    pub fn slot_of(&self, id: &str) -> Option<SlotId> {
        self.slots.get(id).copied()
    }

    /// The item owning a grid slot.
    pub fn id_of(&self, slot: SlotId) -> Option<&ItemId> {
        self.ids.get(&slot)
    }

    /// Iterates stowed items in id order.
    pub fn iter(&self) -> impl Iterator<Item = &StowedItem> {
        self.items.values()
    }

    /// Ids of the given priority tier, in id order.
    pub fn ids_by_priority(&self, priority: Priority) -> impl Iterator<Item = &ItemId> {
        self.by_priority.get(&priority).into_iter().flatten()
    }

    /// Ids expiring on or before the given day, ascending by expiry day
    /// and id.
    pub fn expiring_by(&self, day: Day) -> impl Iterator<Item = (Day, &ItemId)> {
        self.by_expiry
            .range(..=day)
            .flat_map(|(expiry, ids)| ids.iter().map(move |id| (*expiry, id)))
    }

    /// Inserts a stowed item and allocates its grid slot. Fails with
    /// [`Error::Conflict`] if the id is already present.
    pub fn insert(&mut self, item: StowedItem) -> Result<SlotId> {
        if self.items.contains_key(&item.id) {
            return Err(Error::Conflict(format!(
                "item '{}' is already stowed in this container",
                item.id
            )));
        }
        let slot = NonZeroU32::new(self.next_slot).ok_or_else(|| {
            Error::Conflict("container slot keys exhausted".to_string())
        })?;
        self.next_slot += 1;

        self.slots.insert(item.id.clone(), slot);
        self.ids.insert(slot, item.id.clone());
        self.by_priority
            .entry(item.priority)
            .or_default()
            .insert(item.id.clone());
        if let Some(expiry) = item.expiry {
            self.by_expiry
                .entry(expiry)
                .or_default()
                .insert(item.id.clone());
        }
        self.items.insert(item.id.clone(), item);
        Ok(slot)
    }

    /// Removes an item, returning its record and freed slot. Fails with
    /// [`Error::NotFound`] for an unknown id.
    pub fn remove(&mut self, id: &str) -> Result<(StowedItem, SlotId)> {
        let slot = self
            .slot_of(id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        let item = self
            .items
            .remove(id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        self.slots.remove(id);
        self.ids.remove(&slot);

        if let Some(ids) = self.by_priority.get_mut(&item.priority) {
            ids.remove(id);
            if ids.is_empty() {
                self.by_priority.remove(&item.priority);
            }
        }
        if let Some(expiry) = item.expiry {
            if let Some(ids) = self.by_expiry.get_mut(&expiry) {
                ids.remove(id);
                if ids.is_empty() {
                    self.by_expiry.remove(&expiry);
                }
            }
        }
        Ok((item, slot))
    }

    /// Total volume of all stowed items, in cells.
    pub fn stowed_volume(&self) -> u64 {
        self.items.values().map(|i| i.eff_dims.volume()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stowage_core::{Coord, Dims, Item, Orientation};

    fn stowed(id: &str, priority: Priority, expiry: Option<Day>) -> StowedItem {
        let mut item = Item::new(id, id, Dims::new(1, 1, 1), 1.0).with_priority(priority);
        if let Some(day) = expiry {
            item = item.with_expiry(day);
        }
        StowedItem::new(&item, Coord::ORIGIN, Orientation::IDENTITY)
    }

    #[test]
    fn test_insert_allocates_distinct_slots() {
        let mut catalogue = Catalogue::new();
        let a = catalogue.insert(stowed("A", Priority::High, None)).unwrap();
        let b = catalogue.insert(stowed("B", Priority::Low, None)).unwrap();

        assert_ne!(a, b);
        assert_eq!(catalogue.slot_of("A"), Some(a));
        assert_eq!(catalogue.id_of(b).map(String::as_str), Some("B"));
        assert_eq!(catalogue.len(), 2);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut catalogue = Catalogue::new();
        catalogue.insert(stowed("A", Priority::High, None)).unwrap();
        assert!(matches!(
            catalogue.insert(stowed("A", Priority::Low, None)),
            Err(Error::Conflict(_))
        ));
        assert_eq!(catalogue.len(), 1);
    }

    #[test]
    fn test_priority_index_tracks_removal() {
        let mut catalogue = Catalogue::new();
        catalogue.insert(stowed("A", Priority::High, None)).unwrap();
        catalogue.insert(stowed("B", Priority::High, None)).unwrap();
        catalogue.insert(stowed("C", Priority::Low, None)).unwrap();

        let high: Vec<&str> = catalogue
            .ids_by_priority(Priority::High)
            .map(String::as_str)
            .collect();
        assert_eq!(high, vec!["A", "B"]);

        catalogue.remove("A").unwrap();
        let high: Vec<&str> = catalogue
            .ids_by_priority(Priority::High)
            .map(String::as_str)
            .collect();
        assert_eq!(high, vec!["B"]);
        assert!(!catalogue.contains("A"));
    }

    #[test]
    fn test_expiry_index_orders_by_day() {
        let mut catalogue = Catalogue::new();
        catalogue
            .insert(stowed("LATE", Priority::Medium, Some(Day(40))))
            .unwrap();
        catalogue
            .insert(stowed("SOON", Priority::Medium, Some(Day(10))))
            .unwrap();
        catalogue
            .insert(stowed("NEVER", Priority::Medium, None))
            .unwrap();

        let expiring: Vec<(Day, &ItemId)> = catalogue.expiring_by(Day(40)).collect();
        assert_eq!(expiring.len(), 2);
        assert_eq!(expiring[0], (Day(10), &"SOON".to_string()));
        assert_eq!(expiring[1], (Day(40), &"LATE".to_string()));

        let expiring: Vec<(Day, &ItemId)> = catalogue.expiring_by(Day(9)).collect();
        assert!(expiring.is_empty());
    }

    #[test]
    fn test_remove_unknown() {
        let mut catalogue = Catalogue::new();
        assert!(matches!(catalogue.remove("GHOST"), Err(Error::NotFound(_))));
    }
}
