//! Waste identification and return-load planning.
//!
//! An item becomes waste by expiring or by depleting its usage budget.
//! Return loads are packed greedily by ascending mass, which maximises
//! the number of items shipped under a mass ceiling.

use std::cmp::Ordering;

use stowage_core::{Day, ItemId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::catalogue::Catalogue;

/// Why an item is waste.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WasteReason {
    /// The expiry day has passed.
    Expired(Day),
    /// The usage budget was depleted.
    Depleted,
}

/// A waste item eligible for a return load.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WasteRecord {
    /// The item.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Mass in kilograms.
    pub mass: f64,
    /// Why it is waste.
    pub reason: WasteReason,
    /// Signed days until expiry (negative once past), when the item is
    /// perishable.
    pub days_to_expiry: Option<i64>,
}

/// A planned return load.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReturnPlan {
    /// Selected items, lightest first.
    pub items: Vec<WasteRecord>,
    /// Total mass of the selection.
    pub total_mass: f64,
}

impl ReturnPlan {
    /// Number of items in the load.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when nothing was selected.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Collects every item that is waste as of `today`: expired items first
/// by reason precedence, then usage-depleted ones. Items are reported in
/// id order.
pub fn identify_waste(catalogue: &Catalogue, today: Day) -> Vec<WasteRecord> {
    catalogue
        .iter()
        .filter_map(|item| {
            let reason = match item.expiry {
                Some(expiry) if expiry < today => WasteReason::Expired(expiry),
                _ if item.is_waste => WasteReason::Depleted,
                _ => return None,
            };
            Some(WasteRecord {
                id: item.id.clone(),
                name: item.name.clone(),
                mass: item.mass,
                reason,
                days_to_expiry: item.expiry.map(|e| today.days_until(e)),
            })
        })
        .collect()
}

/// Greedily selects waste items for a return load under a mass ceiling.
///
/// Candidates are taken lightest first, so the count of shipped items is
/// maximised; equal masses fall back to id order for determinism.
pub fn plan_return(candidates: &[WasteRecord], max_mass: f64) -> ReturnPlan {
    let mut sorted: Vec<&WasteRecord> = candidates.iter().collect();
    sorted.sort_by(|a, b| {
        a.mass
            .partial_cmp(&b.mass)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });

    let mut plan = ReturnPlan::default();
    for record in sorted {
        if plan.total_mass + record.mass <= max_mass {
            plan.total_mass += record.mass;
            plan.items.push(record.clone());
        }
    }
    plan
}
