//! Cargo item types: inputs, stowed records, priority and expiry.

use crate::geometry::{BoxRegion, Coord, Dims};
use crate::orientation::Orientation;
use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier of a cargo item.
pub type ItemId = String;

/// Priority tier of an item.
///
/// External manifests sometimes carry a 1–100 scale instead;
/// [`Priority::from_scale`] maps it onto the tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Priority {
    /// Mission-critical.
    High,
    /// Routine.
    #[default]
    Medium,
    /// Fill cargo.
    Low,
}

impl Priority {
    /// Maps an integer priority in `1..=100` onto a tier:
    /// `>= 67` is high, `>= 34` is medium, anything lower is low.
    pub fn from_scale(value: u8) -> Result<Self> {
        match value {
            0 | 101.. => Err(Error::InvalidArgument(format!(
                "priority scale must be in 1..=100, got {value}"
            ))),
            67..=100 => Ok(Priority::High),
            34..=66 => Ok(Priority::Medium),
            _ => Ok(Priority::Low),
        }
    }

    /// The ranking multiplier for this tier.
    pub fn multiplier(&self) -> f64 {
        match self {
            Priority::High => 1.5,
            Priority::Medium => 1.0,
            Priority::Low => 0.8,
        }
    }
}

/// A calendar day ordinal. Expiry comparisons are plain integer ordering,
/// monotone with wall-clock days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Day(pub u32);

impl Day {
    /// The day `days` after this one.
    pub fn plus(&self, days: u32) -> Day {
        Day(self.0.saturating_add(days))
    }

    /// Signed number of days from this day until `other`.
    pub fn days_until(&self, other: Day) -> i64 {
        other.0 as i64 - self.0 as i64
    }
}

/// A cargo item submitted for placement.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Item {
    id: ItemId,
    name: String,
    dims: Dims,
    mass: f64,
    priority: Priority,
    expiry: Option<Day>,
    usage_limit: Option<u32>,
    preferred_zone: Option<String>,
}

impl Item {
    /// Creates a new item with the given identity, dimensions and mass.
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, dims: Dims, mass: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            dims,
            mass,
            priority: Priority::default(),
            expiry: None,
            usage_limit: None,
            preferred_zone: None,
        }
    }

    /// Sets the priority tier.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the expiry day.
    pub fn with_expiry(mut self, day: Day) -> Self {
        self.expiry = Some(day);
        self
    }

    /// Sets the usage budget.
    pub fn with_usage_limit(mut self, limit: u32) -> Self {
        self.usage_limit = Some(limit);
        self
    }

    /// Sets the preferred stowage zone.
    pub fn with_preferred_zone(mut self, zone: impl Into<String>) -> Self {
        self.preferred_zone = Some(zone.into());
        self
    }

    /// Returns the item id.
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the original (unrotated) dimensions.
    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// Returns the mass in kilograms.
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Returns the priority tier.
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the expiry day, if the item is perishable.
    pub fn expiry(&self) -> Option<Day> {
        self.expiry
    }

    /// Returns the usage budget, if limited.
    pub fn usage_limit(&self) -> Option<u32> {
        self.usage_limit
    }

    /// Returns the preferred stowage zone.
    pub fn preferred_zone(&self) -> Option<&str> {
        self.preferred_zone.as_deref()
    }

    /// Validates dimensions and mass.
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(Error::InvalidArgument("item id must not be empty".into()));
        }
        self.dims.validate()?;
        if self.mass <= 0.0 || !self.mass.is_finite() {
            return Err(Error::InvalidArgument(format!(
                "mass for '{}' must be positive, got {}",
                self.id, self.mass
            )));
        }
        if self.usage_limit == Some(0) {
            return Err(Error::InvalidArgument(format!(
                "usage limit for '{}' must be at least 1",
                self.id
            )));
        }
        Ok(())
    }
}

/// An item stowed inside a container, with its chosen orientation and
/// position and its running usage state.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StowedItem {
    /// Item id, unique within the container.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Original dimensions as submitted.
    pub orig_dims: Dims,
    /// The rotation chosen at placement.
    pub orientation: Orientation,
    /// Dimensions after the rotation.
    pub eff_dims: Dims,
    /// Minimum corner inside the container.
    pub position: Coord,
    /// Mass in kilograms.
    pub mass: f64,
    /// Priority tier.
    pub priority: Priority,
    /// Expiry day, if perishable.
    pub expiry: Option<Day>,
    /// Usage budget, if limited.
    pub usage_limit: Option<u32>,
    /// Uses recorded so far. Never exceeds `usage_limit`.
    pub usage_count: u32,
    /// Preferred stowage zone.
    pub preferred_zone: Option<String>,
    /// Whether the item has become waste. Latches: once set it never
    /// clears.
    pub is_waste: bool,
}

impl StowedItem {
    /// Builds the stowed record for an item committed at a position.
    pub fn new(item: &Item, position: Coord, orientation: Orientation) -> Self {
        Self {
            id: item.id().clone(),
            name: item.name().to_string(),
            orig_dims: item.dims(),
            orientation,
            eff_dims: orientation.apply(item.dims()),
            position,
            mass: item.mass(),
            priority: item.priority(),
            expiry: item.expiry(),
            usage_limit: item.usage_limit(),
            usage_count: 0,
            preferred_zone: item.preferred_zone().map(str::to_string),
            is_waste: false,
        }
    }

    /// The cells this item occupies.
    pub fn region(&self) -> BoxRegion {
        BoxRegion::new(self.position, self.eff_dims)
    }

    /// True if the item expires strictly before the given day.
    pub fn expired_by(&self, day: Day) -> bool {
        self.expiry.is_some_and(|e| e < day)
    }

    /// Records one use. Returns `true` when this use depleted the budget
    /// and turned the item into waste. Fails with [`Error::Exhausted`]
    /// once the item is waste.
    pub fn record_use(&mut self) -> Result<bool> {
        if self.is_waste {
            return Err(Error::Exhausted(self.id.clone()));
        }
        self.usage_count += 1;
        if let Some(limit) = self.usage_limit {
            if self.usage_count >= limit {
                self.is_waste = true;
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Marks the item as waste. Irreversible.
    pub fn mark_waste(&mut self) {
        self.is_waste = true;
    }
}
